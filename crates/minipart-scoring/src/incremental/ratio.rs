//! Incremental ratio evaluators.
//!
//! The ratio objectives scale a base metric by the balance penalty of the
//! block usage. The penalty is recomputed from the maintained demands on
//! every move through the same shared helpers the batch metrics use, so the
//! two paths agree bit for bit. Empty blocks dominate through the leading
//! empty-block count, since the penalty itself diverges there.

use minipart_core::metrics::{ratio_penalty_from_usage, scaled_ratio};
use minipart_core::{Hypergraph, PartitionError, Result, Solution};
use minipart_core::Index;

use crate::objective::ObjectiveVector;
use crate::state::{apply_degree_transition, compute_block_degrees, cut_and_soed, CounterState};

/// Minimizes `(empty blocks, scaled ratio cut, cut, soed)`.
pub struct IncrementalRatioCut<'a> {
    state: CounterState<'a>,
    cut: i64,
    soed: i64,
    objectives: ObjectiveVector,
}

impl<'a> IncrementalRatioCut<'a> {
    pub fn new(hypergraph: &'a Hypergraph, solution: &'a mut Solution) -> Self {
        let state = CounterState::new(hypergraph, solution);
        let (cut, soed) = cut_and_soed(&state);
        let mut inc = Self {
            state,
            cut,
            soed,
            objectives: ObjectiveVector::new(),
        };
        inc.refresh_objectives();
        inc
    }

    pub fn move_node(&mut self, node: Index, to: Index) {
        let hypergraph = self.state.hypergraph();
        let Some(from) = self.state.reassign(node, to) else {
            return;
        };
        for &hedge in hypergraph.node_hedges(node) {
            let weight = hypergraph.hedge_weight(hedge, 0) as i64;
            let transition = self.state.update_hedge(hedge, from, to);
            if transition.gained_block {
                self.soed += weight;
                if transition.became_cut {
                    self.cut += weight;
                }
            }
            if transition.lost_block {
                self.soed -= weight;
                if transition.became_uncut {
                    self.cut -= weight;
                }
            }
        }
        self.refresh_objectives();
    }

    pub fn objectives(&self) -> &[i64] {
        &self.objectives
    }

    pub(crate) fn state(&self) -> &CounterState<'a> {
        &self.state
    }

    pub fn check_consistency(&self) -> Result<()> {
        self.state.check_consistency()?;
        let (cut, soed) = cut_and_soed(&self.state);
        if cut != self.cut || soed != self.soed {
            return Err(PartitionError::Inconsistency(format!(
                "cut/soed drifted: maintained ({}, {}), recomputed ({cut}, {soed})",
                self.cut, self.soed
            )));
        }
        Ok(())
    }

    fn refresh_objectives(&mut self) {
        let penalty = ratio_penalty_from_usage(self.state.demands());
        self.objectives.clear();
        self.objectives.push(self.state.empty_blocks());
        self.objectives.push(scaled_ratio(self.cut, penalty));
        self.objectives.push(self.cut);
        self.objectives.push(self.soed);
    }
}

/// Minimizes `(empty blocks, scaled ratio soed, soed)`.
pub struct IncrementalRatioSoed<'a> {
    state: CounterState<'a>,
    soed: i64,
    objectives: ObjectiveVector,
}

impl<'a> IncrementalRatioSoed<'a> {
    pub fn new(hypergraph: &'a Hypergraph, solution: &'a mut Solution) -> Self {
        let state = CounterState::new(hypergraph, solution);
        let (_, soed) = cut_and_soed(&state);
        let mut inc = Self {
            state,
            soed,
            objectives: ObjectiveVector::new(),
        };
        inc.refresh_objectives();
        inc
    }

    pub fn move_node(&mut self, node: Index, to: Index) {
        let hypergraph = self.state.hypergraph();
        let Some(from) = self.state.reassign(node, to) else {
            return;
        };
        for &hedge in hypergraph.node_hedges(node) {
            let weight = hypergraph.hedge_weight(hedge, 0) as i64;
            let transition = self.state.update_hedge(hedge, from, to);
            if transition.gained_block {
                self.soed += weight;
            }
            if transition.lost_block {
                self.soed -= weight;
            }
        }
        self.refresh_objectives();
    }

    pub fn objectives(&self) -> &[i64] {
        &self.objectives
    }

    pub(crate) fn state(&self) -> &CounterState<'a> {
        &self.state
    }

    pub fn check_consistency(&self) -> Result<()> {
        self.state.check_consistency()?;
        let (_, soed) = cut_and_soed(&self.state);
        if soed != self.soed {
            return Err(PartitionError::Inconsistency(format!(
                "soed drifted: maintained {}, recomputed {soed}",
                self.soed
            )));
        }
        Ok(())
    }

    fn refresh_objectives(&mut self) {
        let penalty = ratio_penalty_from_usage(self.state.demands());
        self.objectives.clear();
        self.objectives.push(self.state.empty_blocks());
        self.objectives.push(scaled_ratio(self.soed, penalty));
        self.objectives.push(self.soed);
    }
}

/// Minimizes `(empty blocks, scaled ratio max degree, soed)`.
pub struct IncrementalRatioMaxDegree<'a> {
    state: CounterState<'a>,
    block_degrees: Vec<i64>,
    soed: i64,
    objectives: ObjectiveVector,
}

impl<'a> IncrementalRatioMaxDegree<'a> {
    pub fn new(hypergraph: &'a Hypergraph, solution: &'a mut Solution) -> Self {
        let state = CounterState::new(hypergraph, solution);
        let block_degrees = compute_block_degrees(&state);
        let (_, soed) = cut_and_soed(&state);
        let mut inc = Self {
            state,
            block_degrees,
            soed,
            objectives: ObjectiveVector::new(),
        };
        inc.refresh_objectives();
        inc
    }

    pub fn move_node(&mut self, node: Index, to: Index) {
        let hypergraph = self.state.hypergraph();
        let Some(from) = self.state.reassign(node, to) else {
            return;
        };
        for &hedge in hypergraph.node_hedges(node) {
            let weight = hypergraph.hedge_weight(hedge, 0) as i64;
            let transition = self.state.update_hedge(hedge, from, to);
            if transition.gained_block {
                self.soed += weight;
            }
            if transition.lost_block {
                self.soed -= weight;
            }
            apply_degree_transition(
                &mut self.block_degrees,
                &transition,
                self.state.degree(hedge),
                from,
                to,
                weight,
            );
        }
        self.refresh_objectives();
    }

    pub fn objectives(&self) -> &[i64] {
        &self.objectives
    }

    pub(crate) fn state(&self) -> &CounterState<'a> {
        &self.state
    }

    pub fn check_consistency(&self) -> Result<()> {
        self.state.check_consistency()?;
        let block_degrees = compute_block_degrees(&self.state);
        if block_degrees != self.block_degrees {
            return Err(PartitionError::Inconsistency(
                "block degrees drifted from recomputation".to_string(),
            ));
        }
        let (_, soed) = cut_and_soed(&self.state);
        if soed != self.soed {
            return Err(PartitionError::Inconsistency(format!(
                "soed drifted: maintained {}, recomputed {soed}",
                self.soed
            )));
        }
        Ok(())
    }

    fn refresh_objectives(&mut self) {
        let penalty = ratio_penalty_from_usage(self.state.demands());
        let max_degree = self.block_degrees.iter().copied().max().unwrap_or(0);
        self.objectives.clear();
        self.objectives.push(self.state.empty_blocks());
        self.objectives.push(scaled_ratio(max_degree, penalty));
        self.objectives.push(self.soed);
    }
}
