//! Incremental maximum block degree evaluator.

use minipart_core::{Hypergraph, PartitionError, Result, Solution};
use minipart_core::Index;

use crate::objective::ObjectiveVector;
use crate::state::{apply_degree_transition, compute_block_degrees, cut_and_soed, CounterState};

/// Minimizes `(overflow, max block degree, soed)`.
pub struct IncrementalMaxDegree<'a> {
    state: CounterState<'a>,
    block_degrees: Vec<i64>,
    soed: i64,
    objectives: ObjectiveVector,
}

impl<'a> IncrementalMaxDegree<'a> {
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
        self.objectives.clear();
        self.objectives.push(self.state.sum_overflow());
        self.objectives
            .push(self.block_degrees.iter().copied().max().unwrap_or(0));
        self.objectives.push(self.soed);
    }
}
