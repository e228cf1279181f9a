//! Incremental sum-of-external-degrees evaluator.

use minipart_core::{Hypergraph, PartitionError, Result, Solution};
use minipart_core::Index;

use crate::objective::ObjectiveVector;
use crate::state::{cut_and_soed, CounterState};

/// Minimizes `(overflow, soed)`.
pub struct IncrementalSoed<'a> {
    state: CounterState<'a>,
    soed: i64,
    objectives: ObjectiveVector,
}

impl<'a> IncrementalSoed<'a> {
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
        self.objectives.clear();
        self.objectives.push(self.state.sum_overflow());
        self.objectives.push(self.soed);
    }
}
