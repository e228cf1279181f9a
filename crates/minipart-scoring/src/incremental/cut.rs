//! Incremental cut evaluator.

use minipart_core::{Hypergraph, PartitionError, Result, Solution};
use minipart_core::Index;

use crate::objective::ObjectiveVector;
use crate::state::{cut_and_soed, CounterState};

/// Minimizes `(overflow, cut, soed)`.
pub struct IncrementalCut<'a> {
    state: CounterState<'a>,
    cut: i64,
    soed: i64,
    objectives: ObjectiveVector,
}

impl<'a> IncrementalCut<'a> {
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
        self.objectives.clear();
        self.objectives.push(self.state.sum_overflow());
        self.objectives.push(self.cut);
        self.objectives.push(self.soed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minipart_core::HypergraphBuilder;

    #[test]
    fn trivial_two_block_scenario() {
        let mut builder = HypergraphBuilder::new(3);
        builder.add_hedge(&[1], &[0, 1, 2]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.setup_blocks(2, 0.5).unwrap();
        let mut solution = Solution::with_blocks(vec![0, 1, 0], 2);
        let inc = IncrementalCut::new(&hg, &mut solution);
        assert_eq!(inc.objectives(), &[0, 1, 2]);
        inc.check_consistency().unwrap();
    }

    #[test]
    fn moving_last_pin_uncuts() {
        let mut builder = HypergraphBuilder::new(3);
        builder.add_hedge(&[1], &[0, 1, 2]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.setup_blocks(2, 2.0).unwrap();
        let mut solution = Solution::with_blocks(vec![0, 1, 0], 2);
        let mut inc = IncrementalCut::new(&hg, &mut solution);
        inc.move_node(1, 0);
        // All pins in block 0: no cut, degree 1.
        assert_eq!(inc.objectives(), &[0, 0, 1]);
        inc.check_consistency().unwrap();
    }

    #[test]
    fn self_move_is_a_no_op() {
        let mut builder = HypergraphBuilder::new(2);
        builder.add_hedge(&[1], &[0, 1]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.setup_blocks(2, 0.0).unwrap();
        let mut solution = Solution::with_blocks(vec![0, 1], 2);
        let mut inc = IncrementalCut::new(&hg, &mut solution);
        let before: Vec<i64> = inc.objectives().to_vec();
        inc.move_node(0, 0);
        assert_eq!(inc.objectives(), before.as_slice());
    }
}
