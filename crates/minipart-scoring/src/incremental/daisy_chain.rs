//! Incremental daisy-chain evaluators.
//!
//! Blocks are assumed arranged on a linear chain. Each hyperedge contributes
//! its weight times the span between its lowest and highest block (distance),
//! and to the chain degree of every consecutive block pair within the span.

use minipart_core::{Hypergraph, PartitionError, Result, Solution};
use minipart_core::Index;

use crate::objective::ObjectiveVector;
use crate::state::{cut_and_soed, CounterState};

fn span_length(span: (Index, Index)) -> i64 {
    (span.1 - span.0).max(0) as i64
}

fn compute_spans(state: &CounterState<'_>) -> Vec<(Index, Index)> {
    (0..state.hypergraph().n_hedges())
        .map(|hedge| state.hedge_span(hedge))
        .collect()
}

fn compute_distance(state: &CounterState<'_>, spans: &[(Index, Index)]) -> i64 {
    let hypergraph = state.hypergraph();
    spans
        .iter()
        .enumerate()
        .map(|(hedge, &span)| hypergraph.hedge_weight(hedge as Index, 0) as i64 * span_length(span))
        .sum()
}

fn compute_chain_degrees(state: &CounterState<'_>, spans: &[(Index, Index)]) -> Vec<i64> {
    let hypergraph = state.hypergraph();
    let mut degrees = vec![0i64; hypergraph.n_blocks() as usize];
    for (hedge, &(min_block, max_block)) in spans.iter().enumerate() {
        let weight = hypergraph.hedge_weight(hedge as Index, 0) as i64;
        for block in min_block..max_block {
            degrees[block as usize] += weight;
            degrees[block as usize + 1] += weight;
        }
    }
    degrees
}

/// Minimizes `(overflow, daisy-chain distance, soed)`.
pub struct IncrementalDaisyChainDistance<'a> {
    state: CounterState<'a>,
    spans: Vec<(Index, Index)>,
    distance: i64,
    soed: i64,
    objectives: ObjectiveVector,
}

impl<'a> IncrementalDaisyChainDistance<'a> {
    pub fn new(hypergraph: &'a Hypergraph, solution: &'a mut Solution) -> Self {
        let state = CounterState::new(hypergraph, solution);
        let spans = compute_spans(&state);
        let distance = compute_distance(&state, &spans);
        let (_, soed) = cut_and_soed(&state);
        let mut inc = Self {
            state,
            spans,
            distance,
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
            // The span can only change when a block gained its first pin or
            // lost its last one.
            if transition.entered_to || transition.left_from {
                let old_span = self.spans[hedge as usize];
                let new_span = self.state.hedge_span(hedge);
                if new_span != old_span {
                    self.distance += weight * (span_length(new_span) - span_length(old_span));
                    self.spans[hedge as usize] = new_span;
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
        let spans = compute_spans(&self.state);
        if spans != self.spans {
            return Err(PartitionError::Inconsistency(
                "hyperedge spans drifted from recomputation".to_string(),
            ));
        }
        let distance = compute_distance(&self.state, &spans);
        if distance != self.distance {
            return Err(PartitionError::Inconsistency(format!(
                "daisy-chain distance drifted: maintained {}, recomputed {distance}",
                self.distance
            )));
        }
        Ok(())
    }

    fn refresh_objectives(&mut self) {
        self.objectives.clear();
        self.objectives.push(self.state.sum_overflow());
        self.objectives.push(self.distance);
        self.objectives.push(self.soed);
    }
}

/// Minimizes `(overflow, max chain degree, daisy-chain distance)`.
pub struct IncrementalDaisyChainMaxDegree<'a> {
    state: CounterState<'a>,
    spans: Vec<(Index, Index)>,
    chain_degrees: Vec<i64>,
    distance: i64,
    objectives: ObjectiveVector,
}

impl<'a> IncrementalDaisyChainMaxDegree<'a> {
    pub fn new(hypergraph: &'a Hypergraph, solution: &'a mut Solution) -> Self {
        let state = CounterState::new(hypergraph, solution);
        let spans = compute_spans(&state);
        let chain_degrees = compute_chain_degrees(&state, &spans);
        let distance = compute_distance(&state, &spans);
        let mut inc = Self {
            state,
            spans,
            chain_degrees,
            distance,
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
            if transition.entered_to || transition.left_from {
                let old_span = self.spans[hedge as usize];
                let new_span = self.state.hedge_span(hedge);
                if new_span != old_span {
                    for block in old_span.0..old_span.1 {
                        self.chain_degrees[block as usize] -= weight;
                        self.chain_degrees[block as usize + 1] -= weight;
                    }
                    for block in new_span.0..new_span.1 {
                        self.chain_degrees[block as usize] += weight;
                        self.chain_degrees[block as usize + 1] += weight;
                    }
                    self.distance += weight * (span_length(new_span) - span_length(old_span));
                    self.spans[hedge as usize] = new_span;
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
        let spans = compute_spans(&self.state);
        if spans != self.spans {
            return Err(PartitionError::Inconsistency(
                "hyperedge spans drifted from recomputation".to_string(),
            ));
        }
        let chain_degrees = compute_chain_degrees(&self.state, &spans);
        if chain_degrees != self.chain_degrees {
            return Err(PartitionError::Inconsistency(
                "chain degrees drifted from recomputation".to_string(),
            ));
        }
        let distance = compute_distance(&self.state, &spans);
        if distance != self.distance {
            return Err(PartitionError::Inconsistency(format!(
                "daisy-chain distance drifted: maintained {}, recomputed {distance}",
                self.distance
            )));
        }
        Ok(())
    }

    fn refresh_objectives(&mut self) {
        self.objectives.clear();
        self.objectives.push(self.state.sum_overflow());
        self.objectives
            .push(self.chain_degrees.iter().copied().max().unwrap_or(0));
        self.objectives.push(self.distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minipart_core::HypergraphBuilder;

    fn chain_fixture() -> Hypergraph {
        let mut builder = HypergraphBuilder::new(3);
        builder.add_hedge(&[2], &[0, 1, 2]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.setup_blocks(3, 2.0).unwrap();
        hg
    }

    #[test]
    fn distance_follows_span() {
        let hg = chain_fixture();
        let mut solution = Solution::with_blocks(vec![0, 1, 2], 3);
        let mut inc = IncrementalDaisyChainDistance::new(&hg, &mut solution);
        // Span 0..2 at weight 2.
        assert_eq!(inc.objectives()[1], 4);
        inc.move_node(2, 1);
        inc.check_consistency().unwrap();
        assert_eq!(inc.objectives()[1], 2);
        inc.move_node(0, 1);
        inc.move_node(1, 1);
        inc.check_consistency().unwrap();
        assert_eq!(inc.objectives()[1], 0);
    }

    #[test]
    fn chain_degrees_count_interior_blocks_twice() {
        let hg = chain_fixture();
        let mut solution = Solution::with_blocks(vec![0, 1, 2], 3);
        let mut inc = IncrementalDaisyChainMaxDegree::new(&hg, &mut solution);
        // Pairs (0,1) and (1,2): the middle block carries both.
        assert_eq!(inc.objectives()[1], 4);
        inc.move_node(0, 1);
        inc.check_consistency().unwrap();
        assert_eq!(inc.objectives()[1], 2);
    }
}
