//! Shared counter state for the incremental evaluators.
//!
//! Every evaluator maintains the same three families of counters: per-block
//! demands, per-hyperedge pin counts per block (a flat `n_hedges x n_blocks`
//! matrix) and per-hyperedge block degrees. The transitions derived from a
//! single reassignment drive the objective-specific bookkeeping.

use minipart_core::{Hypergraph, PartitionError, Result, Solution};
use minipart_core::Index;

/// What happened to one hyperedge when a pin moved `from -> to`.
///
/// All flags use post-update pin counts: the hyperedge *entered* `to` when
/// its pin count there became 1, it *left* `from` when its pin count there
/// dropped to 0. Degree changes only when exactly one of the two happened.
pub(crate) struct HedgeTransition {
    pub entered_to: bool,
    pub left_from: bool,
    pub gained_block: bool,
    pub lost_block: bool,
    pub became_cut: bool,
    pub became_uncut: bool,
}

/// Mutable partition counters over an exclusively borrowed solution.
pub(crate) struct CounterState<'a> {
    hypergraph: &'a Hypergraph,
    solution: &'a mut Solution,
    demands: Vec<i64>,
    pins_per_block: Vec<Index>,
    degrees: Vec<Index>,
}

impl<'a> CounterState<'a> {
    pub fn new(hypergraph: &'a Hypergraph, solution: &'a mut Solution) -> Self {
        debug_assert_eq!(hypergraph.n_nodes(), solution.n_nodes());
        debug_assert_eq!(hypergraph.n_blocks(), solution.n_blocks());
        let demands = compute_demands(hypergraph, solution);
        let pins_per_block = compute_pins_per_block(hypergraph, solution);
        let degrees = compute_degrees(hypergraph, &pins_per_block);
        Self {
            hypergraph,
            solution,
            demands,
            pins_per_block,
            degrees,
        }
    }

    /// The borrowed hypergraph, with the evaluator's lifetime rather than
    /// the receiver's so callers can hold it across mutations.
    pub fn hypergraph(&self) -> &'a Hypergraph {
        self.hypergraph
    }

    pub fn solution(&self) -> &Solution {
        self.solution
    }

    pub fn demands(&self) -> &[i64] {
        &self.demands
    }

    pub fn degree(&self, hedge: Index) -> Index {
        self.degrees[hedge as usize]
    }

    pub fn degrees(&self) -> &[Index] {
        &self.degrees
    }

    /// Writes the assignment and adjusts the demands. Returns the previous
    /// block, or `None` for a self-move.
    pub fn reassign(&mut self, node: Index, to: Index) -> Option<Index> {
        debug_assert!(to >= 0 && to < self.hypergraph.n_blocks());
        let from = self.solution[node];
        if from == to {
            return None;
        }
        self.solution[node] = to;
        let weight = self.hypergraph.node_weight(node, 0) as i64;
        self.demands[to as usize] += weight;
        self.demands[from as usize] -= weight;
        Some(from)
    }

    /// Adjusts the pin counters of one incident hyperedge and reports the
    /// resulting transition.
    pub fn update_hedge(&mut self, hedge: Index, from: Index, to: Index) -> HedgeTransition {
        let k = self.hypergraph.n_blocks() as usize;
        let pins = &mut self.pins_per_block[hedge as usize * k..][..k];
        pins[to as usize] += 1;
        pins[from as usize] -= 1;
        let entered_to = pins[to as usize] == 1;
        let left_from = pins[from as usize] == 0;
        let gained_block = entered_to && !left_from;
        let lost_block = left_from && !entered_to;

        let degree = &mut self.degrees[hedge as usize];
        let mut became_cut = false;
        let mut became_uncut = false;
        if gained_block {
            *degree += 1;
            became_cut = *degree == 2;
        }
        if lost_block {
            *degree -= 1;
            became_uncut = *degree == 1;
        }
        HedgeTransition {
            entered_to,
            left_from,
            gained_block,
            lost_block,
            became_cut,
            became_uncut,
        }
    }

    /// Lowest and highest block holding a pin of `hedge`.
    pub fn hedge_span(&self, hedge: Index) -> (Index, Index) {
        let k = self.hypergraph.n_blocks() as usize;
        let row = &self.pins_per_block[hedge as usize * k..][..k];
        match row.iter().position(|&count| count != 0) {
            Some(min_block) => {
                let max_block = row.iter().rposition(|&count| count != 0).unwrap_or(min_block);
                (min_block as Index, max_block as Index)
            }
            // A hyperedge without pins spans nothing; mirror the batch
            // convention of an inverted span.
            None => (self.hypergraph.n_blocks() - 1, 0),
        }
    }

    pub fn sum_overflow(&self) -> i64 {
        (0..self.hypergraph.n_blocks())
            .map(|block| {
                (self.demands[block as usize] - self.hypergraph.block_capacity(block, 0) as i64)
                    .max(0)
            })
            .sum()
    }

    pub fn empty_blocks(&self) -> i64 {
        self.demands.iter().filter(|&&demand| demand == 0).count() as i64
    }

    /// Recomputes all counters from scratch and compares.
    pub fn check_consistency(&self) -> Result<()> {
        let demands = compute_demands(self.hypergraph, self.solution);
        if demands != self.demands {
            return Err(PartitionError::Inconsistency(
                "partition demands drifted from recomputation".to_string(),
            ));
        }
        let pins_per_block = compute_pins_per_block(self.hypergraph, self.solution);
        if pins_per_block != self.pins_per_block {
            return Err(PartitionError::Inconsistency(
                "per-block pin counts drifted from recomputation".to_string(),
            ));
        }
        let degrees = compute_degrees(self.hypergraph, &pins_per_block);
        if degrees != self.degrees {
            return Err(PartitionError::Inconsistency(
                "hyperedge degrees drifted from recomputation".to_string(),
            ));
        }
        Ok(())
    }
}

/// Weighted cut and soed derived from the degree counters.
pub(crate) fn cut_and_soed(state: &CounterState<'_>) -> (i64, i64) {
    let hypergraph = state.hypergraph();
    let mut cut = 0;
    let mut soed = 0;
    for hedge in 0..hypergraph.n_hedges() {
        let weight = hypergraph.hedge_weight(hedge, 0) as i64;
        let degree = state.degree(hedge);
        soed += weight * degree as i64;
        if degree > 1 {
            cut += weight;
        }
    }
    (cut, soed)
}

/// Per-block weighted degrees derived from the counters.
pub(crate) fn compute_block_degrees(state: &CounterState<'_>) -> Vec<i64> {
    let hypergraph = state.hypergraph();
    let k = hypergraph.n_blocks() as usize;
    let mut block_degrees = vec![0i64; k];
    for hedge in 0..hypergraph.n_hedges() {
        if state.degree(hedge) > 1 {
            let weight = hypergraph.hedge_weight(hedge, 0) as i64;
            for block in 0..k {
                if state.pins_in_block(hedge, block as Index) != 0 {
                    block_degrees[block] += weight;
                }
            }
        }
    }
    block_degrees
}

/// Applies one hyperedge transition to per-block degree counters.
///
/// `degree` is the post-update degree of the hyperedge. On a cut transition
/// both endpoints change together; while the hyperedge stays cut, only the
/// blocks it actually entered or left are touched.
pub(crate) fn apply_degree_transition(
    block_degrees: &mut [i64],
    transition: &HedgeTransition,
    degree: Index,
    from: Index,
    to: Index,
    weight: i64,
) {
    if transition.became_uncut {
        block_degrees[from as usize] -= weight;
        block_degrees[to as usize] -= weight;
    } else if transition.became_cut {
        block_degrees[from as usize] += weight;
        block_degrees[to as usize] += weight;
    } else if degree >= 2 {
        if transition.left_from {
            block_degrees[from as usize] -= weight;
        }
        if transition.entered_to {
            block_degrees[to as usize] += weight;
        }
    }
}

impl CounterState<'_> {
    pub fn pins_in_block(&self, hedge: Index, block: Index) -> Index {
        let k = self.hypergraph.n_blocks() as usize;
        self.pins_per_block[hedge as usize * k + block as usize]
    }
}

fn compute_demands(hypergraph: &Hypergraph, solution: &Solution) -> Vec<i64> {
    let mut demands = vec![0i64; hypergraph.n_blocks() as usize];
    for node in 0..hypergraph.n_nodes() {
        demands[solution[node] as usize] += hypergraph.node_weight(node, 0) as i64;
    }
    demands
}

fn compute_pins_per_block(hypergraph: &Hypergraph, solution: &Solution) -> Vec<Index> {
    let k = hypergraph.n_blocks() as usize;
    let mut pins = vec![0 as Index; hypergraph.n_hedges() as usize * k];
    for hedge in 0..hypergraph.n_hedges() {
        for &pin in hypergraph.hedge_pins(hedge) {
            pins[hedge as usize * k + solution[pin] as usize] += 1;
        }
    }
    pins
}

fn compute_degrees(hypergraph: &Hypergraph, pins_per_block: &[Index]) -> Vec<Index> {
    let k = hypergraph.n_blocks() as usize;
    (0..hypergraph.n_hedges() as usize)
        .map(|hedge| {
            pins_per_block[hedge * k..][..k]
                .iter()
                .filter(|&&count| count != 0)
                .count() as Index
        })
        .collect()
}
