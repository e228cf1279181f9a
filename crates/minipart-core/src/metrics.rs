//! Batch objective metrics.
//!
//! Everything here recomputes from scratch in one pass over the hyperedges.
//! The incremental evaluators mirror these definitions; the two paths must
//! agree bit for bit, which is why the ratio helpers live here and are shared.
//!
//! All metrics use resource dimension 0; extra weight dimensions are carried
//! through construction and coarsening but do not enter the objectives.

use crate::hypergraph::Hypergraph;
use crate::solution::Solution;
use crate::Index;

/// Balance penalty derived from per-block usage: the inverse squared
/// geometric mean of `usage / mean_usage`. Balanced usage gives 1, any empty
/// block drives the penalty to infinity.
pub fn ratio_penalty_from_usage(usage: &[i64]) -> f64 {
    let sum: i64 = usage.iter().sum();
    let normalized = sum as f64 / usage.len() as f64;
    let mut product = 1.0;
    for &u in usage {
        product *= u as f64 / normalized;
    }
    1.0 / product.powf(2.0 / usage.len() as f64)
}

/// Fixed-point ratio objective component: `floor(100 * value * penalty)`.
pub fn scaled_ratio(value: i64, penalty: f64) -> i64 {
    (100.0 * value as f64 * penalty) as i64
}

impl Hypergraph {
    /// Per-block used node weight.
    pub fn block_usage(&self, solution: &Solution) -> Vec<i64> {
        debug_assert_eq!(solution.n_nodes(), self.n_nodes());
        let mut usage = vec![0i64; self.n_blocks() as usize];
        for node in 0..self.n_nodes() {
            usage[solution[node] as usize] += self.node_weight(node, 0) as i64;
        }
        usage
    }

    /// Total amount by which block capacities are exceeded.
    pub fn sum_overflow(&self, solution: &Solution) -> i64 {
        let usage = self.block_usage(solution);
        (0..self.n_blocks())
            .map(|block| (usage[block as usize] - self.block_capacity(block, 0) as i64).max(0))
            .sum()
    }

    /// Number of blocks with no used weight.
    pub fn empty_blocks(&self, solution: &Solution) -> i64 {
        self.block_usage(solution)
            .iter()
            .filter(|&&usage| usage == 0)
            .count() as i64
    }

    /// Total weight of hyperedges spanning more than one block.
    pub fn cut(&self, solution: &Solution) -> i64 {
        let mut scratch = Vec::new();
        (0..self.n_hedges())
            .filter(|&hedge| self.hedge_blocks(solution, hedge, &mut scratch) > 1)
            .map(|hedge| self.hedge_weight(hedge, 0) as i64)
            .sum()
    }

    /// Sum of external degrees: `sum_e w(e) * lambda(e)`.
    pub fn soed(&self, solution: &Solution) -> i64 {
        let mut scratch = Vec::new();
        (0..self.n_hedges())
            .map(|hedge| {
                self.hedge_weight(hedge, 0) as i64
                    * self.hedge_blocks(solution, hedge, &mut scratch) as i64
            })
            .sum()
    }

    /// `sum_e w(e) * (lambda(e) - 1)`, which is the soed minus the total
    /// hyperedge weight.
    pub fn connectivity(&self, solution: &Solution) -> i64 {
        self.soed(solution) - self.total_hedge_weight(0)
    }

    /// Weighted degree of the most connected block.
    pub fn max_degree(&self, solution: &Solution) -> i64 {
        self.block_degrees(solution).into_iter().max().unwrap_or(0)
    }

    /// Per-block sum of the weights of cut hyperedges touching the block.
    pub fn block_degrees(&self, solution: &Solution) -> Vec<i64> {
        let mut degrees = vec![0i64; self.n_blocks() as usize];
        let mut scratch = Vec::new();
        for hedge in 0..self.n_hedges() {
            if self.hedge_blocks(solution, hedge, &mut scratch) > 1 {
                for &block in &scratch {
                    degrees[block as usize] += self.hedge_weight(hedge, 0) as i64;
                }
            }
        }
        degrees
    }

    /// Total weighted span of the hyperedges over the block chain.
    pub fn daisy_chain_distance(&self, solution: &Solution) -> i64 {
        let mut distance = 0i64;
        for hedge in 0..self.n_hedges() {
            let (min_block, max_block) = self.hedge_span(solution, hedge);
            if min_block < max_block {
                distance += self.hedge_weight(hedge, 0) as i64 * (max_block - min_block) as i64;
            }
        }
        distance
    }

    /// Weighted chain degree of the most loaded block.
    pub fn daisy_chain_max_degree(&self, solution: &Solution) -> i64 {
        self.block_daisy_chain_degrees(solution)
            .into_iter()
            .max()
            .unwrap_or(0)
    }

    /// Per-block chain degree: each hyperedge contributes its weight to every
    /// consecutive block pair within its span, so interior blocks are counted
    /// twice.
    pub fn block_daisy_chain_degrees(&self, solution: &Solution) -> Vec<i64> {
        let mut degrees = vec![0i64; self.n_blocks() as usize];
        for hedge in 0..self.n_hedges() {
            let (min_block, max_block) = self.hedge_span(solution, hedge);
            let weight = self.hedge_weight(hedge, 0) as i64;
            for block in min_block..max_block {
                degrees[block as usize] += weight;
                degrees[block as usize + 1] += weight;
            }
        }
        degrees
    }

    /// Balance penalty of the solution's block usage.
    pub fn ratio_penalty(&self, solution: &Solution) -> f64 {
        ratio_penalty_from_usage(&self.block_usage(solution))
    }

    pub fn ratio_cut(&self, solution: &Solution) -> f64 {
        self.cut(solution) as f64 * self.ratio_penalty(solution)
    }

    pub fn ratio_soed(&self, solution: &Solution) -> f64 {
        self.soed(solution) as f64 * self.ratio_penalty(solution)
    }

    pub fn ratio_connectivity(&self, solution: &Solution) -> f64 {
        self.connectivity(solution) as f64 * self.ratio_penalty(solution)
    }

    pub fn ratio_max_degree(&self, solution: &Solution) -> f64 {
        self.max_degree(solution) as f64 * self.ratio_penalty(solution)
    }

    /// Number of distinct blocks touched by `hedge`; `scratch` is left
    /// holding those blocks.
    fn hedge_blocks(&self, solution: &Solution, hedge: Index, scratch: &mut Vec<Index>) -> Index {
        scratch.clear();
        scratch.extend(self.hedge_pins(hedge).iter().map(|&pin| solution[pin]));
        scratch.sort_unstable();
        scratch.dedup();
        scratch.len() as Index
    }

    /// Lowest and highest block touched by `hedge`.
    fn hedge_span(&self, solution: &Solution, hedge: Index) -> (Index, Index) {
        let mut min_block = self.n_blocks() - 1;
        let mut max_block = 0;
        for &pin in self.hedge_pins(hedge) {
            min_block = min_block.min(solution[pin]);
            max_block = max_block.max(solution[pin]);
        }
        (min_block, max_block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypergraph::HypergraphBuilder;

    /// 4 nodes on a chain of 3 blocks, one spanning hyperedge.
    fn chain_graph() -> Hypergraph {
        let mut builder = HypergraphBuilder::new(4);
        builder.add_hedge(&[1], &[0, 1]).unwrap();
        builder.add_hedge(&[2], &[1, 2, 3]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.setup_blocks(3, 0.5).unwrap();
        hg
    }

    #[test]
    fn cut_soed_connectivity() {
        let hg = chain_graph();
        let solution = Solution::with_blocks(vec![0, 0, 1, 2], 3);
        assert_eq!(hg.cut(&solution), 2);
        // Hedge {0,1} has degree 1, hedge {1,2,3} degree 3.
        assert_eq!(hg.soed(&solution), 1 + 2 * 3);
        assert_eq!(hg.connectivity(&solution), hg.soed(&solution) - 3);
    }

    #[test]
    fn overflow_and_usage() {
        let hg = chain_graph();
        let solution = Solution::with_blocks(vec![0, 0, 0, 0], 3);
        assert_eq!(hg.block_usage(&solution), vec![4, 0, 0]);
        // Capacities are (2, 2, 2); all four nodes in block 0 overflow by 2.
        assert_eq!(hg.sum_overflow(&solution), 2);
        assert_eq!(hg.empty_blocks(&solution), 2);
    }

    #[test]
    fn max_degree_counts_cut_hedges_only() {
        let hg = chain_graph();
        let solution = Solution::with_blocks(vec![0, 0, 1, 2], 3);
        // Only hedge {1,2,3} (weight 2) is cut; it touches all three blocks.
        assert_eq!(hg.block_degrees(&solution), vec![2, 2, 2]);
        assert_eq!(hg.max_degree(&solution), 2);
    }

    #[test]
    fn daisy_chain_metrics() {
        let hg = chain_graph();
        let solution = Solution::with_blocks(vec![0, 0, 1, 2], 3);
        // Spans: {0,1} -> none, {1,2,3} -> 0..2 at weight 2.
        assert_eq!(hg.daisy_chain_distance(&solution), 4);
        assert_eq!(hg.block_daisy_chain_degrees(&solution), vec![2, 4, 2]);
        assert_eq!(hg.daisy_chain_max_degree(&solution), 4);
    }

    #[test]
    fn ratio_penalty_balanced_is_one() {
        let usage = [5i64, 5, 5];
        assert!((ratio_penalty_from_usage(&usage) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ratio_penalty_diverges_on_empty_block() {
        let usage = [10i64, 0];
        assert!(ratio_penalty_from_usage(&usage).is_infinite());
    }

    #[test]
    fn scaled_ratio_truncates() {
        assert_eq!(scaled_ratio(3, 1.0), 300);
        assert_eq!(scaled_ratio(3, 1.017), 305);
    }
}
