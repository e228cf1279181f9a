//! CSR-compressed weighted hypergraph.
//!
//! A `Hypergraph` is built once through a `HypergraphBuilder`, validated and
//! finalized, and never mutated afterwards except for the two explicit
//! restructuring operations `setup_blocks` and `merge_parallel_hedges`.
//! Both incidence directions are stored compressed: for each node its weights
//! followed by its incident hyperedges, for each hyperedge its weights
//! followed by its sorted pin list.

use std::hash::Hasher;

use fnv::{FnvHashMap, FnvHasher};

use crate::error::{PartitionError, Result};
use crate::solution::Solution;
use crate::Index;

/// A weighted hypergraph with block capacities.
///
/// Nodes, hyperedges and blocks each carry a small vector of weights
/// (one entry per resource dimension, one dimension by default).
#[derive(Debug, Clone)]
pub struct Hypergraph {
    n_nodes: Index,
    n_hedges: Index,
    n_blocks: Index,
    n_pins: Index,

    n_node_weights: Index,
    n_hedge_weights: Index,
    n_block_weights: Index,

    // Compressed incidence, weights first then indices for each entity.
    node_begin: Vec<Index>,
    hedge_begin: Vec<Index>,
    node_data: Vec<Index>,
    hedge_data: Vec<Index>,

    // Capacities, block-major.
    block_data: Vec<Index>,

    total_node_weights: Vec<i64>,
    total_hedge_weights: Vec<i64>,
    total_block_weights: Vec<i64>,
}

impl Hypergraph {
    pub fn n_nodes(&self) -> Index {
        self.n_nodes
    }

    pub fn n_hedges(&self) -> Index {
        self.n_hedges
    }

    pub fn n_blocks(&self) -> Index {
        self.n_blocks
    }

    pub fn n_pins(&self) -> Index {
        self.n_pins
    }

    pub fn n_node_weights(&self) -> Index {
        self.n_node_weights
    }

    pub fn n_hedge_weights(&self) -> Index {
        self.n_hedge_weights
    }

    pub fn n_block_weights(&self) -> Index {
        self.n_block_weights
    }

    /// Total node weight in the given resource dimension.
    pub fn total_node_weight(&self, dim: Index) -> i64 {
        self.total_node_weights[dim as usize]
    }

    /// Total hyperedge weight in the given resource dimension.
    pub fn total_hedge_weight(&self, dim: Index) -> i64 {
        self.total_hedge_weights[dim as usize]
    }

    /// Total block capacity in the given resource dimension.
    pub fn total_block_weight(&self, dim: Index) -> i64 {
        self.total_block_weights[dim as usize]
    }

    pub fn node_weight(&self, node: Index, dim: Index) -> Index {
        self.node_data[(self.node_begin[node as usize] + dim) as usize]
    }

    pub fn hedge_weight(&self, hedge: Index, dim: Index) -> Index {
        self.hedge_data[(self.hedge_begin[hedge as usize] + dim) as usize]
    }

    pub fn block_capacity(&self, block: Index, dim: Index) -> Index {
        self.block_data[(block * self.n_block_weights + dim) as usize]
    }

    /// The hyperedges incident to `node`.
    pub fn node_hedges(&self, node: Index) -> &[Index] {
        let b = (self.node_begin[node as usize] + self.n_node_weights) as usize;
        let e = self.node_begin[node as usize + 1] as usize;
        &self.node_data[b..e]
    }

    /// The sorted, duplicate-free pin list of `hedge`.
    pub fn hedge_pins(&self, hedge: Index) -> &[Index] {
        let b = (self.hedge_begin[hedge as usize] + self.n_hedge_weights) as usize;
        let e = self.hedge_begin[hedge as usize + 1] as usize;
        &self.hedge_data[b..e]
    }

    /// Splits the total node weight into `n_blocks` capacities, inflated by
    /// `imbalance_factor`. Block 0 absorbs the rounding remainder.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when `n_blocks` is not positive or when the block and
    /// node weight dimensions differ.
    pub fn setup_blocks(&mut self, n_blocks: Index, imbalance_factor: f64) -> Result<()> {
        if n_blocks <= 0 {
            return Err(PartitionError::InvalidConfig(format!(
                "number of blocks must be positive, got {n_blocks}"
            )));
        }
        if self.n_block_weights != self.n_node_weights {
            return Err(PartitionError::InvalidConfig(format!(
                "block weight dimensions ({}) do not match node weight dimensions ({})",
                self.n_block_weights, self.n_node_weights
            )));
        }
        self.n_blocks = n_blocks;
        self.block_data = vec![0; (n_blocks * self.n_block_weights) as usize];
        self.total_block_weights = vec![0; self.n_block_weights as usize];
        for dim in 0..self.n_block_weights {
            let total_capacity =
                (self.total_node_weights[dim as usize] as f64 * (1.0 + imbalance_factor)) as i64;
            let per_block = total_capacity / n_blocks as i64;
            for block in 0..n_blocks {
                let capacity = if block == 0 {
                    total_capacity - per_block * (n_blocks as i64 - 1)
                } else {
                    per_block
                };
                self.block_data[(block * self.n_block_weights + dim) as usize] = capacity as Index;
            }
            self.total_block_weights[dim as usize] = total_capacity;
        }
        Ok(())
    }

    /// Contracts the hypergraph along a coarsening map.
    ///
    /// Coarse node weights are the sums of their constituents; pin lists are
    /// deduplicated images under the map; hyperedges left with fewer than two
    /// distinct pins are dropped, and parallel hyperedges are merged.
    /// Block capacities carry over unchanged.
    ///
    /// # Errors
    ///
    /// `Unrepresentable` when the map does not cover this node set or is not
    /// a contiguous-dense labeling.
    pub fn coarsen(&self, mapping: &Solution) -> Result<Hypergraph> {
        if mapping.n_nodes() != self.n_nodes {
            return Err(PartitionError::Unrepresentable(format!(
                "coarsening map covers {} nodes, hypergraph has {}",
                mapping.n_nodes(),
                self.n_nodes
            )));
        }
        let coarse_nodes = mapping.n_blocks();
        if coarse_nodes < 1 || coarse_nodes > self.n_nodes {
            return Err(PartitionError::Unrepresentable(format!(
                "coarsening map targets {coarse_nodes} super-nodes for {} nodes",
                self.n_nodes
            )));
        }

        // Coarse node weights, checking that every label is in range and used.
        let d = self.n_node_weights;
        let mut node_weights = vec![0 as Index; (coarse_nodes * d) as usize];
        let mut used = vec![false; coarse_nodes as usize];
        for node in 0..self.n_nodes {
            let coarse = mapping[node];
            if coarse < 0 || coarse >= coarse_nodes {
                return Err(PartitionError::Unrepresentable(format!(
                    "coarsening map entry {coarse} for node {node} out of range"
                )));
            }
            used[coarse as usize] = true;
            for dim in 0..d {
                node_weights[(coarse * d + dim) as usize] += self.node_weight(node, dim);
            }
        }
        if let Some(hole) = used.iter().position(|&u| !u) {
            return Err(PartitionError::Unrepresentable(format!(
                "coarsening map never uses super-node {hole}"
            )));
        }

        // Hyperedges: deduplicated image, single-pin hyperedges dropped.
        let mut builder = HypergraphBuilder::with_dims(
            coarse_nodes,
            self.n_node_weights,
            self.n_hedge_weights,
            self.n_block_weights,
        );
        let mut pins = Vec::new();
        for hedge in 0..self.n_hedges {
            pins.clear();
            pins.extend(self.hedge_pins(hedge).iter().map(|&node| mapping[node]));
            pins.sort_unstable();
            pins.dedup();
            if pins.len() > 1 {
                builder.add_hedge(self.hedge_weights(hedge), &pins)?;
            }
        }
        for node in 0..coarse_nodes {
            let b = (node * d) as usize;
            builder.set_node_weights(node, &node_weights[b..b + d as usize])?;
        }

        let mut coarse = builder.finalize()?;
        coarse.merge_parallel_hedges();
        coarse.n_blocks = self.n_blocks;
        coarse.block_data = self.block_data.clone();
        coarse.total_block_weights = self.total_block_weights.clone();
        Ok(coarse)
    }

    /// Merges hyperedges with identical pin lists, summing their weights.
    ///
    /// The first hyperedge of each group is kept, in insertion order. Pin
    /// lists are compared exactly, so they must already be sorted - which
    /// finalization guarantees.
    pub fn merge_parallel_hedges(&mut self) {
        let d = self.n_hedge_weights as usize;
        let mut buckets: FnvHashMap<u64, Vec<usize>> = FnvHashMap::default();
        // Kept hyperedges (original ids) and their accumulated weights.
        let mut kept: Vec<Index> = Vec::new();
        let mut weights: Vec<Index> = Vec::new();

        for hedge in 0..self.n_hedges {
            let pins = self.hedge_pins(hedge);
            let mut hasher = FnvHasher::default();
            for &pin in pins {
                hasher.write_i32(pin);
            }
            let slot = buckets.entry(hasher.finish()).or_default();
            let found = slot
                .iter()
                .copied()
                .find(|&k| self.hedge_pins(kept[k]) == pins);
            match found {
                Some(k) => {
                    for dim in 0..d {
                        weights[k * d + dim] += self.hedge_weight(hedge, dim as Index);
                    }
                }
                None => {
                    slot.push(kept.len());
                    kept.push(hedge);
                    weights.extend(self.hedge_weights(hedge));
                }
            }
        }

        if kept.len() == self.n_hedges as usize {
            return;
        }

        let mut hedge_begin = Vec::with_capacity(kept.len() + 1);
        let mut hedge_data =
            Vec::with_capacity(weights.len() + self.hedge_data.len() - self.n_hedges as usize * d);
        hedge_begin.push(0);
        for (k, &hedge) in kept.iter().enumerate() {
            hedge_data.extend_from_slice(&weights[k * d..(k + 1) * d]);
            hedge_data.extend_from_slice(self.hedge_pins(hedge));
            hedge_begin.push(hedge_data.len() as Index);
        }
        self.n_hedges = kept.len() as Index;
        self.hedge_begin = hedge_begin;
        self.hedge_data = hedge_data;

        let node_weights = self.node_weights_flat();
        self.rebuild_node_csr(&node_weights);
        self.finalize_totals();
    }

    /// Verifies the structural invariants: monotone offsets, sorted
    /// duplicate-free pin lists, in-range indices, mutually consistent
    /// node/hyperedge incidence and matching totals.
    pub fn check_consistency(&self) -> Result<()> {
        let inconsistent = |message: String| Err(PartitionError::Inconsistency(message));

        if self.node_begin.len() != self.n_nodes as usize + 1
            || self.hedge_begin.len() != self.n_hedges as usize + 1
        {
            return inconsistent("offset array length mismatch".to_string());
        }
        if self.block_data.len() != (self.n_blocks * self.n_block_weights) as usize {
            return inconsistent("block data length mismatch".to_string());
        }

        let mut pin_count = 0;
        for hedge in 0..self.n_hedges {
            let pins = self.hedge_pins(hedge);
            pin_count += pins.len();
            for window in pins.windows(2) {
                if window[0] >= window[1] {
                    return inconsistent(format!("pins of hyperedge {hedge} not sorted and unique"));
                }
            }
            for &pin in pins {
                if pin < 0 || pin >= self.n_nodes {
                    return inconsistent(format!("pin {pin} of hyperedge {hedge} out of range"));
                }
            }
        }
        if pin_count != self.n_pins as usize {
            return inconsistent(format!(
                "pin count {pin_count} does not match recorded {}",
                self.n_pins
            ));
        }

        let mut incidence_count = 0;
        for node in 0..self.n_nodes {
            let hedges = self.node_hedges(node);
            incidence_count += hedges.len();
            for &hedge in hedges {
                if hedge < 0 || hedge >= self.n_hedges {
                    return inconsistent(format!("hyperedge {hedge} of node {node} out of range"));
                }
                if self.hedge_pins(hedge).binary_search(&node).is_err() {
                    return inconsistent(format!(
                        "node {node} lists hyperedge {hedge} but is not among its pins"
                    ));
                }
            }
        }
        if incidence_count != pin_count {
            return inconsistent("node and hyperedge incidence disagree".to_string());
        }

        for dim in 0..self.n_node_weights {
            let total: i64 = (0..self.n_nodes)
                .map(|node| self.node_weight(node, dim) as i64)
                .sum();
            if total != self.total_node_weights[dim as usize] {
                return inconsistent(format!("node weight total drifted in dimension {dim}"));
            }
        }
        for dim in 0..self.n_hedge_weights {
            let total: i64 = (0..self.n_hedges)
                .map(|hedge| self.hedge_weight(hedge, dim) as i64)
                .sum();
            if total != self.total_hedge_weights[dim as usize] {
                return inconsistent(format!("hyperedge weight total drifted in dimension {dim}"));
            }
        }
        Ok(())
    }

    fn node_weights_flat(&self) -> Vec<Index> {
        let d = self.n_node_weights;
        let mut weights = Vec::with_capacity((self.n_nodes * d) as usize);
        for node in 0..self.n_nodes {
            for dim in 0..d {
                weights.push(self.node_weight(node, dim));
            }
        }
        weights
    }

    /// Rebuilds the node-side CSR from the hyperedge side by counting sort:
    /// one pass to count incidences, a prefix sum for the offsets, one pass
    /// to scatter the hyperedge ids.
    fn rebuild_node_csr(&mut self, node_weights: &[Index]) {
        let n = self.n_nodes as usize;
        let d = self.n_node_weights;

        let mut counts = vec![0 as Index; n];
        let mut pin_count = 0 as Index;
        for hedge in 0..self.n_hedges {
            for &pin in self.hedge_pins(hedge) {
                counts[pin as usize] += 1;
                pin_count += 1;
            }
        }
        self.n_pins = pin_count;

        let mut node_begin = Vec::with_capacity(n + 1);
        let mut offset = 0 as Index;
        node_begin.push(offset);
        for &count in &counts {
            offset += d + count;
            node_begin.push(offset);
        }

        let mut node_data = vec![0 as Index; offset as usize];
        for node in 0..n {
            let b = node_begin[node] as usize;
            node_data[b..b + d as usize].copy_from_slice(&node_weights[node * d as usize..][..d as usize]);
        }
        let mut cursor: Vec<Index> = node_begin[..n].iter().map(|&b| b + d).collect();
        for hedge in 0..self.n_hedges {
            let (b, e) = (
                (self.hedge_begin[hedge as usize] + self.n_hedge_weights) as usize,
                self.hedge_begin[hedge as usize + 1] as usize,
            );
            for i in b..e {
                let pin = self.hedge_data[i] as usize;
                node_data[cursor[pin] as usize] = hedge;
                cursor[pin] += 1;
            }
        }
        self.node_begin = node_begin;
        self.node_data = node_data;
    }

    fn finalize_totals(&mut self) {
        self.total_node_weights = (0..self.n_node_weights)
            .map(|dim| {
                (0..self.n_nodes)
                    .map(|node| self.node_weight(node, dim) as i64)
                    .sum()
            })
            .collect();
        self.total_hedge_weights = (0..self.n_hedge_weights)
            .map(|dim| {
                (0..self.n_hedges)
                    .map(|hedge| self.hedge_weight(hedge, dim) as i64)
                    .sum()
            })
            .collect();
    }

    fn hedge_weights(&self, hedge: Index) -> &[Index] {
        let b = self.hedge_begin[hedge as usize] as usize;
        &self.hedge_data[b..b + self.n_hedge_weights as usize]
    }
}

/// Streaming construction of a `Hypergraph`.
///
/// Hyperedges are added one at a time with their weight vector and pin list;
/// node weights default to 1 in every dimension until set explicitly.
/// `finalize` validates the pins, sorts and deduplicates the pin lists,
/// builds the inverse incidence and computes the totals.
#[derive(Debug, Clone)]
pub struct HypergraphBuilder {
    n_nodes: Index,
    n_node_weights: Index,
    n_hedge_weights: Index,
    n_block_weights: Index,
    node_weights: Vec<Index>,
    hedge_weights: Vec<Index>,
    pins: Vec<Index>,
    pin_begin: Vec<Index>,
}

impl HypergraphBuilder {
    /// A builder for a hypergraph with one weight dimension per entity.
    pub fn new(n_nodes: Index) -> Self {
        Self::with_dims(n_nodes, 1, 1, 1)
    }

    /// A builder with explicit weight dimensions.
    pub fn with_dims(
        n_nodes: Index,
        n_node_weights: Index,
        n_hedge_weights: Index,
        n_block_weights: Index,
    ) -> Self {
        Self {
            n_nodes,
            n_node_weights,
            n_hedge_weights,
            n_block_weights,
            node_weights: vec![1; (n_nodes * n_node_weights) as usize],
            hedge_weights: Vec::new(),
            pins: Vec::new(),
            pin_begin: vec![0],
        }
    }

    pub fn n_nodes(&self) -> Index {
        self.n_nodes
    }

    pub fn n_hedges(&self) -> Index {
        self.pin_begin.len() as Index - 1
    }

    /// Appends a hyperedge with the given weight vector and pin list.
    pub fn add_hedge(&mut self, weights: &[Index], pins: &[Index]) -> Result<()> {
        if weights.len() != self.n_hedge_weights as usize {
            return Err(PartitionError::InvalidConfig(format!(
                "hyperedge carries {} weights, expected {}",
                weights.len(),
                self.n_hedge_weights
            )));
        }
        for &pin in pins {
            if pin < 0 || pin >= self.n_nodes {
                return Err(PartitionError::InvalidConfig(format!(
                    "pin {pin} out of range for {} nodes",
                    self.n_nodes
                )));
            }
        }
        self.hedge_weights.extend_from_slice(weights);
        self.pins.extend_from_slice(pins);
        self.pin_begin.push(self.pins.len() as Index);
        Ok(())
    }

    /// Sets the weight vector of a node.
    pub fn set_node_weights(&mut self, node: Index, weights: &[Index]) -> Result<()> {
        if node < 0 || node >= self.n_nodes {
            return Err(PartitionError::InvalidConfig(format!(
                "node {node} out of range for {} nodes",
                self.n_nodes
            )));
        }
        if weights.len() != self.n_node_weights as usize {
            return Err(PartitionError::InvalidConfig(format!(
                "node carries {} weights, expected {}",
                weights.len(),
                self.n_node_weights
            )));
        }
        let b = (node * self.n_node_weights) as usize;
        self.node_weights[b..b + weights.len()].copy_from_slice(weights);
        Ok(())
    }

    /// Finalizes the hypergraph: sorts and deduplicates every pin list,
    /// inverts the incidence and computes totals. Blocks are left empty
    /// until `setup_blocks`.
    pub fn finalize(self) -> Result<Hypergraph> {
        let n_hedges = self.n_hedges();
        let dw = self.n_hedge_weights as usize;

        let mut hedge_begin = Vec::with_capacity(n_hedges as usize + 1);
        let mut hedge_data = Vec::with_capacity(self.hedge_weights.len() + self.pins.len());
        hedge_begin.push(0 as Index);
        let mut scratch = Vec::new();
        for hedge in 0..n_hedges as usize {
            let (b, e) = (
                self.pin_begin[hedge] as usize,
                self.pin_begin[hedge + 1] as usize,
            );
            scratch.clear();
            scratch.extend_from_slice(&self.pins[b..e]);
            scratch.sort_unstable();
            scratch.dedup();
            hedge_data.extend_from_slice(&self.hedge_weights[hedge * dw..(hedge + 1) * dw]);
            hedge_data.extend_from_slice(&scratch);
            hedge_begin.push(hedge_data.len() as Index);
        }

        let mut hypergraph = Hypergraph {
            n_nodes: self.n_nodes,
            n_hedges,
            n_blocks: 0,
            n_pins: 0,
            n_node_weights: self.n_node_weights,
            n_hedge_weights: self.n_hedge_weights,
            n_block_weights: self.n_block_weights,
            node_begin: Vec::new(),
            hedge_begin,
            node_data: Vec::new(),
            hedge_data,
            block_data: Vec::new(),
            total_node_weights: Vec::new(),
            total_hedge_weights: Vec::new(),
            total_block_weights: vec![0; self.n_block_weights as usize],
        };
        hypergraph.rebuild_node_csr(&self.node_weights);
        hypergraph.finalize_totals();
        Ok(hypergraph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Hypergraph {
        let mut builder = HypergraphBuilder::new(3);
        builder.add_hedge(&[1], &[0, 1, 2]).unwrap();
        builder.finalize().unwrap()
    }

    #[test]
    fn builder_produces_consistent_graph() {
        let hg = triangle();
        assert_eq!(hg.n_nodes(), 3);
        assert_eq!(hg.n_hedges(), 1);
        assert_eq!(hg.n_pins(), 3);
        assert_eq!(hg.hedge_pins(0), &[0, 1, 2]);
        assert_eq!(hg.node_hedges(1), &[0]);
        assert_eq!(hg.total_node_weight(0), 3);
        assert_eq!(hg.total_hedge_weight(0), 1);
        hg.check_consistency().unwrap();
    }

    #[test]
    fn pins_are_sorted_and_deduplicated() {
        let mut builder = HypergraphBuilder::new(4);
        builder.add_hedge(&[2], &[3, 1, 3, 0]).unwrap();
        let hg = builder.finalize().unwrap();
        assert_eq!(hg.hedge_pins(0), &[0, 1, 3]);
        assert_eq!(hg.n_pins(), 3);
        hg.check_consistency().unwrap();
    }

    #[test]
    fn out_of_range_pin_is_rejected() {
        let mut builder = HypergraphBuilder::new(2);
        assert!(builder.add_hedge(&[1], &[0, 2]).is_err());
        assert!(builder.add_hedge(&[1], &[-1]).is_err());
    }

    #[test]
    fn setup_blocks_splits_capacity() {
        let mut hg = triangle();
        hg.setup_blocks(2, 0.5).unwrap();
        // Total capacity 4, one half each, block 0 takes the remainder.
        assert_eq!(hg.n_blocks(), 2);
        assert_eq!(hg.block_capacity(0, 0), 2);
        assert_eq!(hg.block_capacity(1, 0), 2);
        assert_eq!(hg.total_block_weight(0), 4);
    }

    #[test]
    fn setup_blocks_remainder_goes_to_block_zero() {
        let mut builder = HypergraphBuilder::new(5);
        builder.add_hedge(&[1], &[0, 4]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.setup_blocks(3, 0.0).unwrap();
        assert_eq!(hg.block_capacity(0, 0), 3);
        assert_eq!(hg.block_capacity(1, 0), 1);
        assert_eq!(hg.block_capacity(2, 0), 1);
    }

    #[test]
    fn setup_blocks_rejects_bad_config() {
        let mut hg = triangle();
        assert!(matches!(
            hg.setup_blocks(0, 0.1),
            Err(PartitionError::InvalidConfig(_))
        ));
        let mut mismatched = HypergraphBuilder::with_dims(3, 1, 1, 2)
            .finalize()
            .unwrap();
        assert!(matches!(
            mismatched.setup_blocks(2, 0.1),
            Err(PartitionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn merge_parallel_hedges_sums_weights() {
        let mut builder = HypergraphBuilder::new(2);
        builder.add_hedge(&[1], &[0, 1]).unwrap();
        builder.add_hedge(&[2], &[0, 1]).unwrap();
        builder.add_hedge(&[3], &[0, 1]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.merge_parallel_hedges();
        assert_eq!(hg.n_hedges(), 1);
        assert_eq!(hg.hedge_weight(0, 0), 6);
        assert_eq!(hg.hedge_pins(0), &[0, 1]);
        hg.check_consistency().unwrap();
    }

    #[test]
    fn merge_keeps_distinct_hedges() {
        let mut builder = HypergraphBuilder::new(3);
        builder.add_hedge(&[1], &[0, 1]).unwrap();
        builder.add_hedge(&[1], &[1, 2]).unwrap();
        builder.add_hedge(&[5], &[0, 1]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.merge_parallel_hedges();
        assert_eq!(hg.n_hedges(), 2);
        assert_eq!(hg.hedge_weight(0, 0), 6);
        assert_eq!(hg.hedge_pins(1), &[1, 2]);
        hg.check_consistency().unwrap();
    }

    #[test]
    fn coarsen_contracts_and_drops_internal_hedges() {
        // Two triangles sharing node 2; contract each triangle to one node.
        let mut builder = HypergraphBuilder::new(5);
        builder.add_hedge(&[1], &[0, 1, 2]).unwrap();
        builder.add_hedge(&[1], &[2, 3, 4]).unwrap();
        builder.add_hedge(&[1], &[0, 1]).unwrap();
        let hg = builder.finalize().unwrap();
        let mapping = Solution::from_parts(vec![0, 0, 0, 1, 1]);
        let coarse = hg.coarsen(&mapping).unwrap();
        assert_eq!(coarse.n_nodes(), 2);
        // Only the bridging hyperedge survives; {0,1,2} and {0,1} collapse.
        assert_eq!(coarse.n_hedges(), 1);
        assert_eq!(coarse.hedge_pins(0), &[0, 1]);
        assert_eq!(coarse.node_weight(0, 0), 3);
        assert_eq!(coarse.node_weight(1, 0), 2);
        assert_eq!(coarse.total_node_weight(0), 5);
        coarse.check_consistency().unwrap();
    }

    #[test]
    fn coarsen_rejects_sparse_labelings() {
        let hg = triangle();
        let mapping = Solution::with_blocks(vec![0, 0, 2], 3);
        assert!(matches!(
            hg.coarsen(&mapping),
            Err(PartitionError::Unrepresentable(_))
        ));
    }

    #[test]
    fn coarsen_preserves_block_setup() {
        let mut hg = triangle();
        hg.setup_blocks(2, 0.5).unwrap();
        let mapping = Solution::from_parts(vec![0, 0, 1]);
        let coarse = hg.coarsen(&mapping).unwrap();
        assert_eq!(coarse.n_blocks(), 2);
        assert_eq!(coarse.block_capacity(1, 0), 2);
    }
}
