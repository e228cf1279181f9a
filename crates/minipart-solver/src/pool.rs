//! Solution-pool-induced coarsening.
//!
//! Nodes on which every solution of the pool agrees are frozen into one
//! super-node; only regions of disagreement stay refinable. A node's
//! fingerprint is the tuple of its blocks across the pool; nodes collapse
//! when their fingerprints are equal. Ids are handed out in first-seen
//! order, which yields a contiguous-dense labeling by construction.

use std::hash::Hasher;

use fnv::{FnvHashMap, FnvHasher};

use minipart_core::{Solution, Index};

/// Computes the coarsening map induced by a pool of solutions over the same
/// node set.
///
/// Adding more solutions only refines the result: the number of super-nodes
/// grows monotonically with the pool, and every pool solution stays
/// representable after the contraction.
pub fn compute_coarsening(solutions: &[Solution]) -> Solution {
    debug_assert!(!solutions.is_empty());
    let n_nodes = solutions[0].n_nodes();
    debug_assert!(solutions
        .iter()
        .all(|solution| solution.n_nodes() == n_nodes));

    // Hash buckets of representative nodes; exact equality is checked
    // against every solution.
    let mut buckets: FnvHashMap<u64, Vec<Index>> = FnvHashMap::default();
    let mut labels = vec![0 as Index; n_nodes as usize];
    let mut n_parts = 0 as Index;

    for node in 0..n_nodes {
        let mut hasher = FnvHasher::default();
        for solution in solutions {
            hasher.write_i32(solution[node]);
        }
        let representatives = buckets.entry(hasher.finish()).or_default();
        let known = representatives
            .iter()
            .copied()
            .find(|&rep| solutions.iter().all(|solution| solution[rep] == solution[node]));
        match known {
            Some(rep) => labels[node as usize] = labels[rep as usize],
            None => {
                labels[node as usize] = n_parts;
                n_parts += 1;
                representatives.push(node);
            }
        }
    }
    Solution::with_blocks(labels, n_parts)
}
