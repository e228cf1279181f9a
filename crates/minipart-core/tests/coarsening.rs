//! Cross-module coarsening properties.

use minipart_core::{Hypergraph, HypergraphBuilder, Solution};

/// 8 nodes, 6 hyperedges, mixed weights, no parallel hyperedges.
fn sample_graph() -> Hypergraph {
    let mut builder = HypergraphBuilder::new(8);
    builder.add_hedge(&[1], &[0, 1, 2]).unwrap();
    builder.add_hedge(&[2], &[2, 3]).unwrap();
    builder.add_hedge(&[1], &[3, 4, 5]).unwrap();
    builder.add_hedge(&[3], &[5, 6]).unwrap();
    builder.add_hedge(&[1], &[6, 7, 0]).unwrap();
    builder.add_hedge(&[2], &[1, 4, 7]).unwrap();
    for node in 0..8 {
        builder.set_node_weights(node, &[node + 1]).unwrap();
    }
    builder.finalize().unwrap()
}

#[test]
fn identity_coarsening_preserves_everything() {
    let hg = sample_graph();
    let identity = Solution::from_parts((0..8).collect());
    let coarse = hg.coarsen(&identity).unwrap();

    assert_eq!(coarse.n_nodes(), hg.n_nodes());
    assert_eq!(coarse.n_hedges(), hg.n_hedges());
    assert_eq!(coarse.n_pins(), hg.n_pins());
    assert_eq!(coarse.total_node_weight(0), hg.total_node_weight(0));
    assert_eq!(coarse.total_hedge_weight(0), hg.total_hedge_weight(0));
    for hedge in 0..hg.n_hedges() {
        assert_eq!(coarse.hedge_pins(hedge), hg.hedge_pins(hedge));
        assert_eq!(coarse.hedge_weight(hedge, 0), hg.hedge_weight(hedge, 0));
    }
    for node in 0..hg.n_nodes() {
        assert_eq!(coarse.node_weight(node, 0), hg.node_weight(node, 0));
    }
    coarse.check_consistency().unwrap();
}

#[test]
fn coarsening_preserves_node_weight_totals() {
    let hg = sample_graph();
    let mapping = Solution::from_parts(vec![0, 0, 1, 1, 2, 2, 3, 3]);
    let coarse = hg.coarsen(&mapping).unwrap();
    assert_eq!(coarse.n_nodes(), 4);
    assert_eq!(coarse.total_node_weight(0), hg.total_node_weight(0));
    coarse.check_consistency().unwrap();
}

#[test]
fn solution_round_trip_through_coarsening() {
    let solution = Solution::with_blocks(vec![0, 0, 1, 1, 0, 0, 1, 1], 2);
    let mapping = Solution::from_parts(vec![0, 0, 1, 1, 2, 2, 3, 3]);
    let coarse = solution.coarsen(&mapping).unwrap();
    assert_eq!(coarse.as_slice(), &[0, 1, 0, 1]);
    assert_eq!(coarse.uncoarsen(&mapping), solution);
}

#[test]
fn metrics_survive_identity_coarsening() {
    let mut hg = sample_graph();
    hg.setup_blocks(2, 0.2).unwrap();
    let identity = Solution::from_parts((0..8).collect());
    let coarse = hg.coarsen(&identity).unwrap();
    let solution = Solution::with_blocks(vec![0, 1, 0, 1, 0, 1, 0, 1], 2);
    assert_eq!(coarse.cut(&solution), hg.cut(&solution));
    assert_eq!(coarse.soed(&solution), hg.soed(&solution));
    assert_eq!(coarse.sum_overflow(&solution), hg.sum_overflow(&solution));
    assert_eq!(
        coarse.daisy_chain_distance(&solution),
        hg.daisy_chain_distance(&solution)
    );
}
