//! End-to-end V-cycle behavior on instances large enough to coarsen.

use rand::rngs::StdRng;
use rand::SeedableRng;

use minipart_core::{Hypergraph, HypergraphBuilder, Solution};
use minipart_scoring::ObjectiveKind;
use minipart_solver::{BlackboxOptimizer, PartitioningParams};

/// A ring of small hyperedges, large enough to trigger coarsening levels.
fn ring_graph(n_nodes: i32) -> Hypergraph {
    let mut builder = HypergraphBuilder::new(n_nodes);
    for node in 0..n_nodes {
        builder
            .add_hedge(&[1], &[node, (node + 1) % n_nodes, (node + 2) % n_nodes])
            .unwrap();
    }
    let mut hg = builder.finalize().unwrap();
    hg.setup_blocks(4, 0.1).unwrap();
    hg
}

fn small_params(objective: ObjectiveKind, seed: u64) -> PartitioningParams {
    PartitioningParams {
        objective,
        seed,
        n_solutions: 4,
        n_cycles: 3,
        min_coarsening_nodes: 4,
        moves_per_element: 2.0,
        ..PartitioningParams::default()
    }
}

#[test]
fn run_produces_a_valid_feasible_solution() {
    let hg = ring_graph(120);
    let params = small_params(ObjectiveKind::Cut, 42);
    let mut rng = StdRng::seed_from_u64(params.seed);
    let best = BlackboxOptimizer::new(&hg, &params).run(&mut rng).unwrap();
    best.check_consistency().unwrap();
    assert_eq!(best.n_nodes(), hg.n_nodes());
    assert_eq!(best.n_blocks(), hg.n_blocks());
    // The slack is 10%; random assignments overflow, refined ones must not.
    assert_eq!(hg.sum_overflow(&best), 0);
}

#[test]
fn identical_seeds_give_identical_solutions() {
    let hg = ring_graph(80);
    for objective in [ObjectiveKind::Cut, ObjectiveKind::RatioSoed] {
        let params = small_params(objective, 7);
        let mut first_rng = StdRng::seed_from_u64(params.seed);
        let mut second_rng = StdRng::seed_from_u64(params.seed);
        let first = BlackboxOptimizer::new(&hg, &params)
            .run(&mut first_rng)
            .unwrap();
        let second = BlackboxOptimizer::new(&hg, &params)
            .run(&mut second_rng)
            .unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn seeded_initial_solution_is_honored_and_never_worsened() {
    let hg = ring_graph(60);
    let params = small_params(ObjectiveKind::Soed, 3);

    // A deliberately good seed: contiguous quarters of the ring.
    let quarters = Solution::with_blocks((0..60).map(|node| node / 15).collect(), 4);
    let seeded_objectives = ObjectiveKind::Soed.evaluate(&hg, &quarters);

    let mut rng = StdRng::seed_from_u64(params.seed);
    let best = BlackboxOptimizer::new(&hg, &params)
        .with_initial(Some(quarters))
        .run(&mut rng)
        .unwrap();
    let best_objectives = ObjectiveKind::Soed.evaluate(&hg, &best);
    assert!(best_objectives <= seeded_objectives);
}

#[test]
fn cycles_never_worsen_the_best_solution() {
    let hg = ring_graph(100);
    let mut previous: Option<Vec<i64>> = None;
    for n_cycles in [1, 2, 4] {
        let params = PartitioningParams {
            n_cycles,
            ..small_params(ObjectiveKind::Cut, 99)
        };
        let mut run_rng = StdRng::seed_from_u64(5);
        let best = BlackboxOptimizer::new(&hg, &params)
            .run(&mut run_rng)
            .unwrap();
        let objectives = ObjectiveKind::Cut.evaluate(&hg, &best).to_vec();
        if let Some(previous) = &previous {
            assert!(objectives <= *previous, "more cycles made the result worse");
        }
        previous = Some(objectives);
    }
}
