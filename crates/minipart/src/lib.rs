//! Minipart - A balanced hypergraph partitioner
//!
//! Given a hypergraph with weighted nodes and weighted hyperedges, a number
//! of blocks and per-block capacities, minipart assigns every node to one
//! block so that the chosen objective is minimized under the capacity
//! constraints. The engine is a pool-based multilevel V-cycle: local search
//! alternates with solution-induced coarsening, and everything is
//! deterministic for a given seed.
//!
//! # Quick Start
//!
//! ```
//! use minipart::{BlackboxOptimizer, HypergraphBuilder, ObjectiveKind, PartitioningParams};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut builder = HypergraphBuilder::new(3);
//! builder.add_hedge(&[1], &[0, 1, 2]).unwrap();
//! let mut hypergraph = builder.finalize().unwrap();
//! hypergraph.setup_blocks(2, 0.5).unwrap();
//!
//! let params = PartitioningParams {
//!     objective: ObjectiveKind::Cut,
//!     ..PartitioningParams::default()
//! };
//! let mut rng = StdRng::seed_from_u64(params.seed);
//! let best = BlackboxOptimizer::new(&hypergraph, &params)
//!     .run(&mut rng)
//!     .unwrap();
//! assert_eq!(best.n_nodes(), 3);
//! ```

pub use minipart_core::{
    Hypergraph, HypergraphBuilder, Index, PartitionError, Result, Solution,
};
pub use minipart_io::{
    read_hgr, read_hgr_file, read_solution, read_solution_file, write_hgr, write_hgr_file,
    write_solution, write_solution_file,
};
pub use minipart_scoring::{IncrementalObjective, ObjectiveKind, ObjectiveVector};
pub use minipart_solver::{
    compute_coarsening, BlackboxOptimizer, LocalSearchOptimizer, PartitioningParams,
};
