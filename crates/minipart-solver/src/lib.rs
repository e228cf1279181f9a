//! Minipart Solver - Pool-based multilevel optimization
//!
//! This crate drives the search:
//! - A library of randomized moves over an `IncrementalObjective`
//! - `LocalSearchOptimizer`: a budget-weighted random dispatcher over moves
//! - Solution-pool-induced coarsening
//! - `BlackboxOptimizer`: the recursive V-cycle over a pool of solutions
//!
//! Everything is single-threaded and deterministic given a seed; the random
//! generator is seeded once and passed by mutable reference through every
//! stochastic routine.

pub mod blackbox;
pub mod local_search;
pub mod moves;
pub mod params;
pub mod pool;

pub use blackbox::BlackboxOptimizer;
pub use local_search::LocalSearchOptimizer;
pub use params::PartitioningParams;
pub use pool::compute_coarsening;
