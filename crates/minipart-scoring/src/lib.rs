//! Minipart Scoring - Incremental objective evaluation
//!
//! This crate provides the hot loop of the partitioner:
//! - `IncrementalObjective`: a tagged union of evaluators that maintain all
//!   derived partition state in O(pins touched) per node reassignment
//! - `ObjectiveKind`: the registry mapping an objective tag to its
//!   incremental evaluator and its batch evaluator
//!
//! Objective values are small lexicographically compared `i64` vectors;
//! a strictly smaller vector is a strictly better solution.

pub mod incremental;
pub mod objective;

mod state;

pub use incremental::{
    IncrementalCut, IncrementalDaisyChainDistance, IncrementalDaisyChainMaxDegree,
    IncrementalMaxDegree, IncrementalObjective, IncrementalRatioCut, IncrementalRatioMaxDegree,
    IncrementalRatioSoed, IncrementalSoed,
};
pub use objective::{ObjectiveKind, ObjectiveVector};
