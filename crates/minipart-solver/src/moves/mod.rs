//! Randomized neighborhood moves.
//!
//! Each move reads the current incremental evaluator, proposes a change and
//! either keeps it (when the objective vector did not get lexicographically
//! worse) or rolls it back by replaying the reverse reassignments. Every
//! move carries a budget of remaining attempts and decrements it by roughly
//! the number of single-node reassignments one invocation costs.

mod absorption;
mod edge;
mod node;
mod swap;

pub use absorption::AbsorptionPass;
pub use edge::EdgeMove;
pub use node::{MoveBestBlock, MoveRandomBlock, PassBest, PassRandom};
pub use swap::Swap;

use rand::rngs::StdRng;

use minipart_scoring::{IncrementalObjective, ObjectiveVector};

/// Hyperedges with more pins than this are too spread out to move wholesale
/// or to traverse during absorption.
pub const EDGE_DEGREE_CUTOFF: usize = 10;

/// Nodes incident to more hyperedges than this do not propagate absorption.
pub const NODE_DEGREE_CUTOFF: usize = 10;

/// A budgeted randomized transformation of the current solution.
pub trait Move {
    fn run(&mut self, inc: &mut IncrementalObjective<'_>, rng: &mut StdRng);

    /// Remaining attempts; the scheduler stops dispatching to a move once
    /// this reaches zero.
    fn budget(&self) -> i64;
}

/// Copies the current objective vector for a later comparison.
pub(crate) fn snapshot(inc: &IncrementalObjective<'_>) -> ObjectiveVector {
    ObjectiveVector::from_slice(inc.objectives())
}

/// True when the evaluator's current vector is strictly worse than `before`.
pub(crate) fn got_worse(before: &ObjectiveVector, inc: &IncrementalObjective<'_>) -> bool {
    before.as_slice() < inc.objectives()
}
