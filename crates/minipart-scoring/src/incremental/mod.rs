//! Incremental objective evaluators.
//!
//! One concrete evaluator per objective, dispatched through the
//! `IncrementalObjective` enum so that the hot `move_node` loop stays
//! monomorphic per variant. Each evaluator exclusively borrows one
//! `Solution` for its whole lifetime and is its only writer.

mod cut;
mod daisy_chain;
mod max_degree;
mod ratio;
mod soed;

pub use cut::IncrementalCut;
pub use daisy_chain::{IncrementalDaisyChainDistance, IncrementalDaisyChainMaxDegree};
pub use max_degree::IncrementalMaxDegree;
pub use ratio::{IncrementalRatioCut, IncrementalRatioMaxDegree, IncrementalRatioSoed};
pub use soed::IncrementalSoed;

use minipart_core::{Hypergraph, PartitionError, Result, Solution};
use minipart_core::Index;

use crate::objective::ObjectiveKind;

/// A tagged union over the eight incremental evaluators.
///
/// `move_node` reassigns one node and updates every derived quantity in
/// O(pins touched); `objectives` exposes the lexicographically compared
/// objective vector (smaller is better).
pub enum IncrementalObjective<'a> {
    Cut(IncrementalCut<'a>),
    Soed(IncrementalSoed<'a>),
    MaxDegree(IncrementalMaxDegree<'a>),
    DaisyChainDistance(IncrementalDaisyChainDistance<'a>),
    DaisyChainMaxDegree(IncrementalDaisyChainMaxDegree<'a>),
    RatioCut(IncrementalRatioCut<'a>),
    RatioSoed(IncrementalRatioSoed<'a>),
    RatioMaxDegree(IncrementalRatioMaxDegree<'a>),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            IncrementalObjective::Cut($inner) => $body,
            IncrementalObjective::Soed($inner) => $body,
            IncrementalObjective::MaxDegree($inner) => $body,
            IncrementalObjective::DaisyChainDistance($inner) => $body,
            IncrementalObjective::DaisyChainMaxDegree($inner) => $body,
            IncrementalObjective::RatioCut($inner) => $body,
            IncrementalObjective::RatioSoed($inner) => $body,
            IncrementalObjective::RatioMaxDegree($inner) => $body,
        }
    };
}

impl<'a> IncrementalObjective<'a> {
    /// Reassigns `node` to block `to`, updating all derived state and the
    /// objective vector. Self-moves are no-ops.
    pub fn move_node(&mut self, node: Index, to: Index) {
        dispatch!(self, inner => inner.move_node(node, to))
    }

    /// The current objective vector, compared lexicographically.
    pub fn objectives(&self) -> &[i64] {
        dispatch!(self, inner => inner.objectives())
    }

    pub fn solution(&self) -> &Solution {
        dispatch!(self, inner => inner.state().solution())
    }

    pub fn hypergraph(&self) -> &'a Hypergraph {
        dispatch!(self, inner => inner.state().hypergraph())
    }

    pub fn n_nodes(&self) -> Index {
        self.hypergraph().n_nodes()
    }

    pub fn n_hedges(&self) -> Index {
        self.hypergraph().n_hedges()
    }

    pub fn n_blocks(&self) -> Index {
        self.hypergraph().n_blocks()
    }

    /// The registry tag of this evaluator.
    pub fn kind(&self) -> ObjectiveKind {
        match self {
            IncrementalObjective::Cut(_) => ObjectiveKind::Cut,
            IncrementalObjective::Soed(_) => ObjectiveKind::Soed,
            IncrementalObjective::MaxDegree(_) => ObjectiveKind::MaxDegree,
            IncrementalObjective::DaisyChainDistance(_) => ObjectiveKind::DaisyChainDistance,
            IncrementalObjective::DaisyChainMaxDegree(_) => ObjectiveKind::DaisyChainMaxDegree,
            IncrementalObjective::RatioCut(_) => ObjectiveKind::RatioCut,
            IncrementalObjective::RatioSoed(_) => ObjectiveKind::RatioSoed,
            IncrementalObjective::RatioMaxDegree(_) => ObjectiveKind::RatioMaxDegree,
        }
    }

    /// Recomputes every maintained quantity from scratch and compares with
    /// the incremental state, including the objective vector against the
    /// batch evaluator.
    ///
    /// # Errors
    ///
    /// `Inconsistency` on any drift; this always indicates a bug.
    pub fn check_consistency(&self) -> Result<()> {
        dispatch!(self, inner => inner.check_consistency())?;
        let batch = self.kind().evaluate(self.hypergraph(), self.solution());
        if batch.as_slice() != self.objectives() {
            return Err(PartitionError::Inconsistency(format!(
                "objective vector drifted: maintained {:?}, batch {:?}",
                self.objectives(),
                batch.as_slice()
            )));
        }
        Ok(())
    }
}
