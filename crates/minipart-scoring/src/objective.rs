//! Objective registry.
//!
//! `ObjectiveKind` maps an objective tag to its incremental evaluator
//! factory and to its batch evaluator. The batch evaluator recomputes the
//! same vector from scratch and is used to compare solutions outside the
//! incremental hot loop; the two must agree component for component.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use minipart_core::metrics::{ratio_penalty_from_usage, scaled_ratio};
use minipart_core::{Hypergraph, PartitionError, Solution};

use crate::incremental::{
    IncrementalCut, IncrementalDaisyChainDistance, IncrementalDaisyChainMaxDegree,
    IncrementalMaxDegree, IncrementalObjective, IncrementalRatioCut, IncrementalRatioMaxDegree,
    IncrementalRatioSoed, IncrementalSoed,
};

/// A lexicographically compared objective vector; smaller is better.
pub type ObjectiveVector = SmallVec<[i64; 4]>;

/// The supported optimization objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectiveKind {
    Cut,
    Soed,
    MaxDegree,
    DaisyChainDistance,
    DaisyChainMaxDegree,
    RatioCut,
    RatioSoed,
    RatioMaxDegree,
}

impl ObjectiveKind {
    /// Every objective, in registry order.
    pub const ALL: [ObjectiveKind; 8] = [
        ObjectiveKind::Cut,
        ObjectiveKind::Soed,
        ObjectiveKind::MaxDegree,
        ObjectiveKind::DaisyChainDistance,
        ObjectiveKind::DaisyChainMaxDegree,
        ObjectiveKind::RatioCut,
        ObjectiveKind::RatioSoed,
        ObjectiveKind::RatioMaxDegree,
    ];

    /// Builds the incremental evaluator for this objective over the given
    /// hypergraph and solution.
    pub fn incremental<'a>(
        self,
        hypergraph: &'a Hypergraph,
        solution: &'a mut Solution,
    ) -> IncrementalObjective<'a> {
        match self {
            ObjectiveKind::Cut => {
                IncrementalObjective::Cut(IncrementalCut::new(hypergraph, solution))
            }
            ObjectiveKind::Soed => {
                IncrementalObjective::Soed(IncrementalSoed::new(hypergraph, solution))
            }
            ObjectiveKind::MaxDegree => {
                IncrementalObjective::MaxDegree(IncrementalMaxDegree::new(hypergraph, solution))
            }
            ObjectiveKind::DaisyChainDistance => IncrementalObjective::DaisyChainDistance(
                IncrementalDaisyChainDistance::new(hypergraph, solution),
            ),
            ObjectiveKind::DaisyChainMaxDegree => IncrementalObjective::DaisyChainMaxDegree(
                IncrementalDaisyChainMaxDegree::new(hypergraph, solution),
            ),
            ObjectiveKind::RatioCut => {
                IncrementalObjective::RatioCut(IncrementalRatioCut::new(hypergraph, solution))
            }
            ObjectiveKind::RatioSoed => {
                IncrementalObjective::RatioSoed(IncrementalRatioSoed::new(hypergraph, solution))
            }
            ObjectiveKind::RatioMaxDegree => IncrementalObjective::RatioMaxDegree(
                IncrementalRatioMaxDegree::new(hypergraph, solution),
            ),
        }
    }

    /// Evaluates the objective vector of a solution from scratch.
    pub fn evaluate(self, hypergraph: &Hypergraph, solution: &Solution) -> ObjectiveVector {
        let mut objectives = ObjectiveVector::new();
        match self {
            ObjectiveKind::Cut => {
                objectives.push(hypergraph.sum_overflow(solution));
                objectives.push(hypergraph.cut(solution));
                objectives.push(hypergraph.soed(solution));
            }
            ObjectiveKind::Soed => {
                objectives.push(hypergraph.sum_overflow(solution));
                objectives.push(hypergraph.soed(solution));
            }
            ObjectiveKind::MaxDegree => {
                objectives.push(hypergraph.sum_overflow(solution));
                objectives.push(hypergraph.max_degree(solution));
                objectives.push(hypergraph.soed(solution));
            }
            ObjectiveKind::DaisyChainDistance => {
                objectives.push(hypergraph.sum_overflow(solution));
                objectives.push(hypergraph.daisy_chain_distance(solution));
                objectives.push(hypergraph.soed(solution));
            }
            ObjectiveKind::DaisyChainMaxDegree => {
                objectives.push(hypergraph.sum_overflow(solution));
                objectives.push(hypergraph.daisy_chain_max_degree(solution));
                objectives.push(hypergraph.daisy_chain_distance(solution));
            }
            ObjectiveKind::RatioCut => {
                let penalty = ratio_penalty_from_usage(&hypergraph.block_usage(solution));
                objectives.push(hypergraph.empty_blocks(solution));
                objectives.push(scaled_ratio(hypergraph.cut(solution), penalty));
                objectives.push(hypergraph.cut(solution));
                objectives.push(hypergraph.soed(solution));
            }
            ObjectiveKind::RatioSoed => {
                let penalty = ratio_penalty_from_usage(&hypergraph.block_usage(solution));
                objectives.push(hypergraph.empty_blocks(solution));
                objectives.push(scaled_ratio(hypergraph.soed(solution), penalty));
                objectives.push(hypergraph.soed(solution));
            }
            ObjectiveKind::RatioMaxDegree => {
                let penalty = ratio_penalty_from_usage(&hypergraph.block_usage(solution));
                objectives.push(hypergraph.empty_blocks(solution));
                objectives.push(scaled_ratio(hypergraph.max_degree(solution), penalty));
                objectives.push(hypergraph.soed(solution));
            }
        }
        objectives
    }

    /// The canonical CLI name.
    pub fn name(self) -> &'static str {
        match self {
            ObjectiveKind::Cut => "cut",
            ObjectiveKind::Soed => "soed",
            ObjectiveKind::MaxDegree => "max-degree",
            ObjectiveKind::DaisyChainDistance => "daisy-chain-distance",
            ObjectiveKind::DaisyChainMaxDegree => "daisy-chain-max-degree",
            ObjectiveKind::RatioCut => "ratio-cut",
            ObjectiveKind::RatioSoed => "ratio-soed",
            ObjectiveKind::RatioMaxDegree => "ratio-max-degree",
        }
    }
}

impl fmt::Display for ObjectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectiveKind {
    type Err = PartitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cut" => Ok(ObjectiveKind::Cut),
            "soed" | "connectivity" => Ok(ObjectiveKind::Soed),
            "max-degree" => Ok(ObjectiveKind::MaxDegree),
            "daisy-chain-distance" => Ok(ObjectiveKind::DaisyChainDistance),
            "daisy-chain-max-degree" => Ok(ObjectiveKind::DaisyChainMaxDegree),
            "ratio-cut" => Ok(ObjectiveKind::RatioCut),
            "ratio-soed" | "ratio-connectivity" => Ok(ObjectiveKind::RatioSoed),
            "ratio-max-degree" => Ok(ObjectiveKind::RatioMaxDegree),
            other => Err(PartitionError::InvalidConfig(format!(
                "unknown objective '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names_and_aliases() {
        for kind in ObjectiveKind::ALL {
            assert_eq!(kind.name().parse::<ObjectiveKind>().unwrap(), kind);
        }
        assert_eq!(
            "connectivity".parse::<ObjectiveKind>().unwrap(),
            ObjectiveKind::Soed
        );
        assert_eq!(
            "ratio-connectivity".parse::<ObjectiveKind>().unwrap(),
            ObjectiveKind::RatioSoed
        );
        assert!("modularity".parse::<ObjectiveKind>().is_err());
    }

    #[test]
    fn incremental_construction_matches_batch() {
        use minipart_core::HypergraphBuilder;

        let mut builder = HypergraphBuilder::new(4);
        builder.add_hedge(&[1], &[0, 1, 2]).unwrap();
        builder.add_hedge(&[2], &[2, 3]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.setup_blocks(2, 0.3).unwrap();
        for kind in ObjectiveKind::ALL {
            let mut solution = Solution::with_blocks(vec![0, 1, 0, 1], 2);
            let batch = kind.evaluate(&hg, &solution);
            let inc = kind.incremental(&hg, &mut solution);
            assert_eq!(inc.objectives(), batch.as_slice(), "objective {kind}");
        }
    }
}
