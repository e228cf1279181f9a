//! Budget-weighted local search.

use rand::rngs::StdRng;
use rand::Rng;

use minipart_scoring::IncrementalObjective;
use tracing::trace;

use crate::moves::{AbsorptionPass, EdgeMove, Move, MoveRandomBlock, Swap};
use crate::params::PartitioningParams;

/// Dispatches a weighted mixture of moves over one incremental evaluator.
///
/// Every move starts with a fraction of the total budget
/// `moves_per_element * n_nodes * (n_blocks - 1)` and pays for its own
/// work; moves are drawn with probability proportional to their remaining
/// budget, and the search ends once every budget is spent.
pub struct LocalSearchOptimizer<'i, 'a> {
    inc: &'i mut IncrementalObjective<'a>,
    rng: &'i mut StdRng,
    moves: Vec<Box<dyn Move>>,
}

impl<'i, 'a> LocalSearchOptimizer<'i, 'a> {
    pub fn new(
        inc: &'i mut IncrementalObjective<'a>,
        params: &PartitioningParams,
        rng: &'i mut StdRng,
    ) -> Self {
        let target = params.move_budget(inc.n_nodes(), inc.n_blocks()) as f64;
        let moves: Vec<Box<dyn Move>> = vec![
            Box::new(MoveRandomBlock::new((0.1 * target) as i64)),
            Box::new(Swap::new((0.1 * target) as i64)),
            Box::new(EdgeMove::new((0.1 * target) as i64)),
            Box::new(AbsorptionPass::new((0.7 * target) as i64)),
        ];
        Self { inc, rng, moves }
    }

    /// Runs moves until the whole budget is spent.
    pub fn run(&mut self) {
        loop {
            let total = self.total_budget();
            if total <= 0 {
                break;
            }
            self.dispatch(total);
        }
        trace!(
            event = "local_search_done",
            objectives = ?self.inc.objectives(),
        );
    }

    fn total_budget(&self) -> i64 {
        self.moves
            .iter()
            .map(|mv| mv.budget().max(0))
            .sum()
    }

    /// Picks one move, weighted by remaining budget, and runs it.
    fn dispatch(&mut self, total: i64) {
        let roll = self.rng.random_range(0..total);
        let mut cumulative = 0;
        for mv in &mut self.moves {
            cumulative += mv.budget().max(0);
            if cumulative > roll {
                mv.run(self.inc, self.rng);
                return;
            }
        }
        unreachable!("budget roll out of range");
    }
}
