//! Block exchange between two nodes.

use rand::rngs::StdRng;
use rand::Rng;

use minipart_scoring::IncrementalObjective;

use super::{got_worse, snapshot, Move};

/// Picks two random nodes in different blocks and exchanges their blocks,
/// rolling back when the objective got worse. Costs 1 per invocation.
pub struct Swap {
    budget: i64,
}

impl Swap {
    pub fn new(budget: i64) -> Self {
        Self { budget }
    }
}

impl Move for Swap {
    fn run(&mut self, inc: &mut IncrementalObjective<'_>, rng: &mut StdRng) {
        debug_assert!(self.budget > 0);
        self.budget -= 1;
        let n1 = rng.random_range(0..inc.n_nodes());
        let n2 = rng.random_range(0..inc.n_nodes());
        let p1 = inc.solution()[n1];
        let p2 = inc.solution()[n2];
        if p1 == p2 {
            return;
        }

        let before = snapshot(inc);
        inc.move_node(n1, p2);
        inc.move_node(n2, p1);
        if got_worse(&before, inc) {
            inc.move_node(n1, p1);
            inc.move_node(n2, p2);
        }
    }

    fn budget(&self) -> i64 {
        self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minipart_core::{HypergraphBuilder, Solution};
    use minipart_scoring::ObjectiveKind;
    use rand::SeedableRng;

    #[test]
    fn swap_exchanges_two_distinct_nodes() {
        // Interleaved assignment over two disjoint hyperedges: any of the
        // improving swaps untangles it to a zero-cut solution, and a swap
        // that reads the same node twice never would.
        let mut builder = HypergraphBuilder::new(4);
        builder.add_hedge(&[1], &[0, 1]).unwrap();
        builder.add_hedge(&[1], &[2, 3]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.setup_blocks(2, 0.5).unwrap();
        let mut solution = Solution::with_blocks(vec![0, 1, 0, 1], 2);
        let mut inc = ObjectiveKind::Cut.incremental(&hg, &mut solution);
        assert_eq!(inc.objectives()[1], 2);

        let mut rng = StdRng::seed_from_u64(3);
        let mut swap = Swap::new(200);
        while swap.budget() > 0 {
            swap.run(&mut inc, &mut rng);
        }
        inc.check_consistency().unwrap();
        assert_eq!(inc.objectives()[1], 0);
        // Balance is preserved: swaps never change block usage.
        assert_eq!(inc.objectives()[0], 0);
    }
}
