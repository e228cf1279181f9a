//! Single-node moves and whole-graph passes.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use minipart_core::Index;
use minipart_scoring::IncrementalObjective;

use super::{got_worse, snapshot, Move};

/// Moves one random node to one random block, rolling back when the
/// objective got worse. Costs 1 per invocation.
pub struct MoveRandomBlock {
    budget: i64,
}

impl MoveRandomBlock {
    pub fn new(budget: i64) -> Self {
        Self { budget }
    }
}

impl Move for MoveRandomBlock {
    fn run(&mut self, inc: &mut IncrementalObjective<'_>, rng: &mut StdRng) {
        debug_assert!(self.budget > 0);
        self.budget -= 1;
        let node = rng.random_range(0..inc.n_nodes());
        let src = inc.solution()[node];
        let dst = rng.random_range(0..inc.n_blocks());

        let before = snapshot(inc);
        inc.move_node(node, dst);
        if got_worse(&before, inc) {
            inc.move_node(node, src);
        }
    }

    fn budget(&self) -> i64 {
        self.budget
    }
}

/// Scans every block for one random node and leaves it in the best one.
/// Costs `n_blocks - 1` per invocation.
pub struct MoveBestBlock {
    budget: i64,
}

impl MoveBestBlock {
    pub fn new(budget: i64) -> Self {
        Self { budget }
    }
}

impl Move for MoveBestBlock {
    fn run(&mut self, inc: &mut IncrementalObjective<'_>, rng: &mut StdRng) {
        debug_assert!(self.budget > 0);
        self.budget -= inc.n_blocks() as i64 - 1;
        let node = rng.random_range(0..inc.n_nodes());
        move_to_best_block(inc, node);
    }

    fn budget(&self) -> i64 {
        self.budget
    }
}

/// One random-block attempt per node, in shuffled order, until the budget
/// is spent.
pub struct PassRandom {
    budget: i64,
    order: Vec<Index>,
}

impl PassRandom {
    pub fn new(budget: i64) -> Self {
        Self {
            budget,
            order: Vec::new(),
        }
    }
}

impl Move for PassRandom {
    fn run(&mut self, inc: &mut IncrementalObjective<'_>, rng: &mut StdRng) {
        debug_assert!(self.budget > 0);
        self.order.clear();
        self.order.extend(0..inc.n_nodes());
        self.order.shuffle(rng);
        for i in 0..self.order.len() {
            if self.budget <= 0 {
                break;
            }
            self.budget -= 1;
            let node = self.order[i];
            let src = inc.solution()[node];
            let dst = rng.random_range(0..inc.n_blocks());
            let before = snapshot(inc);
            inc.move_node(node, dst);
            if got_worse(&before, inc) {
                inc.move_node(node, src);
            }
        }
    }

    fn budget(&self) -> i64 {
        self.budget
    }
}

/// One best-block scan per node, in shuffled order, until the budget is
/// spent.
pub struct PassBest {
    budget: i64,
    order: Vec<Index>,
}

impl PassBest {
    pub fn new(budget: i64) -> Self {
        Self {
            budget,
            order: Vec::new(),
        }
    }
}

impl Move for PassBest {
    fn run(&mut self, inc: &mut IncrementalObjective<'_>, rng: &mut StdRng) {
        debug_assert!(self.budget > 0);
        self.order.clear();
        self.order.extend(0..inc.n_nodes());
        self.order.shuffle(rng);
        for i in 0..self.order.len() {
            if self.budget <= 0 {
                break;
            }
            self.budget -= inc.n_blocks() as i64 - 1;
            move_to_best_block(inc, self.order[i]);
        }
    }

    fn budget(&self) -> i64 {
        self.budget
    }
}

/// Tries every block for `node` and leaves it in the best-scoring one,
/// its current block included.
fn move_to_best_block(inc: &mut IncrementalObjective<'_>, node: Index) {
    let src = inc.solution()[node];
    let mut best_block = src;
    let mut best = snapshot(inc);
    for dst in 0..inc.n_blocks() {
        if dst == src {
            continue;
        }
        inc.move_node(node, dst);
        if inc.objectives() < best.as_slice() {
            best = snapshot(inc);
            best_block = dst;
        }
    }
    inc.move_node(node, best_block);
}

#[cfg(test)]
mod tests {
    use super::*;
    use minipart_core::{HypergraphBuilder, Solution};
    use minipart_scoring::ObjectiveKind;
    use rand::SeedableRng;

    #[test]
    fn best_block_settles_an_obvious_node() {
        // Node 2 belongs with the heavy hyperedge in block 1.
        let mut builder = HypergraphBuilder::new(4);
        builder.add_hedge(&[5], &[2, 3]).unwrap();
        builder.add_hedge(&[1], &[0, 1]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.setup_blocks(2, 1.0).unwrap();
        let mut solution = Solution::with_blocks(vec![0, 0, 0, 1], 2);
        let mut inc = ObjectiveKind::Cut.incremental(&hg, &mut solution);
        move_to_best_block(&mut inc, 2);
        assert_eq!(inc.solution()[2], 1);
        assert_eq!(inc.objectives()[1], 0);
    }

    #[test]
    fn random_moves_never_worsen_the_objective() {
        let mut builder = HypergraphBuilder::new(6);
        builder.add_hedge(&[1], &[0, 1, 2]).unwrap();
        builder.add_hedge(&[2], &[2, 3]).unwrap();
        builder.add_hedge(&[1], &[3, 4, 5]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.setup_blocks(3, 0.5).unwrap();
        let mut solution = Solution::with_blocks(vec![0, 1, 2, 0, 1, 2], 3);
        let mut inc = ObjectiveKind::Soed.incremental(&hg, &mut solution);
        let mut rng = StdRng::seed_from_u64(11);
        let mut mv = MoveRandomBlock::new(100);
        let mut last = snapshot(&inc);
        while mv.budget() > 0 {
            mv.run(&mut inc, &mut rng);
            assert!(inc.objectives() <= last.as_slice());
            last = snapshot(&inc);
        }
        inc.check_consistency().unwrap();
    }
}
