//! Whole-hyperedge relocation.

use rand::rngs::StdRng;
use rand::Rng;

use minipart_core::Index;
use minipart_scoring::IncrementalObjective;

use super::{got_worse, snapshot, Move, EDGE_DEGREE_CUTOFF};

/// Tentatively moves every pin of one random hyperedge to one random block,
/// rolling back when the objective got worse. Costs the pin count;
/// oversized hyperedges are skipped at cost 1.
pub struct EdgeMove {
    budget: i64,
    initial_status: Vec<(Index, Index)>,
}

impl EdgeMove {
    pub fn new(budget: i64) -> Self {
        Self {
            budget,
            initial_status: Vec::new(),
        }
    }
}

impl Move for EdgeMove {
    fn run(&mut self, inc: &mut IncrementalObjective<'_>, rng: &mut StdRng) {
        debug_assert!(self.budget > 0);
        let hypergraph = inc.hypergraph();
        let hedge = rng.random_range(0..inc.n_hedges());
        let dst = rng.random_range(0..inc.n_blocks());
        let pins = hypergraph.hedge_pins(hedge);
        if pins.len() > EDGE_DEGREE_CUTOFF {
            self.budget -= 1;
            return;
        }
        self.budget -= pins.len() as i64;

        self.initial_status.clear();
        let before = snapshot(inc);
        for &node in pins {
            let src = inc.solution()[node];
            inc.move_node(node, dst);
            self.initial_status.push((node, src));
        }
        if got_worse(&before, inc) {
            for &(node, src) in &self.initial_status {
                inc.move_node(node, src);
            }
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
    fn edge_move_gathers_a_split_hyperedge() {
        let mut builder = HypergraphBuilder::new(4);
        builder.add_hedge(&[3], &[0, 1, 2, 3]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.setup_blocks(2, 2.0).unwrap();
        let mut solution = Solution::with_blocks(vec![0, 1, 0, 1], 2);
        let mut inc = ObjectiveKind::Soed.incremental(&hg, &mut solution);
        assert_eq!(inc.objectives(), &[0, 6]);

        let mut rng = StdRng::seed_from_u64(5);
        let mut mv = EdgeMove::new(40);
        let mut last = snapshot(&inc);
        while mv.budget() > 0 {
            mv.run(&mut inc, &mut rng);
            assert!(inc.objectives() <= last.as_slice());
            last = snapshot(&inc);
        }
        inc.check_consistency().unwrap();
        // Capacity allows the whole hyperedge in one block.
        assert_eq!(inc.objectives(), &[0, 3]);
    }
}
