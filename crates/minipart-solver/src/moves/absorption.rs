//! Absorption pass: greedy region growth into one block.

use rand::rngs::StdRng;
use rand::Rng;

use minipart_core::Index;
use minipart_scoring::IncrementalObjective;

use super::{got_worse, snapshot, Move, EDGE_DEGREE_CUTOFF, NODE_DEGREE_CUTOFF};

/// Seeds a stack with one random node and keeps pulling nodes into one
/// random destination block. Every accepted move pushes the node's
/// neighbours (through small hyperedges only) onto the stack. Costs 1 per
/// popped node that was attempted.
pub struct AbsorptionPass {
    budget: i64,
    candidates: Vec<Index>,
}

impl AbsorptionPass {
    pub fn new(budget: i64) -> Self {
        Self {
            budget,
            candidates: Vec::new(),
        }
    }
}

impl Move for AbsorptionPass {
    fn run(&mut self, inc: &mut IncrementalObjective<'_>, rng: &mut StdRng) {
        debug_assert!(self.budget > 0);
        let hypergraph = inc.hypergraph();
        let dst = rng.random_range(0..inc.n_blocks());
        self.candidates.clear();
        self.candidates.push(rng.random_range(0..inc.n_nodes()));

        while let Some(node) = self.candidates.pop() {
            if self.budget <= 0 {
                break;
            }
            let src = inc.solution()[node];
            if src == dst {
                continue;
            }
            self.budget -= 1;

            let before = snapshot(inc);
            inc.move_node(node, dst);
            if got_worse(&before, inc) {
                inc.move_node(node, src);
                continue;
            }
            let hedges = hypergraph.node_hedges(node);
            if hedges.len() > NODE_DEGREE_CUTOFF {
                continue;
            }
            for &hedge in hedges {
                let pins = hypergraph.hedge_pins(hedge);
                if pins.len() <= EDGE_DEGREE_CUTOFF {
                    self.candidates.extend_from_slice(pins);
                }
            }
        }
    }

    fn budget(&self) -> i64 {
        self.budget
    }
}
