//! Pool-based multilevel V-cycle.
//!
//! The optimizer owns a pool of candidate solutions. Each cycle shuffles the
//! pool, derives candidate coarsenings from pool prefixes, picks the one
//! whose reduction factor fits the configured window best, projects the
//! prefix into the coarse hypergraph, recurses, and refines the uncoarsened
//! solutions with local search. Regions where the pool agrees are frozen;
//! regions of disagreement stay open for refinement.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use minipart_core::{Hypergraph, PartitionError, Result, Solution};
use minipart_scoring::ObjectiveVector;

use crate::local_search::LocalSearchOptimizer;
use crate::params::PartitioningParams;
use crate::pool::compute_coarsening;

/// Multilevel solver over one hypergraph.
pub struct BlackboxOptimizer<'a> {
    hypergraph: &'a Hypergraph,
    params: &'a PartitioningParams,
    initial: Option<Solution>,
}

impl<'a> BlackboxOptimizer<'a> {
    pub fn new(hypergraph: &'a Hypergraph, params: &'a PartitioningParams) -> Self {
        Self {
            hypergraph,
            params,
            initial: None,
        }
    }

    /// Seeds pool slot 0 with a known solution instead of a random one.
    pub fn with_initial(mut self, initial: Option<Solution>) -> Self {
        self.initial = initial;
        self
    }

    /// Runs the full optimization and returns the best pool member.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when blocks were never set up, the pool is empty, or
    /// the seeded initial solution does not match the hypergraph.
    pub fn run(&self, rng: &mut StdRng) -> Result<Solution> {
        if self.hypergraph.n_blocks() < 1 {
            return Err(PartitionError::InvalidConfig(
                "hypergraph has no blocks; call setup_blocks first".to_string(),
            ));
        }
        if self.params.n_solutions < 1 {
            return Err(PartitionError::InvalidConfig(
                "solution pool must hold at least one solution".to_string(),
            ));
        }

        info!(
            event = "run_start",
            n_nodes = self.hypergraph.n_nodes(),
            n_hedges = self.hypergraph.n_hedges(),
            n_pins = self.hypergraph.n_pins(),
            n_blocks = self.hypergraph.n_blocks(),
            objective = %self.params.objective,
            pool_size = self.params.n_solutions,
        );

        let mut pool = self.run_initial_placement(rng)?;
        for solution in pool.iter_mut() {
            self.run_local_search(self.hypergraph, solution, rng);
        }

        for cycle in 0..self.params.n_cycles {
            self.run_v_cycle(self.hypergraph, &mut pool, rng, 0)?;
            debug!(
                event = "cycle_done",
                cycle,
                best = ?self.best_objectives(&pool),
            );
        }

        let best = self.pick_best(&pool);
        info!(
            event = "run_done",
            objectives = ?self.params.objective.evaluate(self.hypergraph, best).as_slice(),
        );
        Ok(best.clone())
    }

    /// Fills the pool with independent uniform-random assignments; slot 0
    /// takes the seeded initial solution when one was provided.
    fn run_initial_placement(&self, rng: &mut StdRng) -> Result<Vec<Solution>> {
        let n_nodes = self.hypergraph.n_nodes();
        let n_blocks = self.hypergraph.n_blocks();
        let mut pool = Vec::with_capacity(self.params.n_solutions);
        for _ in 0..self.params.n_solutions {
            let mut solution = Solution::new(n_nodes, n_blocks);
            for node in 0..n_nodes {
                solution[node] = rng.random_range(0..n_blocks);
            }
            pool.push(solution);
        }
        if let Some(initial) = &self.initial {
            if initial.n_nodes() != n_nodes || initial.n_blocks() != n_blocks {
                return Err(PartitionError::InvalidConfig(format!(
                    "initial solution covers {} nodes over {} blocks, expected {} over {}",
                    initial.n_nodes(),
                    initial.n_blocks(),
                    n_nodes,
                    n_blocks
                )));
            }
            initial.check_consistency()?;
            pool[0] = initial.clone();
        }
        Ok(pool)
    }

    fn run_local_search(&self, hypergraph: &Hypergraph, solution: &mut Solution, rng: &mut StdRng) {
        let mut inc = self.params.objective.incremental(hypergraph, solution);
        LocalSearchOptimizer::new(&mut inc, self.params, rng).run();
    }

    /// One V-cycle step at the given recursion level.
    fn run_v_cycle(
        &self,
        hypergraph: &Hypergraph,
        pool: &mut [Solution],
        rng: &mut StdRng,
        level: usize,
    ) -> Result<()> {
        // Small enough to search directly.
        if (hypergraph.n_nodes() as i64)
            < self.params.min_coarsening_nodes as i64 * hypergraph.n_blocks() as i64
        {
            self.refine_pool(hypergraph, pool, rng);
            return Ok(());
        }

        pool.shuffle(rng);

        // Candidate coarsenings from pool prefixes. Preferring the factor
        // closest to the window midpoint realizes all three preference
        // rules: factors inside the window always beat factors outside it.
        let midpoint =
            (self.params.min_coarsening_factor + self.params.max_coarsening_factor) / 2.0;
        let mut best: Option<(usize, f64, Solution)> = None;
        for prefix in 1..=pool.len() {
            let coarsening = compute_coarsening(&pool[..prefix]);
            let factor = hypergraph.n_nodes() as f64 / coarsening.n_blocks() as f64;
            let better = match &best {
                Some((_, best_factor, _)) => {
                    (factor - midpoint).abs() < (best_factor - midpoint).abs()
                }
                None => true,
            };
            if better {
                best = Some((prefix, factor, coarsening));
            }
        }
        let (prefix, factor, coarsening) = best.ok_or_else(|| {
            PartitionError::InvalidConfig("empty solution pool in V-cycle".to_string())
        })?;

        // Not enough compression left; refine at this level instead.
        if factor < self.params.min_coarsening_factor {
            self.refine_pool(hypergraph, pool, rng);
            return Ok(());
        }

        debug!(
            event = "coarsen",
            level,
            n_nodes = hypergraph.n_nodes(),
            coarse_nodes = coarsening.n_blocks(),
            factor,
            prefix,
        );

        let coarse_hypergraph = hypergraph.coarsen(&coarsening)?;
        let mut coarse_pool = pool[..prefix]
            .iter()
            .map(|solution| solution.coarsen(&coarsening))
            .collect::<Result<Vec<Solution>>>()?;
        self.run_v_cycle(&coarse_hypergraph, &mut coarse_pool, rng, level + 1)?;
        for (slot, coarse) in pool[..prefix].iter_mut().zip(coarse_pool) {
            *slot = coarse.uncoarsen(&coarsening);
            self.run_local_search(hypergraph, slot, rng);
        }

        #[cfg(debug_assertions)]
        for solution in pool.iter() {
            solution.check_consistency()?;
            debug_assert_eq!(solution.n_nodes(), hypergraph.n_nodes());
        }
        Ok(())
    }

    fn refine_pool(&self, hypergraph: &Hypergraph, pool: &mut [Solution], rng: &mut StdRng) {
        for solution in pool.iter_mut() {
            self.run_local_search(hypergraph, solution, rng);
        }
    }

    fn pick_best<'p>(&self, pool: &'p [Solution]) -> &'p Solution {
        let mut best = &pool[0];
        let mut best_objectives = self.params.objective.evaluate(self.hypergraph, best);
        for solution in &pool[1..] {
            let objectives = self.params.objective.evaluate(self.hypergraph, solution);
            if objectives < best_objectives {
                best = solution;
                best_objectives = objectives;
            }
        }
        best
    }

    fn best_objectives(&self, pool: &[Solution]) -> ObjectiveVector {
        self.params
            .objective
            .evaluate(self.hypergraph, self.pick_best(pool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minipart_core::HypergraphBuilder;
    use minipart_scoring::ObjectiveKind;
    use rand::SeedableRng;

    #[test]
    fn rejects_missing_block_setup() {
        let mut builder = HypergraphBuilder::new(3);
        builder.add_hedge(&[1], &[0, 1, 2]).unwrap();
        let hg = builder.finalize().unwrap();
        let params = PartitioningParams::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            BlackboxOptimizer::new(&hg, &params).run(&mut rng),
            Err(PartitionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_mismatched_initial_solution() {
        let mut builder = HypergraphBuilder::new(3);
        builder.add_hedge(&[1], &[0, 1, 2]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.setup_blocks(2, 0.5).unwrap();
        let params = PartitioningParams::default();
        let mut rng = StdRng::seed_from_u64(0);
        let wrong = Solution::new(5, 2);
        assert!(BlackboxOptimizer::new(&hg, &params)
            .with_initial(Some(wrong))
            .run(&mut rng)
            .is_err());
    }

    #[test]
    fn trivial_two_block_instance_reaches_the_optimum() {
        let mut builder = HypergraphBuilder::new(3);
        builder.add_hedge(&[1], &[0, 1, 2]).unwrap();
        let mut hg = builder.finalize().unwrap();
        hg.setup_blocks(2, 0.5).unwrap();
        let params = PartitioningParams {
            objective: ObjectiveKind::Cut,
            n_solutions: 4,
            n_cycles: 2,
            ..PartitioningParams::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let best = BlackboxOptimizer::new(&hg, &params).run(&mut rng).unwrap();
        // Capacities (2, 2): the hyperedge must be cut, soed 2, no overflow.
        assert_eq!(
            ObjectiveKind::Cut.evaluate(&hg, &best).as_slice(),
            &[0, 1, 2]
        );
    }
}
