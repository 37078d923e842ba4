//! The boundary to the external game harness: a [Scenario] scores agents,
//! and the provided driving loop advances generations until a target is
//! met. Termination is always the driver's call, never the engine's.

use crate::{
    agent::Agent,
    evolve::{Evolution, EvolveError},
    select::Policy,
};
use core::cmp::Ordering;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// When the driving loop should stop: a fitness bar some survivor clears,
/// or a fixed number of generations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvolutionTarget {
    Fitness(f64),
    Generation(usize),
}

impl EvolutionTarget {
    fn satisfied(&self, survivors: &[Agent], generation: usize) -> bool {
        match self {
            Self::Fitness(bar) => survivors.iter().any(|a| a.fitness() >= *bar),
            Self::Generation(count) => *count <= generation,
        }
    }
}

/// Observer called once per generation with the just-selected survivors.
pub type Hook<'a> = dyn FnMut(usize, &[Agent]) + 'a;

pub trait Scenario: Sync {
    /// Sensory and action widths the run's topology must begin and end
    /// with.
    fn io() -> (usize, usize)
    where
        Self: Sized;

    /// Score one agent by running it through the game. Called exactly once
    /// per fresh child, before that child faces survivor selection.
    fn eval(&self, agent: &Agent) -> f64;

    /// Bootstrap, then evaluate, select survivors, and breed offspring,
    /// once per generation until `target` is satisfied. Survivors come
    /// back sorted fittest-first.
    #[allow(clippy::too_many_arguments)]
    fn evolve(
        &self,
        evolution: &Evolution,
        target: EvolutionTarget,
        population_lim: usize,
        parent_policy: Policy,
        survivor_policy: Policy,
        save_learning_info: bool,
        hook: &mut Hook,
        rng: &mut impl Rng,
    ) -> Result<Vec<Agent>, EvolveError> {
        let mut survivors: Vec<Agent> = Vec::new();
        let mut gen_idx = 0;
        loop {
            let mut pool = evolution.generate_new_population(
                population_lim,
                &survivors,
                parent_policy,
                rng,
            )?;
            self.eval_all(&mut pool);
            pool.append(&mut survivors);

            survivors = evolution.next_population_selection(
                &pool,
                population_lim,
                survivor_policy,
                save_learning_info,
                rng,
            )?;
            hook(gen_idx, &survivors);

            if target.satisfied(&survivors, gen_idx) {
                survivors.sort_by(|l, r| {
                    r.fitness().partial_cmp(&l.fitness()).unwrap_or(Ordering::Equal)
                });
                break Ok(survivors);
            }
            gen_idx += 1;
        }
    }

    /// Score a batch of fresh children. Each agent's fitness is written
    /// exactly once, so the parallel path needs no synchronization.
    #[cfg(not(feature = "parallel"))]
    fn eval_all(&self, agents: &mut [Agent]) {
        for agent in agents {
            let fitness = self.eval(agent);
            agent.set_fitness(fitness);
        }
    }

    #[cfg(feature = "parallel")]
    fn eval_all(&self, agents: &mut [Agent]) {
        agents.par_iter_mut().for_each(|agent| {
            let fitness = self.eval(agent);
            agent.set_fitness(fitness);
        });
    }
}

/// Reference scenario: score a network on the four XOR rows with a
/// quadratic decay loss. Fitness lands in `[0, 100]`, so every selection
/// policy applies, roulette included.
pub struct GameXOR;

const XOR_ROWS: [([f64; 2], f64); 4] = [
    ([0., 0.], 0.),
    ([0., 1.], 1.),
    ([1., 0.], 1.),
    ([1., 1.], 0.),
];

impl Scenario for GameXOR {
    fn io() -> (usize, usize) {
        (2, 1)
    }

    fn eval(&self, agent: &Agent) -> f64 {
        XOR_ROWS
            .iter()
            .map(|(input, want)| {
                let out = agent.genome().forward(input)[0];
                25. * (1. - (want - out).powi(2))
            })
            .sum()
    }
}
