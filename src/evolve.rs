//! Population-scale orchestration: bootstrap, offspring generation,
//! mu+lambda survivor selection, and learning-curve logging.

use crate::{
    agent::{Agent, Mode},
    constants::{MENDEL_LEARNING_LOG, MENDEL_MUTATION_PROB},
    genome::{self, Activation, ConfigError},
    reproduce,
    select::{Policy, SelectError},
    stats::{self, LearningRecord},
};
use rand::Rng;
use std::{
    io,
    path::{Path, PathBuf},
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EvolveError {
    #[display("{_0}")]
    Config(ConfigError),
    #[display("{_0}")]
    Select(SelectError),
    #[display("failed to append to the learning log: {_0}")]
    Log(io::Error),
}

/// Run-wide configuration plus the operations advancing one generation.
/// The layer topology and activation are fixed for the lifetime of a run;
/// every agent this controller breeds shares them.
#[derive(Debug, Clone)]
pub struct Evolution {
    mode: Mode,
    layer_sizes: Vec<usize>,
    activation: Activation,
    mutation_prob: f64,
    log_path: PathBuf,
}

impl Evolution {
    pub fn new(layer_sizes: Vec<usize>, activation: Activation) -> Result<Self, ConfigError> {
        genome::validate_layer_sizes(&layer_sizes)?;
        Ok(Self {
            mode: Mode::Neuroevolution,
            layer_sizes,
            activation,
            mutation_prob: MENDEL_MUTATION_PROB,
            log_path: MENDEL_LEARNING_LOG.into(),
        })
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_mutation_prob(mut self, prob: f64) -> Self {
        self.mutation_prob = prob;
        self
    }

    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Bootstrap or breed one generation of `target_size` agents. With no
    /// survivors yet this rolls fresh random genomes. Otherwise each child
    /// comes from two independently drawn parents (possibly the same agent
    /// twice), crossed over and then mutated with probability
    /// `mutation_prob`.
    pub fn generate_new_population(
        &self,
        target_size: usize,
        prev_survivors: &[Agent],
        parent_policy: Policy,
        rng: &mut impl Rng,
    ) -> Result<Vec<Agent>, EvolveError> {
        if prev_survivors.is_empty() {
            return (0..target_size)
                .map(|_| {
                    Agent::random(&self.layer_sizes, self.activation, self.mode, rng)
                        .map_err(EvolveError::from)
                })
                .collect();
        }

        let mut children = Vec::with_capacity(target_size);
        for _ in 0..target_size {
            let p1 = draw_parent(prev_survivors, parent_policy, rng)?;
            let p2 = draw_parent(prev_survivors, parent_policy, rng)?;
            let mut child = reproduce::crossover(p1, p2);
            if rng.random::<f64>() < self.mutation_prob {
                reproduce::mutate(&mut child, rng);
            }
            children.push(child);
        }
        Ok(children)
    }

    /// Survivor selection over the combined pool of previous survivors and
    /// freshly evaluated children. Every agent in `all_players` must
    /// already carry a fitness. The chosen agents come back as independent
    /// clones; when `save_learning_info` is set, their [LearningRecord] is
    /// appended to the log first.
    pub fn next_population_selection(
        &self,
        all_players: &[Agent],
        num_players: usize,
        policy: Policy,
        save_learning_info: bool,
        rng: &mut impl Rng,
    ) -> Result<Vec<Agent>, EvolveError> {
        let survivors: Vec<Agent> = policy
            .select(all_players, num_players, rng)?
            .into_iter()
            .cloned()
            .collect();

        if save_learning_info {
            if let Some(record) = LearningRecord::over(&survivors) {
                stats::append_record(&self.log_path, &record)?;
            }
        }
        Ok(survivors)
    }
}

fn draw_parent<'a>(
    survivors: &'a [Agent],
    policy: Policy,
    rng: &mut impl Rng,
) -> Result<&'a Agent, SelectError> {
    Ok(policy
        .select(survivors, 1, rng)?
        .into_iter()
        .next()
        .expect("selection on a non-empty population yields at least one agent"))
}
