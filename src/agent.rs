//! The unit of selection: one genome plus its fitness score and mode tag.

use crate::genome::{Activation, ConfigError, Genome};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fitness of an agent no evaluator has scored yet.
pub const UNSCORED: f64 = f64::MIN;

/// Which harness the agent was bred for. Bookkeeping only, nothing in the
/// engine branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Neuroevolution,
    Manual,
}

/// An agent exclusively owns its genome: `Clone` deep-copies it, and the
/// reproduction operators only ever mutate freshly cloned genomes, so no
/// two agents can share genetic material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    genome: Genome,
    fitness: f64,
    mode: Mode,
}

impl Agent {
    /// An agent with a freshly rolled genome and no fitness yet.
    pub fn random(
        layer_sizes: &[usize],
        activation: Activation,
        mode: Mode,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            genome: Genome::new(layer_sizes, activation, rng)?,
            fitness: UNSCORED,
            mode,
        })
    }

    pub fn from_genome(genome: Genome, mode: Mode) -> Self {
        Self {
            genome,
            fitness: UNSCORED,
            mode,
        }
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn genome_mut(&mut self) -> &mut Genome {
        &mut self.genome
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Whether an evaluator has assigned this agent a fitness.
    pub fn scored(&self) -> bool {
        self.fitness != UNSCORED
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use rulinalg::matrix::{BaseMatrix, BaseMatrixMut};

    #[test]
    fn test_random_agent_is_unscored() {
        let mut rng = StdRng::seed_from_u64(10);
        let agent =
            Agent::random(&[2, 3, 1], Activation::Sigmoid, Mode::Neuroevolution, &mut rng)
                .unwrap();
        assert!(!agent.scored());
        assert_eq!(agent.fitness(), UNSCORED);
        assert_eq!(agent.mode(), Mode::Neuroevolution);
    }

    #[test]
    fn test_clone_keeps_score_and_mode() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut agent =
            Agent::random(&[2, 3, 1], Activation::Sigmoid, Mode::Manual, &mut rng).unwrap();
        agent.set_fitness(7.5);

        let copy = agent.clone();
        assert_eq!(copy.fitness(), 7.5);
        assert_eq!(copy.mode(), Mode::Manual);
    }

    #[test]
    fn test_clone_owns_its_genome() {
        let mut rng = StdRng::seed_from_u64(12);
        let agent =
            Agent::random(&[2, 3, 1], Activation::Sigmoid, Mode::Neuroevolution, &mut rng)
                .unwrap();
        let before = agent.genome().weights()[0].data().clone();

        let mut copy = agent.clone();
        for v in copy.genome_mut().weights_mut()[0].mut_data() {
            *v += 100.;
        }

        assert_eq!(agent.genome().weights()[0].data(), &before);
    }
}
