//! The four parent/survivor selection policies. Every policy draws from
//! the population with repetition allowed across draws and returns
//! references; callers clone the chosen agents when they need ownership.

use crate::{agent::Agent, constants::MENDEL_TOURNAMENT_SIZE};
use core::cmp::Ordering;
use rand::{seq::IndexedRandom, Rng};

/// Closed set of selection strategies, dispatched through [Policy::select].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Random,
    TopK,
    Roulette,
    Tournament { size: usize },
}

impl Policy {
    /// Tournament selection with the default draw size.
    pub fn tournament() -> Self {
        Self::Tournament {
            size: MENDEL_TOURNAMENT_SIZE,
        }
    }

    /// Select `count` agents under this policy. Only [Policy::TopK] may
    /// return fewer than `count`, when the population is smaller than that.
    pub fn select<'a>(
        self,
        population: &'a [Agent],
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<&'a Agent>, SelectError> {
        match self {
            Self::Random => random(population, count, rng),
            Self::TopK => top_k(population, count),
            Self::Roulette => roulette(population, count, rng),
            Self::Tournament { size } => tournament(population, count, size, rng),
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::TopK
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SelectError {
    #[display("cannot select from an empty population")]
    EmptyPopulation,
    #[display("tournament size {size} exceeds population size {population}")]
    TournamentSize { size: usize, population: usize },
    #[display("roulette needs a positive fitness total, got {total}")]
    DegenerateDistribution { total: f64 },
}

/// `count` independent uniform draws, with replacement.
pub fn random<'a>(
    population: &'a [Agent],
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<&'a Agent>, SelectError> {
    if population.is_empty() {
        return Err(SelectError::EmptyPopulation);
    }

    Ok((0..count)
        .map(|_| population.choose(rng).expect("population is non-empty"))
        .collect())
}

/// The first `count` agents by descending fitness. The sort is stable, so
/// equally fit agents keep their original relative order. Returns the whole
/// sorted population when `count` exceeds it.
pub fn top_k(population: &[Agent], count: usize) -> Result<Vec<&Agent>, SelectError> {
    if population.is_empty() {
        return Err(SelectError::EmptyPopulation);
    }

    let mut ranked: Vec<&Agent> = population.iter().collect();
    ranked.sort_by(|l, r| r.fitness().partial_cmp(&l.fitness()).unwrap_or(Ordering::Equal));
    ranked.truncate(count);
    Ok(ranked)
}

/// Fitness-proportionate selection: each draw lands uniformly on a wheel
/// whose segments are sized by fitness, walked in population order. A wheel
/// with a zero, negative, or NaN total has no usable segments and is
/// rejected rather than spun.
pub fn roulette<'a>(
    population: &'a [Agent],
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<&'a Agent>, SelectError> {
    if population.is_empty() {
        return Err(SelectError::EmptyPopulation);
    }

    let total = population.iter().map(Agent::fitness).sum::<f64>();
    if !(total > 0.) {
        return Err(SelectError::DegenerateDistribution { total });
    }

    Ok((0..count)
        .map(|_| {
            let mut r = rng.random::<f64>() * total;
            // Fallback to the last agent only against floating point residue
            let mut pick = population.last().expect("population is non-empty");
            for agent in population {
                r -= agent.fitness();
                if r <= 0. {
                    pick = agent;
                    break;
                }
            }
            pick
        })
        .collect())
}

/// Each draw samples `size` distinct agents without replacement and keeps
/// the fittest of them.
pub fn tournament<'a>(
    population: &'a [Agent],
    count: usize,
    size: usize,
    rng: &mut impl Rng,
) -> Result<Vec<&'a Agent>, SelectError> {
    assert!(size > 0, "tournament size must be positive");
    if population.is_empty() {
        return Err(SelectError::EmptyPopulation);
    }
    if size > population.len() {
        return Err(SelectError::TournamentSize {
            size,
            population: population.len(),
        });
    }

    Ok((0..count)
        .map(|_| {
            population
                .choose_multiple(rng, size)
                .max_by(|l, r| l.fitness().partial_cmp(&r.fitness()).unwrap_or(Ordering::Equal))
                .expect("tournament sample is non-empty")
        })
        .collect())
}
