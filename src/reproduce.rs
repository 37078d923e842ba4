//! Reproduction operators: crossover of two parents into one child, and
//! in-place gaussian mutation. Both only ever touch genomes they own.

use crate::{agent::Agent, constants::MENDEL_MUTATION_SIGMA};
use rand::Rng;
use rand_distr::StandardNormal;
use rulinalg::matrix::{BaseMatrixMut, Matrix};

/// Produce one child from two parents. The child starts as a deep copy of
/// the fitter parent (the first argument wins ties), then every
/// even-indexed layer transition is replaced by the elementwise average of
/// both parents; odd-indexed transitions keep the fitter parent's values
/// untouched. The child's fitness is the parents' mean, an estimate that
/// stands in until an evaluator scores it.
pub fn crossover(p1: &Agent, p2: &Agent) -> Agent {
    debug_assert_eq!(p1.genome().layer_sizes(), p2.genome().layer_sizes());

    let (best, worst) = if p1.fitness() >= p2.fitness() {
        (p1, p2)
    } else {
        (p2, p1)
    };

    let mut child = best.clone();
    let genome = child.genome_mut();
    for i in (0..genome.transitions()).step_by(2) {
        genome.weights_mut()[i] = average(&best.genome().weights()[i], &worst.genome().weights()[i]);
        genome.biases_mut()[i] = average(&best.genome().biases()[i], &worst.genome().biases()[i]);
    }

    child.set_fitness((best.fitness() + worst.fitness()) / 2.);
    child
}

fn average(l: &Matrix<f64>, r: &Matrix<f64>) -> Matrix<f64> {
    (l + r).apply(&|v| v / 2.)
}

/// Add independent gaussian noise (mean 0, deviation
/// [MENDEL_MUTATION_SIGMA]) to every weight and bias entry of the agent's
/// genome, in place.
pub fn mutate(agent: &mut Agent, rng: &mut impl Rng) {
    let (weights, biases) = agent.genome_mut().params_mut();
    for matrix in weights.iter_mut().chain(biases.iter_mut()) {
        for v in matrix.mut_data() {
            *v += rng.sample::<f64, _>(StandardNormal) * MENDEL_MUTATION_SIGMA;
        }
    }
}
