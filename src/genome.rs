//! The genotype: per-layer weight matrices and bias rows of a
//! fixed-topology feedforward network, plus forward inference over them.

use crate::serialize;
use rand::Rng;
use rand_distr::StandardNormal;
use rulinalg::matrix::{BaseMatrixMut, Matrix};
use serde::{Deserialize, Serialize};
use std::{error::Error, fs, path::Path, str::FromStr};

pub mod activate {
    use std::f64::consts::E;

    pub fn sigmoid(x: f64) -> f64 {
        1. / (1. + E.powf(-x))
    }

    pub fn relu(x: f64) -> f64 {
        if x < 0. {
            0.
        } else {
            x
        }
    }
}

/// Construction-time validation failures, fatal and never retried.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("a network needs at least an input and an output layer, got {_0}")]
    TooFewLayers(#[error(not(source))] usize),
    #[display("layer {index} has no neurons")]
    EmptyLayer { index: usize },
    #[display("unknown activation kind {_0:?}")]
    UnknownActivation(#[error(not(source))] String),
}

/// Nonlinearity applied after every layer transition's affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Sigmoid,
    ReLU,
}

impl Activation {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Sigmoid => activate::sigmoid(x),
            Self::ReLU => activate::relu(x),
        }
    }
}

impl FromStr for Activation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sigmoid" | "sigmoid" => Ok(Self::Sigmoid),
            "ReLU" | "relu" => Ok(Self::ReLU),
            other => Err(ConfigError::UnknownActivation(other.to_string())),
        }
    }
}

pub(crate) fn validate_layer_sizes(layer_sizes: &[usize]) -> Result<(), ConfigError> {
    if layer_sizes.len() < 2 {
        return Err(ConfigError::TooFewLayers(layer_sizes.len()));
    }
    match layer_sizes.iter().position(|&n| n == 0) {
        Some(index) => Err(ConfigError::EmptyLayer { index }),
        None => Ok(()),
    }
}

/// The mutable genetic material of one agent. Per layer transition `i` it
/// owns a weight matrix of shape `(sizes[i], sizes[i+1])` and a bias row of
/// shape `(1, sizes[i+1])`. Shapes are fixed at construction; only values
/// ever change. `Clone` deep-copies every matrix, so a cloned genome shares
/// nothing with its source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genome {
    layer_sizes: Vec<usize>,
    activation: Activation,
    #[serde(
        serialize_with = "serialize::serialize_matrices",
        deserialize_with = "serialize::deserialize_matrices"
    )]
    weights: Vec<Matrix<f64>>,
    #[serde(
        serialize_with = "serialize::serialize_matrices",
        deserialize_with = "serialize::deserialize_matrices"
    )]
    biases: Vec<Matrix<f64>>,
}

impl Genome {
    /// Weights start standard normal, biases start all zero.
    pub fn new(
        layer_sizes: &[usize],
        activation: Activation,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigError> {
        validate_layer_sizes(layer_sizes)?;

        let mut weights = Vec::with_capacity(layer_sizes.len() - 1);
        let mut biases = Vec::with_capacity(layer_sizes.len() - 1);
        for io in layer_sizes.windows(2) {
            let (n_in, n_out) = (io[0], io[1]);
            let init = (0..n_in * n_out)
                .map(|_| rng.sample(StandardNormal))
                .collect::<Vec<f64>>();
            weights.push(Matrix::new(n_in, n_out, init));
            biases.push(Matrix::zeros(1, n_out));
        }

        Ok(Self {
            layer_sizes: layer_sizes.to_vec(),
            activation,
            weights,
            biases,
        })
    }

    /// Feed `input` through every layer transition in order, activating
    /// after each affine transform. Pure: identical parameters and input
    /// produce bit-identical output. Input must be sized to the input
    /// layer's width.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        assert_eq!(
            input.len(),
            self.layer_sizes[0],
            "input width must match the input layer"
        );
        let mut x = Matrix::new(1, input.len(), input.to_vec());
        for (w, b) in self.weights.iter().zip(self.biases.iter()) {
            x = (x * w + b).apply(&|v| self.activation.apply(v));
        }
        x.into_vec()
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Number of layer transitions, i.e. weight/bias pairs.
    pub fn transitions(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[Matrix<f64>] {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut [Matrix<f64>] {
        &mut self.weights
    }

    pub fn biases(&self) -> &[Matrix<f64>] {
        &self.biases
    }

    pub fn biases_mut(&mut self) -> &mut [Matrix<f64>] {
        &mut self.biases
    }

    /// Both parameter groups at once, for operators that sweep every entry.
    pub fn params_mut(&mut self) -> (&mut [Matrix<f64>], &mut [Matrix<f64>]) {
        (&mut self.weights, &mut self.biases)
    }

    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> Result<String, Box<dyn Error>> {
        Ok(serde_json::to_string(self)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, Box<dyn Error>> {
        serde_json::from_str(s).map_err(|op| op.into())
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn Error>> {
        fs::write(path, self.to_string()?)?;
        Ok(())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        Self::from_str(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{assert_f64_approx, test_activation};
    use rand::{rngs::StdRng, SeedableRng};
    use rulinalg::matrix::{BaseMatrix, BaseMatrixMut};

    test_activation!(shapes[Sigmoid | ReLU]() {
        let mut rng = StdRng::seed_from_u64(1);
        let sizes = [3, 5, 2];
        let genome = Genome::new(&sizes, ACTIVATION, &mut rng).unwrap();

        assert_eq!(genome.transitions(), 2);
        for (i, (w, b)) in genome.weights().iter().zip(genome.biases()).enumerate() {
            assert_eq!((w.rows(), w.cols()), (sizes[i], sizes[i + 1]));
            assert_eq!((b.rows(), b.cols()), (1, sizes[i + 1]));
            assert!(b.data().iter().all(|&v| v == 0.));
        }
    });

    test_activation!(forward_deterministic[Sigmoid | ReLU]() {
        let mut rng = StdRng::seed_from_u64(2);
        let genome = Genome::new(&[4, 6, 3], ACTIVATION, &mut rng).unwrap();
        let input = [0.25, -0.75, 1.5, 0.];

        let first = genome.forward(&input);
        let second = genome.forward(&input);
        assert_eq!(first.len(), 3);
        for (l, r) in first.iter().zip(second.iter()) {
            assert_eq!(l.to_bits(), r.to_bits());
        }
    });

    #[test]
    fn test_forward_known_values() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut genome = Genome::new(&[2, 1], Activation::Sigmoid, &mut rng).unwrap();
        genome.weights_mut()[0].mut_data().copy_from_slice(&[2., -1.]);
        genome.biases_mut()[0].mut_data().copy_from_slice(&[0.5]);

        let out = genome.forward(&[1., 2.]);
        assert_f64_approx!(out[0], activate::sigmoid(1. * 2. + 2. * -1. + 0.5));

        let mut genome = Genome::new(&[2, 1], Activation::ReLU, &mut rng).unwrap();
        genome.weights_mut()[0].mut_data().copy_from_slice(&[1., 1.]);
        assert_f64_approx!(genome.forward(&[-3., 1.])[0], 0.);
        assert_f64_approx!(genome.forward(&[3., 1.])[0], 4.);
    }

    #[test]
    fn test_rejects_bad_topologies() {
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(
            Genome::new(&[], Activation::Sigmoid, &mut rng).unwrap_err(),
            ConfigError::TooFewLayers(0)
        );
        assert_eq!(
            Genome::new(&[5], Activation::Sigmoid, &mut rng).unwrap_err(),
            ConfigError::TooFewLayers(1)
        );
        assert_eq!(
            Genome::new(&[5, 0, 2], Activation::Sigmoid, &mut rng).unwrap_err(),
            ConfigError::EmptyLayer { index: 1 }
        );
    }

    #[test]
    fn test_activation_from_str() {
        assert_eq!("Sigmoid".parse::<Activation>(), Ok(Activation::Sigmoid));
        assert_eq!("relu".parse::<Activation>(), Ok(Activation::ReLU));
        assert_eq!(
            "tanh".parse::<Activation>(),
            Err(ConfigError::UnknownActivation("tanh".to_string()))
        );
    }

    #[test]
    fn test_serialization_behavioral_equivalence() {
        let mut rng = StdRng::seed_from_u64(5);
        let original = Genome::new(&[3, 4, 2], Activation::Sigmoid, &mut rng).unwrap();

        let restored =
            Genome::from_str(&original.to_string().expect("failed to serialize"))
                .expect("failed to deserialize");

        assert_eq!(original.layer_sizes(), restored.layer_sizes());
        for (l, r) in original.weights().iter().zip(restored.weights()) {
            assert_eq!(l.data(), r.data());
        }

        let input = [0.1, -0.2, 0.3];
        for (l, r) in original.forward(&input).iter().zip(restored.forward(&input)) {
            assert_eq!(l.to_bits(), r.to_bits());
        }
    }
}
