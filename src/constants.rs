//! Centralized defaults for evolution parameters.
//!
//! All configurable knobs are defined here with the `MENDEL_` prefix.
//! This enables easy identification and future environment variable
//! configuration.

// ============================================================================
// Reproduction Parameters
// ============================================================================

/// Probability that a freshly bred child is mutated
pub const MENDEL_MUTATION_PROB: f64 = 0.2;

/// Standard deviation of the gaussian noise added to every weight and bias
/// entry during mutation
pub const MENDEL_MUTATION_SIGMA: f64 = 0.1;

// ============================================================================
// Selection Parameters
// ============================================================================

/// Number of agents sampled without replacement per tournament draw
pub const MENDEL_TOURNAMENT_SIZE: usize = 2;

// ============================================================================
// Logging Parameters
// ============================================================================

/// Default path of the append-only learning-curve log
pub const MENDEL_LEARNING_LOG: &str = "learning_info.txt";
