pub mod agent;
pub mod constants;
pub mod evolve;
pub mod genome;
mod macros;
pub mod reproduce;
pub mod scenario;
pub mod select;
mod serialize;
pub mod stats;

pub use agent::{Agent, Mode, UNSCORED};
pub use evolve::{Evolution, EvolveError};
pub use genome::{activate, Activation, ConfigError, Genome};
pub use scenario::{EvolutionTarget, GameXOR, Hook, Scenario};
pub use select::{Policy, SelectError};
pub use stats::LearningRecord;
