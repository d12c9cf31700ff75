//! Forest-Fire Model Core Library
//!
//! A stochastic forest-fire cellular automaton on a square lattice with a
//! permanently empty boundary: lightning ignites a random tree, fire spreads
//! to orthogonal neighbors, burned cells empty out and empty cells regrow.
//!
//! ## Statistics collection
//!
//! The crate layers a measurement pipeline on top of the automaton:
//! - single fire episodes run to extinction on a persistent grid
//! - multi-episode model runs with a warm-up (transient) phase
//! - a parallel harness fanning independent, deterministically seeded
//!   replicates across a worker pool and aggregating their
//!   (size, duration) records into one table, persistable as plain text

// Lattice state
pub mod grid;

// Automaton dynamics and model runs
pub mod simulation;

// Configuration, records, parallel collection
pub mod harness;
pub mod params;
pub mod stats;

// Re-export core types
pub use grid::{CellState, ForestGrid};
pub use params::{ConfigError, SimulationParameters};
pub use stats::{AggregatedStatistics, FireEpisodeResult, TableError};

// Re-export the simulation pipeline
pub use harness::{collect_statistics, replicate_seed, HarnessError};
pub use simulation::{
    burn_down, lightning_strike, run_fire_episode, run_fire_sequence, run_model, step_forest,
    ModelRun,
};
