//! Simulation dynamics: transition rule, fire episodes, model runs

mod driver;
mod episode;
mod step;

pub use driver::{run_fire_sequence, run_model, ModelRun};
pub use episode::{burn_down, lightning_strike, run_fire_episode};
pub use step::step_forest;
