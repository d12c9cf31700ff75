//! Forest lattice representation

mod forest;

pub use forest::{CellState, ForestGrid};
