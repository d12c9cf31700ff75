//! Lattice state for the forest-fire model
//!
//! The forest is an L×L lattice of cells stored as a flat `Vec` in row-major
//! order, with a same-size back buffer so a transition step can read a
//! consistent snapshot while writing the next state. The outer ring of cells
//! is permanently empty; `enforce_boundary` reasserts that after every
//! mutation that could violate it.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// State of a single lattice cell.
///
/// Exactly these three values exist; the `u8` discriminants double as the
/// integer codes handed to external renderers (see [`ForestGrid::cell_codes`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// No vegetation; may regrow into a tree.
    Empty = 0,
    /// A tree; may ignite when an orthogonal neighbor burns.
    Tree = 1,
    /// On fire; burns out to empty on the next step.
    Burning = 2,
}

impl CellState {
    /// Integer code for the render interface (0 = empty, 1 = tree, 2 = burning).
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// L×L forest lattice with a permanently empty boundary ring.
///
/// Cells are stored in row-major order (`y * size + x`). Each grid is owned
/// by exactly one simulation instance; parallel replicates construct their
/// own grids and never share one.
#[derive(Debug, Clone)]
pub struct ForestGrid {
    size: usize,
    cells: Vec<CellState>,
    /// Scratch buffer for snapshot-based stepping (read `cells`, write here,
    /// then swap).
    back: Vec<CellState>,
}

impl ForestGrid {
    /// Create a grid with every cell empty.
    ///
    /// # Panics
    ///
    /// Panics if `size < 3`; a smaller lattice has no interior cells.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size >= 3, "grid size {size} leaves no interior cells");
        Self {
            size,
            cells: vec![CellState::Empty; size * size],
            back: vec![CellState::Empty; size * size],
        }
    }

    /// Create a grid whose interior cells are independently seeded with a
    /// tree with probability `density`; the boundary ring stays empty.
    ///
    /// # Panics
    ///
    /// Panics if `size < 3`.
    #[must_use]
    pub fn random<R: Rng>(size: usize, density: f64, rng: &mut R) -> Self {
        let mut grid = Self::new(size);
        for y in 1..size - 1 {
            for x in 1..size - 1 {
                if rng.random::<f64>() < density {
                    grid.cells[y * size + x] = CellState::Tree;
                }
            }
        }
        grid.enforce_boundary();
        grid
    }

    /// Lattice edge length in cells.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells inside the boundary ring.
    #[must_use]
    pub fn interior_cell_count(&self) -> usize {
        (self.size - 2) * (self.size - 2)
    }

    /// Cell state at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> CellState {
        assert!(
            x < self.size && y < self.size,
            "Coordinates out of bounds"
        );
        self.cells[y * self.size + x]
    }

    /// Set the cell state at `(x, y)`.
    ///
    /// Callers writing to the boundary ring are responsible for restoring the
    /// boundary invariant; the transition step does so on every application.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) {
        assert!(
            x < self.size && y < self.size,
            "Coordinates out of bounds"
        );
        self.cells[y * self.size + x] = state;
    }

    /// Number of cells currently in `state`.
    #[must_use]
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Coordinates of every tree cell, in row-major order.
    #[must_use]
    pub fn tree_sites(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == CellState::Tree)
            .map(|(idx, _)| (idx % self.size, idx / self.size))
            .collect()
    }

    /// Force every cell in the outer ring to empty.
    pub fn enforce_boundary(&mut self) {
        let size = self.size;
        for x in 0..size {
            self.cells[x] = CellState::Empty;
            self.cells[(size - 1) * size + x] = CellState::Empty;
        }
        for y in 0..size {
            self.cells[y * size] = CellState::Empty;
            self.cells[y * size + (size - 1)] = CellState::Empty;
        }
    }

    /// Current cell states in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Row-major integer codes (0 = empty, 1 = tree, 2 = burning) for an
    /// external renderer. Render-only: nothing feeds back into the model.
    #[must_use]
    pub fn cell_codes(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.code()).collect()
    }

    /// Snapshot view for a transition step: the current cells read-only and
    /// the back buffer to write the next state into.
    pub(crate) fn ping_pong(&mut self) -> (&[CellState], &mut [CellState]) {
        (&self.cells, &mut self.back)
    }

    /// Promote the back buffer written by a transition step to the current
    /// state.
    pub(crate) fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.cells, &mut self.back);
    }
}
