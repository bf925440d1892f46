use thiserror::Error;

use crate::math::Rgba;
use crate::picking::{CellPalette, GridCell};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({row}, {col}) outside {rows}x{cols} grid")]
    OutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },
}

/// Per-cell color state for a selectable grid, stored as a row-major flat
/// buffer. Cells live as long as the grid; selection mutates them in place.
#[derive(Debug, Clone)]
pub struct ColorGrid {
    rows: u32,
    cols: u32,
    cells: Vec<Rgba>,
}

impl ColorGrid {
    /// Build a rows x cols grid, initializing each cell from its position.
    pub fn from_fn(rows: u32, cols: u32, mut init: impl FnMut(u32, u32) -> Rgba) -> Self {
        let mut cells = Vec::with_capacity((rows * cols) as usize);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(init(r, c));
            }
        }
        Self { rows, cols, cells }
    }

    pub fn filled(rows: u32, cols: u32, color: Rgba) -> Self {
        Self::from_fn(rows, cols, |_, _| color)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    fn index(&self, row: u32, col: u32) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some((row * self.cols + col) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, row: u32, col: u32) -> Result<Rgba, GridError> {
        self.index(row, col)
            .map(|i| self.cells[i])
            .ok_or(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
    }

    pub fn set(&mut self, row: u32, col: u32, color: Rgba) -> Result<(), GridError> {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = color;
                Ok(())
            }
            None => Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            }),
        }
    }
}

impl CellPalette for ColorGrid {
    fn color(&self, cell: GridCell) -> Option<Rgba> {
        self.get(cell.row, cell.col).ok()
    }

    fn set_color(&mut self, cell: GridCell, color: Rgba) -> bool {
        self.set(cell.row, cell.col, color).is_ok()
    }
}
