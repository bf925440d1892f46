//! Resolves name-stack selection buffers to a single grid cell.
//!
//! A selection query reports every named object under the cursor as one
//! flattened record: `[name_count, min_depth, max_depth, name0, name1, ...]`.
//! Depths are normalized window depth quantized to `u32`, so a smaller
//! `min_depth` means closer to the viewer. The grid demos always push two
//! names (row, column), but records are parsed by their declared
//! `name_count` so deeper name stacks still walk correctly.

use std::fmt;

use thiserror::Error;

use crate::math::Rgba;

/// Channel shift applied to the winning cell on each selection.
pub const SELECT_RED_SHIFT: f32 = 0.1;
pub const SELECT_BLUE_SHIFT: f32 = -0.1;

/// Words preceding the names in every hit record.
const RECORD_HEADER_WORDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
}

impl GridCell {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickError {
    #[error("selection buffer contains no hits")]
    NoHits,
    #[error("hit record {index} needs {expected} more words, buffer has {available}")]
    Truncated {
        index: usize,
        expected: usize,
        available: usize,
    },
    #[error("winning hit record {index} carries {found} names, two needed for a grid cell")]
    MissingCellNames { index: usize, found: usize },
    #[error("selected cell {cell} is not in the grid")]
    UnknownCell { cell: GridCell },
}

/// One parsed hit from a selection buffer. Borrows its names from the
/// buffer; never extends past the record's declared `name_count`.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Position of this record in the buffer, for diagnostics.
    pub index: usize,
    pub min_depth: u32,
    pub max_depth: u32,
    pub names: &'a [u32],
}

impl HitRecord<'_> {
    /// Interpret the first two names as (row, column).
    pub fn cell(&self) -> Result<GridCell, PickError> {
        match self.names {
            [row, col, ..] => Ok(GridCell::new(*row, *col)),
            _ => Err(PickError::MissingCellNames {
                index: self.index,
                found: self.names.len(),
            }),
        }
    }
}

/// Iterator over the first `num_hits` records of a flat selection buffer.
/// Trailing words past the last record are ignored, matching a query
/// buffer that is larger than its hit count requires.
pub fn hit_records(buffer: &[u32], num_hits: usize) -> HitRecords<'_> {
    HitRecords {
        buffer,
        cursor: 0,
        produced: 0,
        num_hits,
    }
}

pub struct HitRecords<'a> {
    buffer: &'a [u32],
    cursor: usize,
    produced: usize,
    num_hits: usize,
}

impl<'a> Iterator for HitRecords<'a> {
    type Item = Result<HitRecord<'a>, PickError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.produced == self.num_hits {
            return None;
        }
        let index = self.produced;
        self.produced += 1;

        let available = self.buffer.len() - self.cursor;
        if available < RECORD_HEADER_WORDS {
            // Poison further iteration as well.
            self.produced = self.num_hits;
            return Some(Err(PickError::Truncated {
                index,
                expected: RECORD_HEADER_WORDS,
                available,
            }));
        }

        let name_count = self.buffer[self.cursor] as usize;
        let record_words = RECORD_HEADER_WORDS + name_count;
        if available < record_words {
            self.produced = self.num_hits;
            return Some(Err(PickError::Truncated {
                index,
                expected: record_words,
                available,
            }));
        }

        let record = HitRecord {
            index,
            min_depth: self.buffer[self.cursor + 1],
            max_depth: self.buffer[self.cursor + 2],
            names: &self.buffer[self.cursor + RECORD_HEADER_WORDS..self.cursor + record_words],
        };
        self.cursor += record_words;
        Some(Ok(record))
    }
}

/// Find the grid cell nearest the viewer among all hits.
///
/// Linear scan tracking the smallest `min_depth`; comparison is strictly
/// less-than, so the earliest record wins ties. The caller guarantees at
/// least one hit; `num_hits == 0` fails fast instead of reading
/// uninitialized state.
pub fn resolve(buffer: &[u32], num_hits: usize) -> Result<GridCell, PickError> {
    if num_hits == 0 {
        return Err(PickError::NoHits);
    }

    let mut winner: Option<HitRecord> = None;
    for record in hit_records(buffer, num_hits) {
        let record = record?;
        if winner.map_or(true, |best| record.min_depth < best.min_depth) {
            winner = Some(record);
        }
    }

    // num_hits >= 1 and every record parsed, so a winner exists.
    winner.ok_or(PickError::NoHits)?.cell()
}

/// Grid state exposed to the resolver by the owning scene.
pub trait CellPalette {
    fn color(&self, cell: GridCell) -> Option<Rgba>;
    fn set_color(&mut self, cell: GridCell, color: Rgba) -> bool;
}

/// Resolve the closest hit and mark it selected: red up by 0.1, blue down
/// by 0.1, both clamped to [0, 1]. Repeated selections accumulate. Prints
/// one diagnostic line per selection.
pub fn select(
    buffer: &[u32],
    num_hits: usize,
    palette: &mut dyn CellPalette,
) -> Result<GridCell, PickError> {
    let cell = resolve(buffer, num_hits)?;
    let current = palette
        .color(cell)
        .ok_or(PickError::UnknownCell { cell })?;
    let updated = current.shifted(SELECT_RED_SHIFT, 0.0, SELECT_BLUE_SHIFT);
    if !palette.set_color(cell, updated) {
        return Err(PickError::UnknownCell { cell });
    }
    println!("{}: chose {}", num_hits, cell);
    Ok(cell)
}
