//! Grid addressing - the visible ordering lookup layer
//!
//! Maps between (RowId, ColId) pairs and their linear positions in the
//! row/column ordering the collaborator currently displays.
//!
//! Key invariants:
//! - The index is a snapshot view, not state; rebuild it at the boundary
//!   whenever the ordering may have changed
//! - All lookups are O(1)
//! - A stale id resolves to None, never to a guessed position

use rustc_hash::FxHashMap;

use crate::coord::{CellCoord, ColId, RowId};

#[derive(Debug, Clone)]
pub struct GridIndex {
    row_ids: Vec<RowId>,
    col_ids: Vec<ColId>,
    row_positions: FxHashMap<RowId, usize>,
    col_positions: FxHashMap<ColId, usize>,
}

impl GridIndex {
    /// Build the index from the visible orderings.
    pub fn new(row_ids: Vec<RowId>, col_ids: Vec<ColId>) -> Self {
        let row_positions = row_ids
            .iter()
            .enumerate()
            .map(|(pos, id)| (id.clone(), pos))
            .collect();
        let col_positions = col_ids
            .iter()
            .enumerate()
            .map(|(pos, id)| (id.clone(), pos))
            .collect();
        Self {
            row_ids,
            col_ids,
            row_positions,
            col_positions,
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_ids.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_ids.len()
    }

    /// Position of a row in the visible ordering - O(1).
    pub fn row_position(&self, id: &RowId) -> Option<usize> {
        self.row_positions.get(id).copied()
    }

    /// Position of a column in the visible ordering - O(1).
    pub fn col_position(&self, id: &ColId) -> Option<usize> {
        self.col_positions.get(id).copied()
    }

    /// Row id at a visible position.
    pub fn row_id(&self, position: usize) -> Option<&RowId> {
        self.row_ids.get(position)
    }

    /// Column id at a visible position.
    pub fn col_id(&self, position: usize) -> Option<&ColId> {
        self.col_ids.get(position)
    }

    /// Resolve a coordinate to (row, col) positions; None when stale.
    pub fn position(&self, coord: &CellCoord) -> Option<(usize, usize)> {
        Some((
            self.row_position(&coord.row)?,
            self.col_position(&coord.col)?,
        ))
    }

    /// Whether both sides of the coordinate still resolve.
    pub fn contains(&self, coord: &CellCoord) -> bool {
        self.position(coord).is_some()
    }
}
