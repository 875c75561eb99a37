//! Paste application - maps a parsed clipboard block onto the grid.

use serde::Serialize;

use labtable_core::coord::{CellCoord, ColId, RowId};

use crate::grid::Grid;
use crate::value::Value;

/// A single cell mutation, carrying both sides for auditability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellChange {
    pub row_index: usize,
    pub row_id: RowId,
    pub column_id: ColId,
    pub column_header: String,
    pub old_value: Value,
    pub new_value: Value,
}

/// Outcome of a paste: the ordered change set plus a count.
///
/// Empty is a valid, silent result - the clipboard was empty, the anchor
/// went stale, or nothing differed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PasteResult {
    pub changes: Vec<CellChange>,
    pub total_changes: usize,
}

/// Apply a parsed clipboard block onto `grid` starting at `anchor`,
/// returning the new grid snapshot and every changed cell in row-major
/// order.
///
/// The anchor is resolved against the grid's current visible ordering; an
/// anchor whose row or column is no longer present yields the unchanged
/// grid and an empty result. Block cells falling past the last visible
/// row or column are discarded - pasting never inserts rows or columns.
///
/// Incoming cells are coerced by the target column's kind and diffed with
/// loose equality, so re-pasting "5.0" over 5 on a Number column is not a
/// change. Identical inputs always produce identical change sets and an
/// identical resulting grid.
pub fn apply(grid: &Grid, anchor: &CellCoord, block: &[Vec<String>]) -> (Grid, PasteResult) {
    let index = grid.index();
    let (Some(start_row), Some(start_col)) = (
        index.row_position(&anchor.row),
        index.col_position(&anchor.col),
    ) else {
        return (grid.clone(), PasteResult::default());
    };

    let mut next = grid.clone();
    let mut changes = Vec::new();

    for (row_offset, cells) in block.iter().enumerate() {
        let target_row = start_row + row_offset;
        if target_row >= next.records.len() {
            // Everything below the last visible row is discarded
            break;
        }
        for (col_offset, incoming) in cells.iter().enumerate() {
            let target_col = start_col + col_offset;
            if target_col >= next.columns.len() {
                break;
            }
            let column = &next.columns[target_col];
            let new_value = Value::coerce(incoming, column.kind);
            let old_value = next.records[target_row].get(&column.id).clone();
            if old_value.loose_eq(&new_value) {
                continue;
            }
            changes.push(CellChange {
                row_index: target_row,
                row_id: next.records[target_row].id.clone(),
                column_id: column.id.clone(),
                column_header: column.header.clone(),
                old_value,
                new_value: new_value.clone(),
            });
            let column_id = column.id.clone();
            next.records[target_row].set(column_id, new_value);
        }
    }

    if !changes.is_empty() {
        log::debug!(
            "paste applied {} change(s) at ({}, {})",
            changes.len(),
            anchor.row,
            anchor.col
        );
    }

    let result = PasteResult {
        total_changes: changes.len(),
        changes,
    };
    (next, result)
}
