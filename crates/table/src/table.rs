//! The single object the embedding UI consumes.
//!
//! Composes the selection model, clipboard codec, paste engine and
//! history store. The embedding application's own event dispatch calls
//! these methods; the table owns no listeners and no ambient state, and
//! every operation runs synchronously to completion.

use labtable_core::coord::{CellCoord, ColId, RowId};
use labtable_core::index::GridIndex;
use labtable_core::selection::{KeyEvent, RangeBounds, Selection, SelectionModel};
use labtable_engine::grid::{Column, Grid, Record};
use labtable_engine::history::{History, DEFAULT_MAX_HISTORY};
use labtable_engine::paste::{self, CellChange, PasteResult};
use labtable_engine::value::Value;
use labtable_io::clipboard;

/// Behavior switches for a table instance.
#[derive(Debug, Clone)]
pub struct DataTableConfig {
    /// Record an undo snapshot per committed edit. With tracking off,
    /// edits still replace the present grid but are not undoable.
    pub track_history: bool,
    /// Depth bound on the undo stack.
    pub max_history: usize,
}

impl Default for DataTableConfig {
    fn default() -> Self {
        Self {
            track_history: true,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

/// Ticket for an in-flight platform clipboard read.
///
/// Only the most recently issued ticket applies; completing a superseded
/// one is discarded, so a slow read can never apply an out-of-order paste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardRead(u64);

/// Headless editable table: current grid snapshot, selection state and
/// bounded undo/redo.
#[derive(Debug, Clone)]
pub struct DataTable {
    history: History<Grid>,
    selection: SelectionModel,
    config: DataTableConfig,
    clipboard_epoch: u64,
}

impl DataTable {
    pub fn new(columns: Vec<Column>, records: Vec<Record>) -> Self {
        Self::with_config(columns, records, DataTableConfig::default())
    }

    pub fn with_config(
        columns: Vec<Column>,
        records: Vec<Record>,
        config: DataTableConfig,
    ) -> Self {
        let grid = Grid::new(columns, records);
        Self {
            history: History::with_max_size(grid, config.max_history),
            selection: SelectionModel::new(),
            config,
            clipboard_epoch: 0,
        }
    }

    // ---- Output boundary ------------------------------------------------

    pub fn grid(&self) -> &Grid {
        self.history.present()
    }

    pub fn columns(&self) -> &[Column] {
        &self.grid().columns
    }

    pub fn records(&self) -> &[Record] {
        &self.grid().records
    }

    /// Addressing index for the current visible ordering. Rendering
    /// should build this once per frame and reuse it for cell queries.
    pub fn index(&self) -> GridIndex {
        self.grid().index()
    }

    pub fn selection(&self) -> &Selection {
        self.selection.selection()
    }

    pub fn is_cell_active(&self, coord: &CellCoord) -> bool {
        self.selection.is_cell_active(coord)
    }

    pub fn is_cell_in_range(&self, coord: &CellCoord, index: &GridIndex) -> bool {
        self.selection.is_cell_in_range(coord, index)
    }

    /// The selected rectangle in the current visible ordering.
    pub fn range_bounds(&self) -> Option<RangeBounds> {
        self.selection.range_bounds(&self.index())
    }

    // ---- Input boundary -------------------------------------------------

    pub fn click(&mut self, coord: CellCoord) {
        self.selection.click(coord);
    }

    pub fn mouse_down(&mut self, coord: CellCoord) {
        self.selection.mouse_down(coord);
    }

    pub fn mouse_enter(&mut self, coord: CellCoord) {
        self.selection.mouse_enter(coord);
    }

    pub fn mouse_up(&mut self) {
        self.selection.mouse_up();
    }

    pub fn key_down(&mut self, event: KeyEvent) {
        let index = self.index();
        self.selection.key_down(event, &index);
    }

    /// Explicit deselect (e.g. focus left the grid).
    pub fn deselect(&mut self) {
        self.selection.clear();
    }

    // ---- Clipboard ------------------------------------------------------

    /// Serialize the current selection for the platform clipboard. None
    /// when nothing is selected or the selection has gone stale.
    pub fn copy(&self) -> Option<String> {
        let bounds = self.selection.range_bounds(&self.index())?;
        clipboard::serialize(self.grid(), &bounds).ok()
    }

    /// Parse clipboard text and apply it at the selection's active cell.
    /// Commits one history snapshot when anything changed; zero changes
    /// is a valid, silent result.
    pub fn paste(&mut self, text: &str) -> PasteResult {
        let Some(anchor) = self.selection.selection().active().cloned() else {
            return PasteResult::default();
        };
        let block = clipboard::parse(text);
        if block.is_empty() {
            return PasteResult::default();
        }

        let (next, result) = paste::apply(self.grid(), &anchor, &block);
        if result.total_changes > 0 {
            self.commit(next);
        }
        result
    }

    /// Issue a ticket before starting an asynchronous platform clipboard
    /// read. A newer ticket supersedes every earlier one.
    pub fn begin_clipboard_read(&mut self) -> ClipboardRead {
        self.clipboard_epoch += 1;
        ClipboardRead(self.clipboard_epoch)
    }

    /// Complete a platform clipboard read. A superseded ticket is
    /// discarded and returns the empty result (last write wins).
    pub fn complete_clipboard_read(&mut self, ticket: ClipboardRead, text: &str) -> PasteResult {
        if ticket.0 != self.clipboard_epoch {
            log::debug!(
                "discarding stale clipboard read ({} superseded by {})",
                ticket.0,
                self.clipboard_epoch
            );
            return PasteResult::default();
        }
        self.paste(text)
    }

    // ---- Editing --------------------------------------------------------

    /// Single-cell edit, as driven by an editable cell widget. Input is
    /// coerced by the column's kind; a value loosely equal to the current
    /// one is a no-op, anything else commits one history snapshot.
    pub fn update_cell(&mut self, row: &RowId, col: &ColId, input: &str) -> Option<CellChange> {
        let row_index = self.index().row_position(row)?;
        let column = self.grid().column_by_id(col)?.clone();

        let new_value = Value::coerce(input, column.kind);
        let old_value = self.grid().records[row_index].get(col).clone();
        if old_value.loose_eq(&new_value) {
            return None;
        }

        let mut next = self.grid().clone();
        next.records[row_index].set(col.clone(), new_value.clone());
        self.commit(next);

        Some(CellChange {
            row_index,
            row_id: row.clone(),
            column_id: col.clone(),
            column_header: column.header,
            old_value,
            new_value,
        })
    }

    /// Wholesale data replacement from the collaborator (e.g. a refetch):
    /// clears the selection and restarts history at the new snapshot.
    pub fn reset_data(&mut self, records: Vec<Record>) {
        let grid = Grid::new(self.grid().columns.clone(), records);
        self.history.clear(grid);
        self.selection.clear();
    }

    // ---- History --------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        log::debug!("undo ({} step(s) left)", self.history.depth());
        self.reconcile_selection();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        log::debug!("redo");
        self.reconcile_selection();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Drop all undo/redo state, keeping the current data.
    pub fn clear_history(&mut self) {
        let present = self.grid().clone();
        self.history.clear(present);
    }

    // ---- Internals ------------------------------------------------------

    fn commit(&mut self, next: Grid) {
        if self.config.track_history {
            self.history.commit(next);
        } else {
            *self.history.present_mut() = next;
        }
        self.reconcile_selection();
    }

    /// Selections can refer to rows that vanished with the last snapshot
    /// swap; degrade them rather than pointing at nothing.
    fn reconcile_selection(&mut self) {
        let index = self.index();
        self.selection.reconcile(&index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labtable_core::selection::{Key, KeyEvent};

    fn table() -> DataTable {
        DataTable::new(
            vec![Column::text("name", "Name"), Column::number("ph", "pH")],
            vec![
                Record::new("r1").with_field("name", "A").with_field("ph", 7.0),
                Record::new("r2").with_field("name", "B").with_field("ph", 6.5),
                Record::new("r3").with_field("name", "C").with_field("ph", 7.2),
            ],
        )
    }

    fn coord(row: &str, col: &str) -> CellCoord {
        CellCoord::new(row, col)
    }

    #[test]
    fn test_paste_commits_one_atomic_snapshot() {
        let mut table = table();
        table.click(coord("r2", "name"));

        let result = table.paste("X\t5.0\nY\t5.5\n");
        assert_eq!(result.total_changes, 4);
        assert!(table.can_undo());

        // One undo reverts the whole paste
        assert!(table.undo());
        assert_eq!(
            table.grid().value(1, &ColId::new("name")),
            Some(&Value::Text("B".to_string()))
        );
        assert_eq!(table.grid().value(2, &ColId::new("ph")), Some(&Value::Number(7.2)));
        assert!(!table.can_undo());

        assert!(table.redo());
        assert_eq!(
            table.grid().value(2, &ColId::new("name")),
            Some(&Value::Text("Y".to_string()))
        );
    }

    #[test]
    fn test_identical_paste_commits_nothing() {
        let mut table = table();
        table.click(coord("r1", "name"));

        let result = table.paste("A\t7.0\n");
        assert_eq!(result.total_changes, 0);
        assert!(!table.can_undo());
    }

    #[test]
    fn test_paste_without_selection_is_noop() {
        let mut table = table();
        let result = table.paste("X\n");
        assert_eq!(result.total_changes, 0);
        assert!(!table.can_undo());
    }

    #[test]
    fn test_copy_round_trips_through_paste() {
        let mut table = table();
        table.mouse_down(coord("r1", "name"));
        table.mouse_enter(coord("r2", "ph"));
        table.mouse_up();

        let text = table.copy().unwrap();
        assert_eq!(text, "A\t7\nB\t6.5\n");

        // Pasting a copy of the same region back is a no-op
        table.click(coord("r1", "name"));
        let result = table.paste(&text);
        assert_eq!(result.total_changes, 0);
    }

    #[test]
    fn test_copy_without_selection_is_none() {
        let table = table();
        assert_eq!(table.copy(), None);
    }

    #[test]
    fn test_update_cell_tracks_change_and_history() {
        let mut table = table();
        let change = table
            .update_cell(&RowId::new("r2"), &ColId::new("ph"), "6.8")
            .unwrap();
        assert_eq!(change.old_value, Value::Number(6.5));
        assert_eq!(change.new_value, Value::Number(6.8));
        assert_eq!(change.column_header, "pH");

        // Loosely-equal input is a no-op, not a phantom history entry
        assert!(table
            .update_cell(&RowId::new("r2"), &ColId::new("ph"), "6.80")
            .is_none());

        assert!(table.undo());
        assert_eq!(table.grid().value(1, &ColId::new("ph")), Some(&Value::Number(6.5)));
    }

    #[test]
    fn test_update_cell_stale_row_is_noop() {
        let mut table = table();
        assert!(table
            .update_cell(&RowId::new("gone"), &ColId::new("ph"), "1")
            .is_none());
        assert!(!table.can_undo());
    }

    #[test]
    fn test_stale_clipboard_read_is_discarded() {
        let mut table = table();
        table.click(coord("r1", "name"));

        let stale = table.begin_clipboard_read();
        let fresh = table.begin_clipboard_read();

        let result = table.complete_clipboard_read(stale, "X\n");
        assert_eq!(result.total_changes, 0);
        assert!(!table.can_undo());

        let result = table.complete_clipboard_read(fresh, "X\n");
        assert_eq!(result.total_changes, 1);
    }

    #[test]
    fn test_history_disabled_edits_are_not_undoable() {
        let mut table = DataTable::with_config(
            vec![Column::text("name", "Name")],
            vec![Record::new("r1").with_field("name", "A")],
            DataTableConfig {
                track_history: false,
                max_history: DEFAULT_MAX_HISTORY,
            },
        );
        table.click(coord("r1", "name"));

        let result = table.paste("Z\n");
        assert_eq!(result.total_changes, 1);
        assert_eq!(
            table.grid().value(0, &ColId::new("name")),
            Some(&Value::Text("Z".to_string()))
        );
        assert!(!table.can_undo());
        assert!(!table.undo());
    }

    #[test]
    fn test_bounded_history_evicts_oldest_edits() {
        let mut table = DataTable::with_config(
            vec![Column::number("n", "N")],
            vec![Record::new("r1").with_field("n", 0.0)],
            DataTableConfig {
                track_history: true,
                max_history: 3,
            },
        );
        for n in 1..=5 {
            table.update_cell(&RowId::new("r1"), &ColId::new("n"), &n.to_string());
        }

        let mut undone = 0;
        while table.undo() {
            undone += 1;
        }
        assert_eq!(undone, 3);
        // The two oldest snapshots were evicted; history bottoms out at 2
        assert_eq!(table.grid().value(0, &ColId::new("n")), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_reset_data_clears_selection_and_history() {
        let mut table = table();
        table.click(coord("r1", "name"));
        table.update_cell(&RowId::new("r1"), &ColId::new("name"), "Z");
        assert!(table.can_undo());

        table.reset_data(vec![Record::new("x1").with_field("name", "fresh")]);
        assert!(table.selection().is_none());
        assert!(!table.can_undo());
        assert_eq!(table.records().len(), 1);
    }

    #[test]
    fn test_undo_reconciles_selection_on_vanished_row() {
        let mut table = table();
        // Replace the row universe, then select a new row and edit it
        table.reset_data(vec![Record::new("x1").with_field("name", "N")]);
        table.update_cell(&RowId::new("x1"), &ColId::new("name"), "M");
        table.click(coord("x1", "name"));

        // Undoing the edit keeps x1; the selection survives
        table.undo();
        assert!(table.is_cell_active(&coord("x1", "name")));
    }

    #[test]
    fn test_keyboard_drives_selection_through_facade() {
        let mut table = table();
        table.click(coord("r1", "name"));
        table.key_down(KeyEvent::new(Key::ArrowDown));
        table.key_down(KeyEvent::new(Key::ArrowRight).with_shift());

        let bounds = table.range_bounds().unwrap();
        assert_eq!(bounds, RangeBounds::new(1, 0, 1, 1));

        let index = table.index();
        assert!(table.is_cell_in_range(&coord("r2", "ph"), &index));
        assert!(!table.is_cell_in_range(&coord("r3", "ph"), &index));
    }

    #[test]
    fn test_clamped_paste_reports_only_in_bounds_changes() {
        let mut table = table();
        table.click(coord("r3", "name"));

        // Ten rows pasted at the last row: nine are discarded
        let block: String = (0..10).map(|n| format!("row{n}\t{n}\n")).collect();
        let result = table.paste(&block);
        assert_eq!(result.total_changes, 2);
        assert_eq!(table.records().len(), 3);
    }
}
