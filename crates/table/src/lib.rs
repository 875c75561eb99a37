//! Headless grid-editing core for a tabular UI.
//!
//! Tracks the active cell or range, converts a rectangular selection to
//! and from clipboard text, applies pasted blocks onto a grid of editable
//! records with per-cell change tracking, and keeps a bounded undo/redo
//! history over the whole grid. Rendering, row virtualization, column
//! widths and input widgets are the embedding application's business.

pub mod table;

pub use labtable_core::coord::{CellCoord, ColId, RowId};
pub use labtable_core::index::GridIndex;
pub use labtable_core::selection::{Key, KeyEvent, RangeBounds, Selection, SelectionModel};
pub use labtable_engine::grid::{Column, Grid, Record};
pub use labtable_engine::history::DEFAULT_MAX_HISTORY;
pub use labtable_engine::paste::{CellChange, PasteResult};
pub use labtable_engine::value::{ColumnKind, Value};

pub use table::{ClipboardRead, DataTable, DataTableConfig};
