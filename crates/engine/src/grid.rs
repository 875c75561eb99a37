use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use labtable_core::coord::{ColId, RowId};
use labtable_core::index::GridIndex;

use crate::value::{ColumnKind, Value};

static NULL_VALUE: Value = Value::Null;

/// A visible column: stable id, display header, and the kind its cells
/// hold. The header travels into change records for auditability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColId,
    pub header: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(id: impl Into<ColId>, header: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            kind,
        }
    }

    pub fn text(id: impl Into<ColId>, header: impl Into<String>) -> Self {
        Self::new(id, header, ColumnKind::Text)
    }

    pub fn number(id: impl Into<ColId>, header: impl Into<String>) -> Self {
        Self::new(id, header, ColumnKind::Number)
    }
}

/// One editable record: stable id plus named fields.
///
/// A missing field reads as Null; a record never has to carry every
/// visible column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RowId,
    fields: FxHashMap<ColId, Value>,
}

impl Record {
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            fields: FxHashMap::default(),
        }
    }

    /// Builder-style field assignment, for construction and fixtures.
    pub fn with_field(mut self, col: impl Into<ColId>, value: impl Into<Value>) -> Self {
        self.fields.insert(col.into(), value.into());
        self
    }

    pub fn get(&self, col: &ColId) -> &Value {
        self.fields.get(col).unwrap_or(&NULL_VALUE)
    }

    pub fn set(&mut self, col: ColId, value: Value) {
        self.fields.insert(col, value);
    }

    pub fn fields(&self) -> &FxHashMap<ColId, Value> {
        &self.fields
    }
}

/// The grid snapshot the collaborator supplies: visible columns and
/// records in display order.
///
/// The core never assumes exclusive ownership - it receives a snapshot
/// and returns a new one. Cloning produces a fully independent copy, so
/// every committed edit replaces the grid wholesale instead of mutating
/// shared state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub columns: Vec<Column>,
    pub records: Vec<Record>,
}

impl Grid {
    pub fn new(columns: Vec<Column>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    /// Build the addressing index for the current visible ordering.
    pub fn index(&self) -> GridIndex {
        GridIndex::new(
            self.records.iter().map(|r| r.id.clone()).collect(),
            self.columns.iter().map(|c| c.id.clone()).collect(),
        )
    }

    pub fn record(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    pub fn column(&self, col: usize) -> Option<&Column> {
        self.columns.get(col)
    }

    pub fn column_by_id(&self, id: &ColId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Value at (row position, column id); None when the row is out of
    /// range. A present row with a missing field is Null, not None.
    pub fn value(&self, row: usize, col: &ColId) -> Option<&Value> {
        self.records.get(row).map(|r| r.get(col))
    }
}
