use serde::{Deserialize, Serialize};

/// Stable row identifier, distinct from display position.
///
/// Display indices change under sorting, filtering and across the history
/// timeline; the identifier must not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(pub String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        RowId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        RowId(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        RowId(id)
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable column identifier (the column's accessor key, not its header).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColId(pub String);

impl ColId {
    pub fn new(id: impl Into<String>) -> Self {
        ColId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColId {
    fn from(id: &str) -> Self {
        ColId(id.to_string())
    }
}

impl From<String> for ColId {
    fn from(id: String) -> Self {
        ColId(id)
    }
}

impl std::fmt::Display for ColId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cell address: (row, column) by stable identifiers, never by index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: RowId,
    pub col: ColId,
}

impl CellCoord {
    pub fn new(row: impl Into<RowId>, col: impl Into<ColId>) -> Self {
        CellCoord {
            row: row.into(),
            col: col.into(),
        }
    }
}
