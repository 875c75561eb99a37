use serde::{Deserialize, Serialize};

use crate::coord::CellCoord;
use crate::index::GridIndex;

/// A rectangular block of grid positions, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBounds {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl RangeBounds {
    /// Create a new range, automatically normalizing so start <= end.
    pub fn new(r1: usize, c1: usize, r2: usize, c2: usize) -> Self {
        Self {
            start_row: r1.min(r2),
            start_col: c1.min(c2),
            end_row: r1.max(r2),
            end_col: c1.max(c2),
        }
    }

    /// Create a single-cell range.
    pub fn single(row: usize, col: usize) -> Self {
        Self {
            start_row: row,
            start_col: col,
            end_row: row,
            end_col: col,
        }
    }

    /// Check if this range contains a position.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.start_row && row <= self.end_row && col >= self.start_col && col <= self.end_col
    }

    pub fn row_count(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    pub fn col_count(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    /// Number of cells in this range.
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.col_count()
    }

    /// Check if this is a single cell.
    pub fn is_single(&self) -> bool {
        self.start_row == self.end_row && self.start_col == self.end_col
    }
}

/// Keys the selection model reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
}

impl Key {
    /// Map a DOM-style key name ("ArrowDown", "Escape") to a selection key.
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }

    fn delta(self) -> (isize, isize) {
        match self {
            Key::ArrowUp => (-1, 0),
            Key::ArrowDown => (1, 0),
            Key::ArrowLeft => (0, -1),
            Key::ArrowRight => (0, 1),
            Key::Escape => (0, 0),
        }
    }
}

/// A keyboard event as the embedding application dispatches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    /// Build from a DOM-style key name; None for keys the selection
    /// model does not handle.
    pub fn named(name: &str) -> Option<Self> {
        Key::from_name(name).map(Self::new)
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Current selection: nothing, one active cell, or a rectangle between a
/// fixed anchor and a moving focus.
///
/// A range's rectangular extent is recomputed against the current index on
/// every query - the visible ordering can change between selection start
/// and read, so it is never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Cell(CellCoord),
    Range { anchor: CellCoord, focus: CellCoord },
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// The cell keyboard moves and pastes are keyed off: the active cell,
    /// or a range's anchor.
    pub fn active(&self) -> Option<&CellCoord> {
        match self {
            Selection::None => None,
            Selection::Cell(coord) => Some(coord),
            Selection::Range { anchor, .. } => Some(anchor),
        }
    }
}

/// The selection model: tracks the active cell / range and applies the
/// pointer and keyboard transition rules.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selection: Selection,
    dragging: bool,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Explicit deselect.
    pub fn clear(&mut self) {
        self.selection = Selection::None;
        self.dragging = false;
    }

    /// Set the selection to a single cell (click); clears any range.
    pub fn click(&mut self, coord: CellCoord) {
        self.selection = Selection::Cell(coord);
        self.dragging = false;
    }

    /// Start a pending range with anchor = focus = coord.
    pub fn mouse_down(&mut self, coord: CellCoord) {
        self.selection = Selection::Range {
            anchor: coord.clone(),
            focus: coord,
        };
        self.dragging = true;
    }

    /// Extend the pending range to coord; the anchor is never altered
    /// mid-drag. Ignored when no drag is in progress.
    pub fn mouse_enter(&mut self, coord: CellCoord) {
        if !self.dragging {
            return;
        }
        if let Selection::Range { focus, .. } = &mut self.selection {
            *focus = coord;
        }
    }

    /// End the drag; the range (possibly 1x1) stays selected.
    pub fn mouse_up(&mut self) {
        self.dragging = false;
    }

    /// Apply a keyboard event against the current visible ordering.
    ///
    /// Arrows move the active cell by one step, clamped at the grid edges
    /// (no wraparound). Shift+Arrow extends a range anchored at the prior
    /// active cell. Escape collapses a range back to its anchor, or clears
    /// a lone active cell.
    pub fn key_down(&mut self, event: KeyEvent, index: &GridIndex) {
        match event.key {
            Key::Escape => self.collapse(),
            key => {
                let (d_row, d_col) = key.delta();
                if event.shift {
                    self.extend_by(d_row, d_col, index);
                } else {
                    self.move_by(d_row, d_col, index);
                }
            }
        }
    }

    /// Check if a cell is the active cell - O(1).
    pub fn is_cell_active(&self, coord: &CellCoord) -> bool {
        self.selection.active() == Some(coord)
    }

    /// Check if a cell falls inside the selected rectangle - O(1) per
    /// query. A 1x1 range answers exactly like an active cell.
    pub fn is_cell_in_range(&self, coord: &CellCoord, index: &GridIndex) -> bool {
        let Some(bounds) = self.range_bounds(index) else {
            return false;
        };
        match index.position(coord) {
            Some((row, col)) => bounds.contains(row, col),
            None => false,
        }
    }

    /// The normalized rectangle of the current selection in the current
    /// visible ordering; None when nothing is selected or a coordinate has
    /// gone stale.
    pub fn range_bounds(&self, index: &GridIndex) -> Option<RangeBounds> {
        match &self.selection {
            Selection::None => None,
            Selection::Cell(coord) => {
                let (row, col) = index.position(coord)?;
                Some(RangeBounds::single(row, col))
            }
            Selection::Range { anchor, focus } => {
                let (anchor_row, anchor_col) = index.position(anchor)?;
                let (focus_row, focus_col) = index.position(focus)?;
                Some(RangeBounds::new(
                    anchor_row, anchor_col, focus_row, focus_col,
                ))
            }
        }
    }

    /// Degrade the selection to None when its coordinates no longer
    /// resolve (row/column removed by an external sort, filter or reload).
    pub fn reconcile(&mut self, index: &GridIndex) {
        let valid = match &self.selection {
            Selection::None => true,
            Selection::Cell(coord) => index.contains(coord),
            Selection::Range { anchor, focus } => index.contains(anchor) && index.contains(focus),
        };
        if !valid {
            self.clear();
        }
    }

    fn collapse(&mut self) {
        self.dragging = false;
        self.selection = match std::mem::take(&mut self.selection) {
            Selection::Range { anchor, .. } => Selection::Cell(anchor),
            _ => Selection::None,
        };
    }

    /// Move the active cell by delta, collapsing any range to the result.
    fn move_by(&mut self, d_row: isize, d_col: isize, index: &GridIndex) {
        let Some(base) = self.selection.active().cloned() else {
            return;
        };
        match Self::step(&base, d_row, d_col, index) {
            Some(coord) => self.selection = Selection::Cell(coord),
            // Stale coordinate underneath the selection
            None => self.clear(),
        }
    }

    /// Extend the selection by delta from the current focus, creating a
    /// range anchored at the active cell if none exists yet.
    fn extend_by(&mut self, d_row: isize, d_col: isize, index: &GridIndex) {
        let (anchor, focus) = match &self.selection {
            Selection::None => return,
            Selection::Cell(coord) => (coord.clone(), coord.clone()),
            Selection::Range { anchor, focus } => (anchor.clone(), focus.clone()),
        };
        match Self::step(&focus, d_row, d_col, index) {
            Some(new_focus) => {
                self.selection = Selection::Range {
                    anchor,
                    focus: new_focus,
                }
            }
            None => self.clear(),
        }
    }

    /// One step from coord in the visible ordering, clamped at the edges.
    /// None when the coordinate no longer resolves.
    fn step(coord: &CellCoord, d_row: isize, d_col: isize, index: &GridIndex) -> Option<CellCoord> {
        let (row, col) = index.position(coord)?;
        let new_row = (row as isize + d_row).clamp(0, index.row_count() as isize - 1) as usize;
        let new_col = (col as isize + d_col).clamp(0, index.col_count() as isize - 1) as usize;
        Some(CellCoord {
            row: index.row_id(new_row)?.clone(),
            col: index.col_id(new_col)?.clone(),
        })
    }
}
