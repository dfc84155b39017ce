//! Column visibility and ordering state.

use std::collections::HashMap;

use log::debug;

use crate::error::{Result, TableError};
use crate::event::Event;
use crate::source::ColumnId;

use super::column::{Column, ColumnSpec};

/// Payload of the column moved event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMove<C> {
    /// The column that moved.
    pub identifier: C,
    /// Visible position before the move.
    pub from: usize,
    /// Visible position after the move.
    pub to: usize,
}

/// Owns a fixed universe of columns and tracks which are visible, and in
/// which order.
///
/// Columns live in an arena indexed by model index. The visible order is a
/// list of model indexes; every column not in it is hidden, and each hidden
/// column remembers the visible columns that followed it at the moment it was
/// hidden. Showing a column reinserts it before the first of those that is
/// still visible, which keeps interleaved hide/show sequences stable relative
/// to the columns that did not move.
///
/// # Example
///
/// ```
/// use gridstate::columns::{ColumnModel, ColumnSpec};
///
/// let mut model = ColumnModel::new(["a", "b", "c"].map(ColumnSpec::new)).unwrap();
/// model.set_visible(&"b", false).unwrap();
/// model.set_visible(&"a", false).unwrap();
/// assert_eq!(model.visible_columns(), vec!["c"]);
///
/// model.set_visible(&"a", true).unwrap();
/// assert_eq!(model.visible_columns(), vec!["a", "c"]);
/// ```
#[derive(Debug)]
pub struct ColumnModel<C> {
    specs: Vec<ColumnSpec<C>>,
    index: HashMap<C, usize>,
    /// Model indexes of visible columns, in display order.
    visible: Vec<usize>,
    /// Remembered right neighbors, keyed by the model index of a hidden column.
    right_neighbors: HashMap<usize, Vec<usize>>,
    locked: bool,
    column_hidden: Event<C>,
    column_shown: Event<C>,
    column_moved: Event<ColumnMove<C>>,
    columns_reset: Event<()>,
}

impl<C: ColumnId> ColumnModel<C> {
    /// Create a model with every column visible, in the given order.
    ///
    /// Fails if two columns share an identifier.
    pub fn new(columns: impl IntoIterator<Item = ColumnSpec<C>>) -> Result<Self> {
        let specs: Vec<ColumnSpec<C>> = columns.into_iter().collect();
        let mut index = HashMap::with_capacity(specs.len());
        for (model_index, spec) in specs.iter().enumerate() {
            if index.insert(spec.identifier.clone(), model_index).is_some() {
                return Err(TableError::DuplicateColumn(format!("{:?}", spec.identifier)));
            }
        }

        Ok(Self {
            visible: (0..specs.len()).collect(),
            specs,
            index,
            right_neighbors: HashMap::new(),
            locked: false,
            column_hidden: Event::new(),
            column_shown: Event::new(),
            column_moved: Event::new(),
            columns_reset: Event::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Total number of columns, visible or not.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Check if the model has no columns.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Check if a column with this identifier exists.
    pub fn contains(&self, identifier: &C) -> bool {
        self.index.contains_key(identifier)
    }

    /// Model index of a column.
    pub fn model_index(&self, identifier: &C) -> Result<usize> {
        self.index
            .get(identifier)
            .copied()
            .ok_or_else(|| TableError::column_not_found(identifier))
    }

    /// The definition a column was created with.
    pub fn spec(&self, identifier: &C) -> Result<&ColumnSpec<C>> {
        self.model_index(identifier).map(|i| &self.specs[i])
    }

    /// Snapshot of a column.
    pub fn column(&self, identifier: &C) -> Result<Column<C>> {
        self.model_index(identifier).map(|i| self.snapshot(i))
    }

    /// Snapshots of every column, in model order.
    pub fn columns(&self) -> Vec<Column<C>> {
        (0..self.specs.len()).map(|i| self.snapshot(i)).collect()
    }

    /// Identifier of the visible column at `position`.
    pub fn identifier(&self, position: usize) -> Result<&C> {
        self.visible
            .get(position)
            .map(|&i| &self.specs[i].identifier)
            .ok_or(TableError::PositionOutOfRange {
                position,
                count: self.visible.len(),
            })
    }

    /// Identifier of the column at `model_index`.
    pub fn identifier_at_model_index(&self, model_index: usize) -> Result<&C> {
        self.specs
            .get(model_index)
            .map(|spec| &spec.identifier)
            .ok_or(TableError::ModelIndexOutOfRange {
                index: model_index,
                count: self.specs.len(),
            })
    }

    /// Visible position of a column, `None` when hidden.
    pub fn position(&self, identifier: &C) -> Result<Option<usize>> {
        let model_index = self.model_index(identifier)?;
        Ok(self.visible.iter().position(|&i| i == model_index))
    }

    /// Check if a column is visible.
    pub fn is_visible(&self, identifier: &C) -> Result<bool> {
        self.position(identifier).map(|position| position.is_some())
    }

    /// Identifiers of visible columns, in display order.
    pub fn visible_columns(&self) -> Vec<C> {
        self.visible_identifiers().cloned().collect()
    }

    /// Iterate visible column identifiers in display order.
    pub fn visible_identifiers(&self) -> impl Iterator<Item = &C> + '_ {
        self.visible.iter().map(|&i| &self.specs[i].identifier)
    }

    /// Identifiers of hidden columns, in model order.
    pub fn hidden_columns(&self) -> Vec<C> {
        (0..self.specs.len())
            .filter(|i| self.right_neighbors.contains_key(i))
            .map(|i| self.specs[i].identifier.clone())
            .collect()
    }

    /// Number of visible columns.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    // -------------------------------------------------------------------------
    // Locking
    // -------------------------------------------------------------------------

    /// Whether visibility changes are currently rejected.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Lock or unlock visibility changes. Reordering is never locked.
    pub fn set_locked(&mut self, locked: bool) {
        if self.locked != locked {
            debug!("Column model {}", if locked { "locked" } else { "unlocked" });
            self.locked = locked;
        }
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Show or hide a column.
    ///
    /// Returns true if the visibility changed. Repeating the current
    /// visibility is a no-op. Fails if the model is locked.
    pub fn set_visible(&mut self, identifier: &C, visible: bool) -> Result<bool> {
        let model_index = self.model_index(identifier)?;
        if self.locked {
            return Err(TableError::columns_locked(identifier));
        }

        let changed = if visible {
            self.show(model_index)
        } else {
            self.hide(model_index)
        };
        Ok(changed)
    }

    /// Move the visible column at position `from` to position `to`.
    ///
    /// Allowed while locked.
    pub fn move_column(&mut self, from: usize, to: usize) -> Result<()> {
        let count = self.visible.len();
        for position in [from, to] {
            if position >= count {
                return Err(TableError::PositionOutOfRange { position, count });
            }
        }
        self.move_position(from, to);
        Ok(())
    }

    /// Make exactly `identifiers` visible, in that order.
    ///
    /// Every other column is hidden. Fails if the model is locked, if an
    /// identifier is unknown or if one is listed twice; nothing changes on
    /// failure.
    pub fn set_visible_columns(&mut self, identifiers: &[C]) -> Result<()> {
        let mut wanted = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            let model_index = self.model_index(identifier)?;
            if wanted.contains(&model_index) {
                return Err(TableError::DuplicateColumn(format!("{identifier:?}")));
            }
            wanted.push(model_index);
        }
        if self.locked {
            let identifier = identifiers
                .first()
                .map(|id| format!("{id:?}"))
                .unwrap_or_default();
            return Err(TableError::ColumnsLocked(identifier));
        }

        let to_hide: Vec<usize> = self
            .visible
            .iter()
            .copied()
            .filter(|i| !wanted.contains(i))
            .collect();
        for model_index in to_hide {
            self.hide(model_index);
        }
        for &model_index in &wanted {
            self.show(model_index);
        }
        for (target, &model_index) in wanted.iter().enumerate() {
            if let Some(current) = self.visible.iter().position(|&i| i == model_index) {
                self.move_position(current, target);
            }
        }
        Ok(())
    }

    /// Restore the original order with every column visible.
    ///
    /// Discards all remembered neighbor sets. Fires `column_shown` for each
    /// column that was hidden, then `columns_reset`. Fails if the model is
    /// locked while any column is hidden.
    pub fn reset(&mut self) -> Result<()> {
        let hidden: Vec<usize> = (0..self.specs.len())
            .filter(|i| self.right_neighbors.contains_key(i))
            .collect();
        if self.locked
            && let Some(&first) = hidden.first()
        {
            return Err(TableError::columns_locked(&self.specs[first].identifier));
        }

        self.right_neighbors.clear();
        self.visible = (0..self.specs.len()).collect();
        debug!("Column model reset, {} columns shown", hidden.len());

        for model_index in hidden {
            self.column_shown.emit(&self.specs[model_index].identifier);
        }
        self.columns_reset.emit(&());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Fired once each time a column goes from visible to hidden.
    pub fn column_hidden(&self) -> &Event<C> {
        &self.column_hidden
    }

    /// Fired once each time a column goes from hidden to visible.
    pub fn column_shown(&self) -> &Event<C> {
        &self.column_shown
    }

    /// Fired when a visible column changes position.
    pub fn column_moved(&self) -> &Event<ColumnMove<C>> {
        &self.column_moved
    }

    /// Fired after [`reset`](Self::reset).
    pub fn columns_reset(&self) -> &Event<()> {
        &self.columns_reset
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn hide(&mut self, model_index: usize) -> bool {
        let Some(position) = self.visible.iter().position(|&i| i == model_index) else {
            return false;
        };

        let neighbors = self.visible[position + 1..].to_vec();
        self.visible.remove(position);
        self.right_neighbors.insert(model_index, neighbors);

        let identifier = &self.specs[model_index].identifier;
        debug!("Column {:?} hidden at position {}", identifier, position);
        self.column_hidden.emit(identifier);
        true
    }

    fn show(&mut self, model_index: usize) -> bool {
        let Some(neighbors) = self.right_neighbors.remove(&model_index) else {
            return false;
        };

        let position = self
            .visible
            .iter()
            .position(|i| neighbors.contains(i))
            .unwrap_or(self.visible.len());
        self.visible.insert(position, model_index);

        let identifier = &self.specs[model_index].identifier;
        debug!("Column {:?} shown at position {}", identifier, position);
        self.column_shown.emit(identifier);
        true
    }

    fn move_position(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        let model_index = self.visible.remove(from);
        self.visible.insert(to, model_index);

        let identifier = self.specs[model_index].identifier.clone();
        debug!("Column {:?} moved from {} to {}", identifier, from, to);
        self.column_moved.emit(&ColumnMove {
            identifier,
            from,
            to,
        });
    }

    fn snapshot(&self, model_index: usize) -> Column<C> {
        let spec = &self.specs[model_index];
        let right_neighbors = self
            .right_neighbors
            .get(&model_index)
            .map(|neighbors| {
                neighbors
                    .iter()
                    .map(|&i| self.specs[i].identifier.clone())
                    .collect()
            })
            .unwrap_or_default();

        Column {
            identifier: spec.identifier.clone(),
            header: spec.header.clone(),
            model_index,
            position: self.visible.iter().position(|&i| i == model_index),
            right_neighbors,
            locked: self.locked,
        }
    }
}
