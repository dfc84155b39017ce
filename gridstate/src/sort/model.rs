//! Multi-key sort state.

use std::cmp::Ordering;
use std::collections::HashSet;

use log::debug;

use crate::columns::ColumnSpec;
use crate::error::{Result, TableError};
use crate::event::Event;
use crate::source::{ColumnComparator, ColumnId, TableSource};

use super::order::{SortKey, SortOrder};

/// Ordered list of active sort keys over a fixed set of columns.
///
/// Keys are ranked by priority: the first key decides, later keys break
/// ties. A column appears at most once.
///
/// # Example
///
/// ```
/// use gridstate::sort::{SortModel, SortOrder};
///
/// let mut sort = SortModel::new(["name", "age"]);
/// sort.set_sort_order(&"name", SortOrder::Ascending).unwrap();
/// sort.add_sort_order(&"age", SortOrder::Descending).unwrap();
///
/// assert_eq!(sort.sort_priority(&"age").unwrap(), Some(1));
/// ```
#[derive(Debug)]
pub struct SortModel<C> {
    columns: HashSet<C>,
    keys: Vec<(C, SortOrder)>,
    disabled: HashSet<C>,
    sorting_changed: Event<C>,
}

impl<C: ColumnId> SortModel<C> {
    /// Create a sort model over the given columns, all sortable.
    pub fn new(columns: impl IntoIterator<Item = C>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            keys: Vec::new(),
            disabled: HashSet::new(),
            sorting_changed: Event::new(),
        }
    }

    /// Create a sort model honouring each spec's `sortable` flag.
    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a ColumnSpec<C>>) -> Self {
        let mut model = Self::new(std::iter::empty());
        for spec in specs {
            model.columns.insert(spec.identifier.clone());
            if !spec.sortable {
                model.disabled.insert(spec.identifier.clone());
            }
        }
        model
    }

    fn check_exists(&self, identifier: &C) -> Result<()> {
        if self.columns.contains(identifier) {
            Ok(())
        } else {
            Err(TableError::column_not_found(identifier))
        }
    }

    fn check_enabled(&self, identifier: &C) -> Result<()> {
        self.check_exists(identifier)?;
        if self.disabled.contains(identifier) {
            return Err(TableError::sorting_disabled(identifier));
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Active keys in priority order.
    pub fn column_sort_order(&self) -> Vec<SortKey<C>> {
        self.keys
            .iter()
            .enumerate()
            .map(|(priority, (identifier, order))| SortKey {
                identifier: identifier.clone(),
                order: *order,
                priority,
            })
            .collect()
    }

    /// Direction of a column, [`SortOrder::Unsorted`] when inactive.
    pub fn sort_order(&self, identifier: &C) -> Result<SortOrder> {
        self.check_exists(identifier)?;
        Ok(self
            .keys
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, order)| *order)
            .unwrap_or(SortOrder::Unsorted))
    }

    /// Priority of a column, `None` when inactive.
    pub fn sort_priority(&self, identifier: &C) -> Result<Option<usize>> {
        self.check_exists(identifier)?;
        Ok(self.keys.iter().position(|(id, _)| id == identifier))
    }

    /// Whether any key is active.
    pub fn is_sorted(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Whether a column accepts sort keys.
    pub fn is_sorting_enabled(&self, identifier: &C) -> Result<bool> {
        self.check_exists(identifier)?;
        Ok(!self.disabled.contains(identifier))
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Make `identifier` the only key, or clear all keys when `order` is
    /// unsorted.
    pub fn set_sort_order(&mut self, identifier: &C, order: SortOrder) -> Result<()> {
        self.check_enabled(identifier)?;

        self.keys.clear();
        if order.is_sorted() {
            self.keys.push((identifier.clone(), order));
        }
        debug!("Sort order set: {:?} {:?}", identifier, order);
        self.sorting_changed.emit(identifier);
        Ok(())
    }

    /// Add or update `identifier` as a key.
    ///
    /// An active key keeps its priority; a new key goes last. An unsorted
    /// order removes the key.
    pub fn add_sort_order(&mut self, identifier: &C, order: SortOrder) -> Result<()> {
        self.check_enabled(identifier)?;

        match self.keys.iter().position(|(id, _)| id == identifier) {
            Some(priority) if order.is_sorted() => self.keys[priority].1 = order,
            Some(priority) => {
                self.keys.remove(priority);
            }
            None if order.is_sorted() => self.keys.push((identifier.clone(), order)),
            None => {}
        }
        debug!("Sort order added: {:?} {:?}", identifier, order);
        self.sorting_changed.emit(identifier);
        Ok(())
    }

    /// Advance a column to its next order, as a header click does.
    ///
    /// With `add` the column is updated alongside the other keys, otherwise
    /// it becomes the only key. Returns the order applied.
    pub fn toggle_sort_order(&mut self, identifier: &C, add: bool) -> Result<SortOrder> {
        let next = self.sort_order(identifier)?.next();
        if add {
            self.add_sort_order(identifier, next)?;
        } else {
            self.set_sort_order(identifier, next)?;
        }
        Ok(next)
    }

    /// Deactivate every key.
    ///
    /// Fires a single `sorting_changed` carrying the column that was first in
    /// priority, and nothing if no key was active.
    pub fn clear(&mut self) {
        if self.keys.is_empty() {
            return;
        }
        let (first, _) = self.keys.remove(0);
        self.keys.clear();
        debug!("Sort order cleared");
        self.sorting_changed.emit(&first);
    }

    /// Enable or disable sorting on a column.
    ///
    /// Disabling an active column removes its key.
    pub fn set_sorting_enabled(&mut self, identifier: &C, enabled: bool) -> Result<()> {
        self.check_exists(identifier)?;

        if enabled {
            self.disabled.remove(identifier);
            return Ok(());
        }

        self.disabled.insert(identifier.clone());
        if let Some(priority) = self.keys.iter().position(|(id, _)| id == identifier) {
            self.keys.remove(priority);
            debug!("Sorting disabled for active column {:?}", identifier);
            self.sorting_changed.emit(identifier);
        }
        Ok(())
    }

    /// Fired after any change of the active keys, with the column involved.
    pub fn sorting_changed(&self) -> &Event<C> {
        &self.sorting_changed
    }

    // -------------------------------------------------------------------------
    // Comparison
    // -------------------------------------------------------------------------

    /// Build a comparator over rows of `source` for the current keys.
    ///
    /// Column comparators are fetched from the source once, when the
    /// comparator is built.
    pub fn comparator<'a, S: TableSource<C>>(&self, source: &'a S) -> RowComparator<'a, C, S> {
        let keys = self
            .keys
            .iter()
            .map(|(identifier, order)| {
                let comparator = source.comparator(identifier);
                (identifier.clone(), *order, comparator)
            })
            .collect();
        RowComparator { source, keys }
    }

    /// Stable-sort row indexes of `source` by the current keys.
    pub fn sort_rows<S: TableSource<C>>(&self, source: &S, rows: &mut [usize]) {
        if self.keys.is_empty() {
            return;
        }
        let comparator = self.comparator(source);
        rows.sort_by(|&a, &b| comparator.compare(a, b));
    }
}

/// Compares rows of a source by a fixed list of sort keys.
pub struct RowComparator<'a, C, S: TableSource<C>> {
    source: &'a S,
    keys: Vec<(C, SortOrder, ColumnComparator<S::Value>)>,
}

impl<C, S: TableSource<C>> RowComparator<'_, C, S> {
    /// Compare two rows.
    ///
    /// Nulls sort before values. Descending keys reverse the whole
    /// comparison, nulls included.
    pub fn compare(&self, a: usize, b: usize) -> Ordering {
        for (identifier, order, comparator) in &self.keys {
            let ordering = match (
                self.source.value(a, identifier),
                self.source.value(b, identifier),
            ) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(left), Some(right)) => comparator(&left, &right),
            };
            let ordering = match order {
                SortOrder::Descending => ordering.reverse(),
                _ => ordering,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl<C: std::fmt::Debug, S: TableSource<C>> std::fmt::Debug for RowComparator<'_, C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<(&C, &SortOrder)> = self.keys.iter().map(|(c, o, _)| (c, o)).collect();
        f.debug_struct("RowComparator").field("keys", &keys).finish()
    }
}
