//! Selected rows of a table view.

use std::collections::BTreeSet;

use crate::event::Event;

/// Tracks selected rows by view index.
///
/// Fires `selection_changed` with the sorted selected indexes whenever the
/// set actually changes.
#[derive(Debug, Default)]
pub struct RowSelection {
    selected: BTreeSet<usize>,
    selection_changed: Event<Vec<usize>>,
}

impl RowSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected rows in ascending order.
    pub fn indexes(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    /// Check if a row is selected.
    pub fn is_selected(&self, row: usize) -> bool {
        self.selected.contains(&row)
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Replace the selection with a single row.
    pub fn set_single(&mut self, row: usize) {
        if self.selected.len() == 1 && self.selected.contains(&row) {
            return;
        }
        self.selected.clear();
        self.selected.insert(row);
        self.notify();
    }

    /// Replace the selection with `rows`.
    pub fn set(&mut self, rows: impl IntoIterator<Item = usize>) {
        let rows: BTreeSet<usize> = rows.into_iter().collect();
        if rows != self.selected {
            self.selected = rows;
            self.notify();
        }
    }

    /// Add a row to the selection.
    pub fn add(&mut self, row: usize) {
        if self.selected.insert(row) {
            self.notify();
        }
    }

    /// Remove a row from the selection.
    pub fn remove(&mut self, row: usize) {
        if self.selected.remove(&row) {
            self.notify();
        }
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.notify();
        }
    }

    /// Drop selected rows at or beyond `row_count`.
    pub fn truncate(&mut self, row_count: usize) {
        if self.selected.range(row_count..).next().is_some() {
            self.selected.retain(|&row| row < row_count);
            self.notify();
        }
    }

    /// Fired with the new selection after every change.
    pub fn selection_changed(&self) -> &Event<Vec<usize>> {
        &self.selection_changed
    }

    fn notify(&self) {
        self.selection_changed.emit(&self.indexes());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_notifies_only_on_change() {
        let mut selection = RowSelection::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = selection
            .selection_changed()
            .subscribe(move |rows| sink.borrow_mut().push(rows.clone()));

        selection.set_single(2);
        selection.set_single(2);
        selection.add(5);
        selection.add(5);
        selection.set([5, 2]);
        selection.remove(9);
        selection.clear();
        selection.clear();

        assert_eq!(*seen.borrow(), vec![vec![2], vec![2, 5], vec![]]);
    }

    #[test]
    fn test_truncate_drops_rows_past_end() {
        let mut selection = RowSelection::new();
        selection.set([0, 3, 4]);

        selection.truncate(5);
        assert_eq!(selection.indexes(), vec![0, 3, 4]);

        selection.truncate(4);
        assert_eq!(selection.indexes(), vec![0, 3]);
        assert!(selection.is_selected(3));
        assert_eq!(selection.len(), 2);
    }
}
