//! The row/column data contract consumed by the models.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

/// Bounds required of a column identifier.
///
/// Implemented for every type that is cloneable, hashable and printable.
pub trait ColumnId: Clone + Eq + Hash + Debug + 'static {}

impl<T: Clone + Eq + Hash + Debug + 'static> ColumnId for T {}

/// A shared comparator for the values of one column.
pub type ColumnComparator<V> = Rc<dyn Fn(&V, &V) -> Ordering>;

/// Comparator for value types with a natural order.
pub fn natural_order<V: Ord + 'static>() -> ColumnComparator<V> {
    Rc::new(|a: &V, b: &V| a.cmp(b))
}

/// Supplies rows and cell data to the models.
///
/// Row indexes are positions in the source's current visible row view.
///
/// # Example
///
/// ```
/// use gridstate::source::{natural_order, ColumnComparator, TableSource};
///
/// struct Numbers(Vec<Option<i64>>);
///
/// impl TableSource<&'static str> for Numbers {
///     type Value = i64;
///
///     fn row_count(&self) -> usize {
///         self.0.len()
///     }
///
///     fn value(&self, row: usize, _column: &&'static str) -> Option<i64> {
///         self.0[row]
///     }
///
///     fn display(&self, row: usize, _column: &&'static str) -> String {
///         self.0[row].map(|n| n.to_string()).unwrap_or_default()
///     }
///
///     fn comparator(&self, _column: &&'static str) -> ColumnComparator<i64> {
///         natural_order()
///     }
/// }
/// ```
pub trait TableSource<C> {
    /// Cell value type.
    type Value;

    /// Number of visible rows.
    fn row_count(&self) -> usize;

    /// The value of a cell, `None` for null.
    fn value(&self, row: usize, column: &C) -> Option<Self::Value>;

    /// The string representation of a cell, as searched.
    fn display(&self, row: usize, column: &C) -> String;

    /// Comparator used when sorting by `column`.
    fn comparator(&self, column: &C) -> ColumnComparator<Self::Value>;

    /// A stable identity for a row, used to keep rows selected across
    /// changes to the underlying data.
    ///
    /// Sources without row identity return `None`; the selection is then
    /// cleared whenever the data changes.
    fn row_key(&self, _row: usize) -> Option<String> {
        None
    }
}

/// A source seen through a row permutation.
///
/// Row `i` of the view is row `order[i]` of the underlying source.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a, S> {
    source: &'a S,
    order: &'a [usize],
}

impl<'a, S> RowView<'a, S> {
    /// Create a view over `source` in the given row order.
    pub fn new(source: &'a S, order: &'a [usize]) -> Self {
        Self { source, order }
    }

    /// Map a view row to the underlying source row.
    pub fn source_row(&self, row: usize) -> Option<usize> {
        self.order.get(row).copied()
    }
}

impl<C, S: TableSource<C>> TableSource<C> for RowView<'_, S> {
    type Value = S::Value;

    fn row_count(&self) -> usize {
        self.order.len()
    }

    fn value(&self, row: usize, column: &C) -> Option<Self::Value> {
        self.source.value(self.order[row], column)
    }

    fn display(&self, row: usize, column: &C) -> String {
        self.source.display(self.order[row], column)
    }

    fn comparator(&self, column: &C) -> ColumnComparator<Self::Value> {
        self.source.comparator(column)
    }

    fn row_key(&self, row: usize) -> Option<String> {
        self.source.row_key(self.order[row])
    }
}
