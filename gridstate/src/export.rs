//! Delimited text export of a table view.

use log::debug;

use crate::source::{ColumnId, TableSource};
use crate::table::Table;

/// Builder for a delimited text export of a [`Table`].
///
/// Columns are the visible ones in display order, followed by the hidden
/// ones in model order when [`hidden`](Self::hidden) is set. Rows are view
/// rows, in view order. Cells are display strings and lines are separated by
/// `\n`.
///
/// # Example
///
/// ```
/// use gridstate::prelude::*;
///
/// struct Letters;
///
/// impl TableSource<&'static str> for Letters {
///     type Value = String;
///
///     fn row_count(&self) -> usize {
///         2
///     }
///
///     fn value(&self, row: usize, column: &&'static str) -> Option<String> {
///         Some(format!("{column}{row}"))
///     }
///
///     fn display(&self, row: usize, column: &&'static str) -> String {
///         format!("{column}{row}")
///     }
///
///     fn comparator(&self, _column: &&'static str) -> ColumnComparator<String> {
///         natural_order()
///     }
/// }
///
/// let specs = vec![ColumnSpec::new("a"), ColumnSpec::new("b")];
/// let table = Table::new(Letters, specs, TableConfig::default()).unwrap();
///
/// assert_eq!(table.export().delimiter(',').get(), "a,b\na0,b0\na1,b1");
/// ```
#[derive(Debug)]
pub struct Export<'a, C, S> {
    table: &'a Table<C, S>,
    delimiter: char,
    header: bool,
    hidden: bool,
    selected: bool,
}

impl<'a, C: ColumnId, S: TableSource<C>> Export<'a, C, S> {
    /// Tab delimited, with a header line, visible columns and all rows.
    pub(crate) fn new(table: &'a Table<C, S>) -> Self {
        Self {
            table,
            delimiter: '\t',
            header: true,
            hidden: false,
            selected: false,
        }
    }

    /// Sets the column delimiter.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the first line holds the column headers.
    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Sets whether hidden columns are appended after the visible ones.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Sets whether only selected rows are exported.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Produce the export.
    pub fn get(&self) -> String {
        let columns = self.table.columns();
        let mut identifiers = columns.visible_columns();
        if self.hidden {
            identifiers.extend(columns.hidden_columns());
        }

        let view = self.table.rows();
        let rows: Vec<usize> = if self.selected {
            self.table
                .selection()
                .indexes()
                .into_iter()
                .filter(|&row| row < view.row_count())
                .collect()
        } else {
            (0..view.row_count()).collect()
        };

        let delimiter = self.delimiter.to_string();
        let mut lines = Vec::with_capacity(rows.len() + 1);
        if self.header {
            let headers: Vec<String> = identifiers
                .iter()
                .map(|id| {
                    columns
                        .spec(id)
                        .map(|spec| spec.header.clone())
                        .unwrap_or_default()
                })
                .collect();
            lines.push(headers.join(&delimiter));
        }
        for row in rows {
            let cells: Vec<String> = identifiers.iter().map(|id| view.display(row, id)).collect();
            lines.push(cells.join(&delimiter));
        }

        debug!(
            "Exported {} lines over {} columns",
            lines.len(),
            identifiers.len()
        );
        lines.join("\n")
    }
}
