//! Incremental search over the visible grid.

use log::{debug, trace};

use crate::columns::ColumnModel;
use crate::event::{Event, Value};
use crate::selection::RowSelection;
use crate::source::{ColumnId, TableSource};

use super::predicate::SearchPredicate;

/// A matching cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchResult {
    /// Visible row index.
    pub row: usize,
    /// Visible column position.
    pub column: usize,
}

impl SearchResult {
    /// Create a result.
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// What a search scans: the visible columns of a column model and the
/// visible rows of a source.
#[derive(Debug)]
pub struct SearchScope<'a, C, S> {
    columns: &'a ColumnModel<C>,
    source: &'a S,
}

impl<'a, C, S> SearchScope<'a, C, S> {
    /// Create a scope.
    pub fn new(columns: &'a ColumnModel<C>, source: &'a S) -> Self {
        Self { columns, source }
    }
}

impl<C, S> Clone for SearchScope<'_, C, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, S> Copy for SearchScope<'_, C, S> {}

/// Search inputs, the results they produce and a cursor over those results.
///
/// Results are recomputed by every setter that changes the predicate, and by
/// [`perform_search`](Self::perform_search), which the owner calls when the
/// visible rows change. The cursor wraps in both directions.
#[derive(Debug)]
pub struct SearchModel {
    search_string: String,
    case_sensitive: bool,
    regular_expression: bool,
    predicate: Option<SearchPredicate>,
    results: Vec<SearchResult>,
    cursor: Option<usize>,
    current: Value<Option<SearchResult>>,
    results_changed: Event<usize>,
}

impl Default for SearchModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchModel {
    /// Create a case insensitive plain text search model.
    pub fn new() -> Self {
        Self::with_options(false, false)
    }

    /// Create a search model with the given modes.
    pub fn with_options(case_sensitive: bool, regular_expression: bool) -> Self {
        Self {
            search_string: String::new(),
            case_sensitive,
            regular_expression,
            predicate: None,
            results: Vec::new(),
            cursor: None,
            current: Value::new(None),
            results_changed: Event::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// The current search text.
    pub fn search_string(&self) -> &str {
        &self.search_string
    }

    /// Whether case is significant.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Whether the search text is a regular expression.
    pub fn is_regular_expression(&self) -> bool {
        self.regular_expression
    }

    /// The active predicate, `None` when searching is off.
    pub fn predicate(&self) -> Option<&SearchPredicate> {
        self.predicate.as_ref()
    }

    /// Matches of the last search, row-major.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// The result under the cursor, `None` when no result is selected.
    pub fn current(&self) -> &Value<Option<SearchResult>> {
        &self.current
    }

    /// Fired with the result count whenever the results change.
    pub fn results_changed(&self) -> &Event<usize> {
        &self.results_changed
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Set the search text and search again.
    pub fn set_search_string<C: ColumnId, S: TableSource<C>>(
        &mut self,
        text: impl Into<String>,
        scope: &SearchScope<'_, C, S>,
    ) {
        let text = text.into();
        if text == self.search_string {
            return;
        }
        self.search_string = text;
        self.rebuild_predicate();
        self.perform_search(scope);
    }

    /// Set case sensitivity and search again.
    pub fn set_case_sensitive<C: ColumnId, S: TableSource<C>>(
        &mut self,
        case_sensitive: bool,
        scope: &SearchScope<'_, C, S>,
    ) {
        if case_sensitive == self.case_sensitive {
            return;
        }
        self.case_sensitive = case_sensitive;
        self.rebuild_predicate();
        self.perform_search(scope);
    }

    /// Switch between plain text and regular expression mode.
    ///
    /// Clears the search text.
    pub fn set_regular_expression(&mut self, regular_expression: bool) {
        if regular_expression == self.regular_expression {
            return;
        }
        self.regular_expression = regular_expression;
        self.clear_search_string();
    }

    /// Clear the search text, and with it the results.
    pub fn clear_search_string(&mut self) {
        self.search_string.clear();
        self.predicate = None;
        self.set_results(Vec::new());
    }

    /// React to columns being hidden, shown, moved or reset.
    ///
    /// Result coordinates refer to visible column positions, so the search
    /// is discarded.
    pub fn columns_changed(&mut self) {
        if !self.search_string.is_empty() {
            debug!("Columns changed, clearing search {:?}", self.search_string);
            self.clear_search_string();
        }
    }

    fn rebuild_predicate(&mut self) {
        self.predicate = SearchPredicate::build(
            &self.search_string,
            self.case_sensitive,
            self.regular_expression,
        );
    }

    // -------------------------------------------------------------------------
    // Searching
    // -------------------------------------------------------------------------

    /// Recompute the results against `scope`.
    ///
    /// Scans visible rows in order and, within each row, visible columns in
    /// display order. Resets the cursor.
    pub fn perform_search<C: ColumnId, S: TableSource<C>>(&mut self, scope: &SearchScope<'_, C, S>) {
        let results = match &self.predicate {
            Some(predicate) => scan(predicate, scope),
            None => Vec::new(),
        };
        trace!(
            "Search {:?} found {} results",
            self.search_string,
            results.len()
        );
        self.set_results(results);
    }

    /// First match at or after `from_row`, wrapping to the top.
    ///
    /// Leaves the results and cursor alone.
    pub fn find_next<C: ColumnId, S: TableSource<C>>(
        &self,
        scope: &SearchScope<'_, C, S>,
        from_row: usize,
    ) -> Option<SearchResult> {
        let predicate = self.predicate.as_ref()?;
        let columns: Vec<&C> = scope.columns.visible_identifiers().collect();
        let rows = scope.source.row_count();
        if rows == 0 || columns.is_empty() {
            return None;
        }

        let start = from_row.min(rows - 1);
        (0..rows)
            .map(|offset| (start + offset) % rows)
            .find_map(|row| {
                columns
                    .iter()
                    .position(|column| predicate.test(&scope.source.display(row, column)))
                    .map(|column| SearchResult::new(row, column))
            })
    }

    /// Last match at or before `from_row`, wrapping to the bottom.
    ///
    /// Within a row the rightmost matching column wins. Leaves the results
    /// and cursor alone.
    pub fn find_previous<C: ColumnId, S: TableSource<C>>(
        &self,
        scope: &SearchScope<'_, C, S>,
        from_row: usize,
    ) -> Option<SearchResult> {
        let predicate = self.predicate.as_ref()?;
        let columns: Vec<&C> = scope.columns.visible_identifiers().collect();
        let rows = scope.source.row_count();
        if rows == 0 || columns.is_empty() {
            return None;
        }

        let start = from_row.min(rows - 1);
        (0..rows)
            .map(|offset| (start + rows - offset) % rows)
            .find_map(|row| {
                columns
                    .iter()
                    .rposition(|column| predicate.test(&scope.source.display(row, column)))
                    .map(|column| SearchResult::new(row, column))
            })
    }

    fn set_results(&mut self, results: Vec<SearchResult>) {
        let changed = results != self.results;
        self.results = results;
        self.cursor = None;
        self.current.set(None);
        if changed {
            self.results_changed.emit(&self.results.len());
        }
    }

    // -------------------------------------------------------------------------
    // Cursor
    // -------------------------------------------------------------------------

    /// Move to the next result and select only its row.
    ///
    /// Clears the selection when there are no results.
    pub fn next(&mut self, selection: &mut RowSelection) -> Option<SearchResult> {
        self.replace_selection(true, selection)
    }

    /// Move to the previous result and select only its row.
    ///
    /// Clears the selection when there are no results.
    pub fn previous(&mut self, selection: &mut RowSelection) -> Option<SearchResult> {
        self.replace_selection(false, selection)
    }

    /// Move to the next result and add its row to the selection.
    pub fn select_next(&mut self, selection: &mut RowSelection) -> Option<SearchResult> {
        self.extend_selection(true, selection)
    }

    /// Move to the previous result and add its row to the selection.
    pub fn select_previous(&mut self, selection: &mut RowSelection) -> Option<SearchResult> {
        self.extend_selection(false, selection)
    }

    fn replace_selection(
        &mut self,
        forward: bool,
        selection: &mut RowSelection,
    ) -> Option<SearchResult> {
        match self.advance(forward) {
            Some(result) => {
                selection.set_single(result.row);
                Some(result)
            }
            None => {
                selection.clear();
                None
            }
        }
    }

    fn extend_selection(
        &mut self,
        forward: bool,
        selection: &mut RowSelection,
    ) -> Option<SearchResult> {
        let result = self.advance(forward)?;
        selection.add(result.row);
        Some(result)
    }

    fn advance(&mut self, forward: bool) -> Option<SearchResult> {
        let len = self.results.len();
        if len == 0 {
            return None;
        }

        let index = match (self.cursor, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(index), true) => (index + 1) % len,
            (Some(index), false) => (index + len - 1) % len,
        };
        self.cursor = Some(index);

        let result = self.results[index];
        self.current.set(Some(result));
        Some(result)
    }
}

fn scan<C: ColumnId, S: TableSource<C>>(
    predicate: &SearchPredicate,
    scope: &SearchScope<'_, C, S>,
) -> Vec<SearchResult> {
    let columns: Vec<&C> = scope.columns.visible_identifiers().collect();
    if columns.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for row in 0..scope.source.row_count() {
        for (position, column) in columns.iter().enumerate() {
            if predicate.test(&scope.source.display(row, column)) {
                results.push(SearchResult::new(row, position));
            }
        }
    }
    results
}
