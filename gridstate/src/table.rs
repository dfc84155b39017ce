//! The table controller.

use std::collections::HashSet;

use log::debug;

use crate::columns::{ColumnModel, ColumnSpec};
use crate::condition::ConditionPanelGroup;
use crate::config::TableConfig;
use crate::error::{Result, TableError};
use crate::export::Export;
use crate::search::{SearchModel, SearchResult, SearchScope};
use crate::selection::RowSelection;
use crate::sort::{SortModel, SortOrder};
use crate::source::{ColumnId, RowView, TableSource};

/// Owns the models, a data source and the selection, and keeps them in step.
///
/// Rows are presented through a sorted view: view row `i` is source row
/// `view()[i]`. Search results and the selection use view rows. Every
/// mutation that changes the visible rows or columns re-runs the search
/// before returning.
///
/// Mutate the source through [`update_source`](Self::update_source) so the
/// view is rebuilt afterwards.
#[derive(Debug)]
pub struct Table<C, S> {
    source: S,
    config: TableConfig,
    columns: ColumnModel<C>,
    sort: SortModel<C>,
    search: SearchModel,
    conditions: ConditionPanelGroup<C>,
    selection: RowSelection,
    view: Vec<usize>,
    header_sorting_enabled: bool,
}

impl<C: ColumnId, S: TableSource<C>> Table<C, S> {
    /// Create a table over `source` with the given columns.
    ///
    /// Fails if two columns share an identifier.
    pub fn new(source: S, columns: Vec<ColumnSpec<C>>, config: TableConfig) -> Result<Self> {
        let sort = SortModel::from_specs(&columns);
        let conditions = ConditionPanelGroup::new(
            columns.iter().map(|spec| spec.identifier.clone()),
            config.condition_state,
        )?;
        let mut column_model = ColumnModel::new(columns)?;
        column_model.set_locked(config.columns_locked);
        let header_sorting_enabled = config.header_sorting_enabled;

        let view = (0..source.row_count()).collect();
        Ok(Self {
            source,
            search: SearchModel::with_options(
                config.case_sensitive_search,
                config.regular_expression_search,
            ),
            config,
            columns: column_model,
            sort,
            conditions,
            selection: RowSelection::new(),
            view,
            header_sorting_enabled,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The configuration the table was created with.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The column model.
    pub fn columns(&self) -> &ColumnModel<C> {
        &self.columns
    }

    /// The sort model.
    pub fn sort(&self) -> &SortModel<C> {
        &self.sort
    }

    /// The search model.
    pub fn search(&self) -> &SearchModel {
        &self.search
    }

    /// The condition panels.
    pub fn conditions(&self) -> &ConditionPanelGroup<C> {
        &self.conditions
    }

    /// The selected view rows.
    pub fn selection(&self) -> &RowSelection {
        &self.selection
    }

    /// Mutable access to the selection.
    pub fn selection_mut(&mut self) -> &mut RowSelection {
        &mut self.selection
    }

    /// Source row indexes in view order.
    pub fn view(&self) -> &[usize] {
        &self.view
    }

    /// The source seen in view order.
    pub fn rows(&self) -> RowView<'_, S> {
        RowView::new(&self.source, &self.view)
    }

    /// Number of rows in the view.
    pub fn row_count(&self) -> usize {
        self.view.len()
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Mutate the source, then rebuild the view and search again.
    ///
    /// Selected rows are kept by [`TableSource::row_key`]: a selected row
    /// whose key is still present stays selected wherever it now sorts.
    /// Without row keys the selection is cleared.
    pub fn update_source<R>(&mut self, update: impl FnOnce(&mut S) -> R) -> R {
        let keys: Option<HashSet<String>> = self
            .selection
            .indexes()
            .into_iter()
            .filter_map(|row| self.view.get(row).copied())
            .map(|source_row| self.source.row_key(source_row))
            .collect();

        let result = update(&mut self.source);
        self.rebuild_view();

        match keys {
            Some(keys) => {
                let restored: Vec<usize> = (0..self.view.len())
                    .filter(|&row| {
                        self.source
                            .row_key(self.view[row])
                            .is_some_and(|key| keys.contains(&key))
                    })
                    .collect();
                self.selection.set(restored);
            }
            None => {
                debug!("Source rows have no keys, clearing selection");
                self.selection.clear();
            }
        }

        self.perform_search();
        result
    }

    /// Re-sort the view and search again.
    ///
    /// The source rows must be unchanged since the last rebuild; selected
    /// rows follow their source rows to their new positions. Use
    /// [`update_source`](Self::update_source) when the data changes.
    pub fn refresh(&mut self) {
        let selected: Vec<usize> = self
            .selection
            .indexes()
            .into_iter()
            .filter_map(|row| self.view.get(row).copied())
            .collect();

        self.rebuild_view();

        let restored: Vec<usize> = self
            .view
            .iter()
            .enumerate()
            .filter(|(_, source_row)| selected.contains(source_row))
            .map(|(row, _)| row)
            .collect();
        self.selection.set(restored);

        self.perform_search();
    }

    fn rebuild_view(&mut self) {
        let mut order: Vec<usize> = (0..self.source.row_count()).collect();
        self.sort.sort_rows(&self.source, &mut order);
        self.view = order;
        debug!("Table view rebuilt with {} rows", self.view.len());
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Show or hide a column. See [`ColumnModel::set_visible`].
    pub fn set_column_visible(&mut self, identifier: &C, visible: bool) -> Result<bool> {
        let changed = self.columns.set_visible(identifier, visible)?;
        if changed {
            self.search.columns_changed();
        }
        Ok(changed)
    }

    /// Move a visible column. See [`ColumnModel::move_column`].
    pub fn move_column(&mut self, from: usize, to: usize) -> Result<()> {
        self.columns.move_column(from, to)?;
        if from != to {
            self.search.columns_changed();
        }
        Ok(())
    }

    /// Show exactly these columns. See [`ColumnModel::set_visible_columns`].
    pub fn set_visible_columns(&mut self, identifiers: &[C]) -> Result<()> {
        self.columns.set_visible_columns(identifiers)?;
        self.search.columns_changed();
        Ok(())
    }

    /// Restore all columns. See [`ColumnModel::reset`].
    pub fn reset_columns(&mut self) -> Result<()> {
        self.columns.reset()?;
        self.search.columns_changed();
        Ok(())
    }

    /// Lock or unlock column visibility.
    pub fn set_columns_locked(&mut self, locked: bool) {
        self.columns.set_locked(locked);
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Sort by a single column. See [`SortModel::set_sort_order`].
    pub fn set_sort_order(&mut self, identifier: &C, order: SortOrder) -> Result<()> {
        self.sort.set_sort_order(identifier, order)?;
        self.refresh();
        Ok(())
    }

    /// Add or update a sort key. See [`SortModel::add_sort_order`].
    pub fn add_sort_order(&mut self, identifier: &C, order: SortOrder) -> Result<()> {
        self.sort.add_sort_order(identifier, order)?;
        self.refresh();
        Ok(())
    }

    /// Advance a column's sort order, as a header click does. See
    /// [`SortModel::toggle_sort_order`].
    ///
    /// Fails while header sorting is disabled for the table.
    pub fn toggle_sort_order(&mut self, identifier: &C, add: bool) -> Result<SortOrder> {
        if !self.header_sorting_enabled {
            return Err(TableError::HeaderSortingDisabled);
        }
        let order = self.sort.toggle_sort_order(identifier, add)?;
        self.refresh();
        Ok(order)
    }

    /// Remove every sort key and restore source order.
    pub fn clear_sort(&mut self) {
        if self.sort.is_sorted() {
            self.sort.clear();
            self.refresh();
        }
    }

    /// Whether [`toggle_sort_order`](Self::toggle_sort_order) is allowed.
    pub fn is_header_sorting_enabled(&self) -> bool {
        self.header_sorting_enabled
    }

    /// Enable or disable header-click sorting for the whole table.
    ///
    /// Existing sort keys stay active, and the explicit sort setters keep
    /// working.
    pub fn set_header_sorting_enabled(&mut self, enabled: bool) {
        if self.header_sorting_enabled != enabled {
            debug!(
                "Header sorting {}",
                if enabled { "enabled" } else { "disabled" }
            );
            self.header_sorting_enabled = enabled;
        }
    }

    /// Enable or disable sorting on a column.
    pub fn set_sorting_enabled(&mut self, identifier: &C, enabled: bool) -> Result<()> {
        let was_sorted = self.sort.sort_priority(identifier)?.is_some();
        self.sort.set_sorting_enabled(identifier, enabled)?;
        if was_sorted && !enabled {
            self.refresh();
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Searching
    // -------------------------------------------------------------------------

    /// Set the search text.
    ///
    /// When the text changes to something non-empty, moves to the first
    /// result and selects its row.
    pub fn set_search_string(&mut self, text: impl Into<String>) {
        let text = text.into();
        let advance = !text.is_empty() && text != self.search.search_string();

        let rows = RowView::new(&self.source, &self.view);
        let scope = SearchScope::new(&self.columns, &rows);
        self.search.set_search_string(text, &scope);

        if advance {
            self.next_result();
        }
    }

    /// Set search case sensitivity.
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        let rows = RowView::new(&self.source, &self.view);
        let scope = SearchScope::new(&self.columns, &rows);
        self.search.set_case_sensitive(case_sensitive, &scope);
    }

    /// Switch regular expression search on or off; clears the search text.
    pub fn set_regular_expression(&mut self, regular_expression: bool) {
        self.search.set_regular_expression(regular_expression);
    }

    /// Select only the row of the next search result.
    pub fn next_result(&mut self) -> Option<SearchResult> {
        self.search.next(&mut self.selection)
    }

    /// Select only the row of the previous search result.
    pub fn previous_result(&mut self) -> Option<SearchResult> {
        self.search.previous(&mut self.selection)
    }

    /// Add the row of the next search result to the selection.
    pub fn select_next_result(&mut self) -> Option<SearchResult> {
        self.search.select_next(&mut self.selection)
    }

    /// Add the row of the previous search result to the selection.
    pub fn select_previous_result(&mut self) -> Option<SearchResult> {
        self.search.select_previous(&mut self.selection)
    }

    /// First match at or after a view row, wrapping.
    pub fn find_next(&self, from_row: usize) -> Option<SearchResult> {
        let rows = self.rows();
        self.search
            .find_next(&SearchScope::new(&self.columns, &rows), from_row)
    }

    /// Last match at or before a view row, wrapping.
    pub fn find_previous(&self, from_row: usize) -> Option<SearchResult> {
        let rows = self.rows();
        self.search
            .find_previous(&SearchScope::new(&self.columns, &rows), from_row)
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Start a delimited text export of the view.
    pub fn export(&self) -> Export<'_, C, S> {
        Export::new(self)
    }

    fn perform_search(&mut self) {
        let rows = RowView::new(&self.source, &self.view);
        let scope = SearchScope::new(&self.columns, &rows);
        self.search.perform_search(&scope);
    }
}
