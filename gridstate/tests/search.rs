mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{Grid, foo_grid};
use gridstate::columns::ColumnModel;
use gridstate::search::{SearchModel, SearchResult, SearchScope};
use gridstate::selection::RowSelection;

fn searched(
    grid: &Grid,
    columns: &ColumnModel<&'static str>,
    text: &str,
) -> SearchModel {
    common::init_logging();
    let mut search = SearchModel::new();
    search.set_search_string(text, &SearchScope::new(columns, grid));
    search
}

fn r(row: usize, column: usize) -> SearchResult {
    SearchResult::new(row, column)
}

// ============================================================================
// Results
// ============================================================================

#[test]
fn test_case_insensitive_plain_search() {
    let grid = foo_grid();
    let columns = grid.column_model();
    let mut search = searched(&grid, &columns, "FOO");
    let mut selection = RowSelection::new();

    assert_eq!(search.results(), &[r(0, 1), r(2, 0)]);

    assert_eq!(search.next(&mut selection), Some(r(0, 1)));
    assert_eq!(selection.indexes(), vec![0]);
    assert_eq!(search.next(&mut selection), Some(r(2, 0)));
    assert_eq!(selection.indexes(), vec![2]);
    assert_eq!(search.next(&mut selection), Some(r(0, 1)));
    assert_eq!(selection.indexes(), vec![0]);
}

#[test]
fn test_case_sensitive_search() {
    let grid = foo_grid();
    let columns = grid.column_model();
    let scope = SearchScope::new(&columns, &grid);
    let mut search = SearchModel::new();
    search.set_search_string("Foo", &scope);
    assert_eq!(search.results().len(), 2);

    search.set_case_sensitive(true, &scope);

    assert!(search.is_case_sensitive());
    assert_eq!(search.results(), &[r(2, 0)]);
}

#[test]
fn test_invalid_pattern_yields_no_results() {
    let grid = foo_grid();
    let columns = grid.column_model();
    let scope = SearchScope::new(&columns, &grid);
    let mut search = SearchModel::with_options(false, true);

    search.set_search_string("[", &scope);

    assert!(search.predicate().is_none());
    assert!(search.results().is_empty());
    assert_eq!(search.search_string(), "[");

    search.set_search_string("[fb]a", &scope);
    assert_eq!(search.results(), &[r(1, 0), r(1, 1)]);
}

#[test]
fn test_switching_regex_mode_clears_search_string() {
    let grid = foo_grid();
    let columns = grid.column_model();
    let mut search = searched(&grid, &columns, "foo");
    assert!(!search.results().is_empty());

    search.set_regular_expression(true);

    assert!(search.is_regular_expression());
    assert_eq!(search.search_string(), "");
    assert!(search.predicate().is_none());
    assert!(search.results().is_empty());
}

#[test]
fn test_only_visible_columns_are_searched() {
    let grid = foo_grid();
    let mut columns = grid.column_model();
    columns.set_visible(&"a", false).unwrap();
    columns.move_column(1, 0).unwrap();

    let search = searched(&grid, &columns, "o");

    // Visible order is [c, b]; "foo" in b is now at position 1.
    assert_eq!(search.results(), &[r(0, 1)]);
}

#[test]
fn test_result_count_matches_cell_count() {
    let grid = Grid::new(
        &["a", "b"],
        &[
            &[Some("aa"), Some("ab")],
            &[Some("ba"), Some("bb")],
            &[None, Some("a")],
        ],
    );
    let columns = grid.column_model();

    let search = searched(&grid, &columns, "a");
    let expected = (0..3)
        .flat_map(|row| ["a", "b"].map(|c| (row, c)))
        .filter(|(row, c)| {
            use gridstate::source::TableSource;
            grid.display(*row, c).contains('a')
        })
        .count();

    assert_eq!(search.results().len(), expected);
    assert!(search.results().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_empty_grid_and_no_columns() {
    let empty = Grid::new(&["a"], &[]);
    let columns = empty.column_model();
    assert!(searched(&empty, &columns, "x").results().is_empty());

    let grid = foo_grid();
    let mut columns = grid.column_model();
    columns.set_visible_columns(&[]).unwrap();
    assert!(searched(&grid, &columns, "foo").results().is_empty());
}

#[test]
fn test_perform_search_follows_row_changes() {
    let mut grid = foo_grid();
    let columns = grid.column_model();
    let mut search = SearchModel::new();
    search.set_search_string("foo", &SearchScope::new(&columns, &grid));
    assert_eq!(search.results().len(), 2);

    grid.rows.remove(0);
    search.perform_search(&SearchScope::new(&columns, &grid));

    assert_eq!(search.results(), &[r(1, 0)]);
}

#[test]
fn test_results_changed_event() {
    let grid = foo_grid();
    let columns = grid.column_model();
    let scope = SearchScope::new(&columns, &grid);
    let mut search = SearchModel::new();
    let counts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&counts);
    let _sub = search
        .results_changed()
        .subscribe(move |count| sink.borrow_mut().push(*count));

    search.set_search_string("f", &scope);
    search.set_search_string("fo", &scope);
    search.set_search_string("ba", &scope);
    search.clear_search_string();

    assert_eq!(*counts.borrow(), vec![2, 2, 0]);
}

// ============================================================================
// Cursor
// ============================================================================

#[test]
fn test_previous_wraps_to_last() {
    let grid = foo_grid();
    let columns = grid.column_model();
    let mut search = searched(&grid, &columns, "foo");
    let mut selection = RowSelection::new();

    assert_eq!(search.previous(&mut selection), Some(r(2, 0)));
    assert_eq!(search.previous(&mut selection), Some(r(0, 1)));
    assert_eq!(search.previous(&mut selection), Some(r(2, 0)));
}

#[test]
fn test_next_and_previous_are_inverse() {
    let grid = Grid::new(
        &["a"],
        &[&[Some("x")], &[Some("x")], &[Some("x")], &[Some("x")]],
    );
    let columns = grid.column_model();
    let mut search = searched(&grid, &columns, "x");
    let mut selection = RowSelection::new();

    search.next(&mut selection);
    search.next(&mut selection);
    let start = search.current().get();

    for k in 1..=9 {
        for _ in 0..k {
            search.next(&mut selection);
        }
        for _ in 0..k {
            search.previous(&mut selection);
        }
        assert_eq!(search.current().get(), start, "k = {k}");
    }
}

#[test]
fn test_select_variants_extend_selection() {
    let grid = foo_grid();
    let columns = grid.column_model();
    let mut search = searched(&grid, &columns, "foo");
    let mut selection = RowSelection::new();
    selection.set_single(1);

    assert_eq!(search.select_next(&mut selection), Some(r(0, 1)));
    assert_eq!(search.select_next(&mut selection), Some(r(2, 0)));
    assert_eq!(selection.indexes(), vec![0, 1, 2]);

    assert_eq!(search.previous(&mut selection), Some(r(0, 1)));
    assert_eq!(selection.indexes(), vec![0]);
}

#[test]
fn test_empty_results_and_selection() {
    let grid = foo_grid();
    let columns = grid.column_model();
    let mut search = searched(&grid, &columns, "nothing");
    let mut selection = RowSelection::new();

    selection.set_single(1);
    assert_eq!(search.select_next(&mut selection), None);
    assert_eq!(search.select_previous(&mut selection), None);
    assert_eq!(selection.indexes(), vec![1]);

    assert_eq!(search.next(&mut selection), None);
    assert!(selection.is_empty());

    selection.set_single(2);
    assert_eq!(search.previous(&mut selection), None);
    assert!(selection.is_empty());
}

#[test]
fn test_current_observable() {
    let grid = foo_grid();
    let columns = grid.column_model();
    let scope = SearchScope::new(&columns, &grid);
    let mut search = SearchModel::new();
    let mut selection = RowSelection::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _sub = search
        .current()
        .subscribe(move |current| sink.borrow_mut().push(*current));

    assert_eq!(search.current().get(), None);
    search.set_search_string("foo", &scope);
    search.next(&mut selection);
    search.set_search_string("fo", &scope);

    assert_eq!(search.current().get(), None);
    assert_eq!(*seen.borrow(), vec![Some(r(0, 1)), None]);
}

#[test]
fn test_columns_changed_clears_search() {
    let grid = foo_grid();
    let columns = grid.column_model();
    let mut search = searched(&grid, &columns, "foo");

    search.columns_changed();

    assert_eq!(search.search_string(), "");
    assert!(search.results().is_empty());
    assert_eq!(search.current().get(), None);
}

// ============================================================================
// One-shot find
// ============================================================================

#[test]
fn test_find_next_and_previous_wrap() {
    let grid = foo_grid();
    let columns = grid.column_model();
    let scope = SearchScope::new(&columns, &grid);
    let search = searched(&grid, &columns, "foo");

    assert_eq!(search.find_next(&scope, 0), Some(r(0, 1)));
    assert_eq!(search.find_next(&scope, 1), Some(r(2, 0)));
    assert_eq!(search.find_previous(&scope, 1), Some(r(0, 1)));
    assert_eq!(search.find_previous(&scope, 0), Some(r(0, 1)));
    assert_eq!(search.find_previous(&scope, 99), Some(r(2, 0)));

    // The cursor is untouched.
    assert_eq!(search.current().get(), None);
    assert_eq!(SearchModel::new().find_next(&scope, 0), None);
}
