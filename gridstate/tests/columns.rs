mod common;

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use gridstate::TableError;
use gridstate::columns::{ColumnModel, ColumnSpec};

fn model(ids: &[&'static str]) -> ColumnModel<&'static str> {
    common::init_logging();
    ColumnModel::new(ids.iter().copied().map(ColumnSpec::new)).unwrap()
}

fn record(
    model: &ColumnModel<&'static str>,
) -> (
    Rc<RefCell<Vec<String>>>,
    Vec<gridstate::event::Subscription>,
) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let hidden = Rc::clone(&log);
    let shown = Rc::clone(&log);
    let subs = vec![
        model
            .column_hidden()
            .subscribe(move |id| hidden.borrow_mut().push(format!("hidden {id}"))),
        model
            .column_shown()
            .subscribe(move |id| shown.borrow_mut().push(format!("shown {id}"))),
    ];
    (log, subs)
}

// ============================================================================
// Hide / show
// ============================================================================

#[test]
fn test_show_reinserts_before_remaining_right_neighbor() {
    let mut model = model(&["A", "B", "C"]);

    model.set_visible(&"B", false).unwrap();
    model.set_visible(&"A", false).unwrap();
    assert_eq!(model.visible_columns(), vec!["C"]);
    assert_eq!(model.hidden_columns(), vec!["A", "B"]);

    model.set_visible(&"A", true).unwrap();
    assert_eq!(model.visible_columns(), vec!["A", "C"]);

    model.set_visible(&"B", true).unwrap();
    assert_eq!(model.visible_columns(), vec!["A", "B", "C"]);
}

#[test]
fn test_hide_then_show_restores_position() {
    let ids = ["A", "B", "C", "D", "E"];
    for id in ids {
        let mut model = model(&ids);
        model.move_column(4, 1).unwrap();
        let before = model.visible_columns();

        model.set_visible(&id, false).unwrap();
        model.set_visible(&id, true).unwrap();

        assert_eq!(model.visible_columns(), before, "column {id}");
    }
}

#[test]
fn test_show_appends_when_no_neighbor_remains() {
    let mut model = model(&["A", "B", "C"]);

    model.set_visible(&"B", false).unwrap();
    model.set_visible(&"C", false).unwrap();
    model.set_visible(&"B", true).unwrap();

    assert_eq!(model.visible_columns(), vec!["A", "B"]);
}

#[test]
fn test_right_neighbors_snapshot_at_hide_time() {
    let mut model = model(&["A", "B", "C", "D"]);

    model.set_visible(&"B", false).unwrap();
    let column = model.column(&"B").unwrap();
    assert!(!column.visible());
    assert_eq!(column.right_neighbors, vec!["C", "D"]);

    // Moving D in front of A afterwards does not change the snapshot.
    model.move_column(2, 0).unwrap();
    assert_eq!(model.column(&"B").unwrap().right_neighbors, vec!["C", "D"]);

    // D is now the leftmost remembered neighbor.
    model.set_visible(&"B", true).unwrap();
    assert_eq!(model.visible_columns(), vec!["B", "D", "A", "C"]);
}

#[test]
fn test_hide_and_show_are_idempotent() {
    let mut model = model(&["A", "B"]);
    let (log, _subs) = record(&model);

    assert!(model.set_visible(&"A", false).unwrap());
    assert!(!model.set_visible(&"A", false).unwrap());
    assert!(model.set_visible(&"A", true).unwrap());
    assert!(!model.set_visible(&"A", true).unwrap());

    assert_eq!(*log.borrow(), vec!["hidden A", "shown A"]);
}

#[test]
fn test_last_visible_column_can_be_hidden() {
    let mut model = model(&["A", "B"]);

    model.set_visible(&"A", false).unwrap();
    model.set_visible(&"B", false).unwrap();

    assert_eq!(model.visible_count(), 0);
    assert!(model.visible_columns().is_empty());
    assert!(matches!(
        model.identifier(0),
        Err(TableError::PositionOutOfRange { position: 0, count: 0 })
    ));
}

#[test]
fn test_visible_and_hidden_partition_universe() {
    let ids = ["A", "B", "C", "D", "E", "F"];
    let mut model = model(&ids);
    let universe: HashSet<&str> = ids.iter().copied().collect();

    let steps: &[(&str, bool)] = &[
        ("C", false),
        ("A", false),
        ("F", false),
        ("C", true),
        ("B", false),
        ("F", true),
        ("A", true),
        ("E", false),
        ("B", true),
    ];
    for (i, &(id, visible)) in steps.iter().enumerate() {
        model.set_visible(&id, visible).unwrap();
        if i % 2 == 0 && model.visible_count() > 1 {
            model.move_column(0, model.visible_count() - 1).unwrap();
        }

        let visible: HashSet<&str> = model.visible_columns().into_iter().collect();
        let hidden: HashSet<&str> = model.hidden_columns().into_iter().collect();
        assert!(visible.is_disjoint(&hidden));
        assert_eq!(&visible | &hidden, universe);
    }
}

// ============================================================================
// Locking
// ============================================================================

#[test]
fn test_locked_rejects_visibility_changes() {
    let mut model = model(&["A", "B"]);
    let (log, _subs) = record(&model);
    model.set_locked(true);

    let err = model.set_visible(&"A", false).unwrap_err();
    assert!(err.is_policy_violation());
    assert!(matches!(err, TableError::ColumnsLocked(_)));
    assert!(model.is_visible(&"A").unwrap());
    assert!(log.borrow().is_empty());

    assert!(model.set_visible_columns(&["B"]).is_err());
    assert_eq!(model.visible_columns(), vec!["A", "B"]);
}

#[test]
fn test_locked_allows_reordering() {
    let mut model = model(&["A", "B", "C"]);
    model.set_locked(true);

    model.move_column(0, 2).unwrap();

    assert_eq!(model.visible_columns(), vec!["B", "C", "A"]);
    assert!(model.column(&"A").unwrap().locked);
}

// ============================================================================
// Reordering, reset and bulk visibility
// ============================================================================

#[test]
fn test_move_column_emits_move() {
    let mut model = model(&["A", "B", "C"]);
    let moves = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&moves);
    let _sub = model
        .column_moved()
        .subscribe(move |m| sink.borrow_mut().push((m.identifier, m.from, m.to)));

    model.move_column(2, 0).unwrap();
    model.move_column(1, 1).unwrap();

    assert_eq!(model.visible_columns(), vec!["C", "A", "B"]);
    assert_eq!(*moves.borrow(), vec![("C", 2, 0)]);
    assert_eq!(model.position(&"B").unwrap(), Some(2));
    assert!(model.move_column(0, 3).is_err());
}

#[test]
fn test_reset_restores_original_order() {
    let mut model = model(&["A", "B", "C", "D"]);
    let (log, _subs) = record(&model);
    let resets = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&resets);
    let _reset_sub = model
        .columns_reset()
        .subscribe(move |_| *counter.borrow_mut() += 1);

    model.set_visible(&"B", false).unwrap();
    model.set_visible(&"D", false).unwrap();
    model.move_column(1, 0).unwrap();
    log.borrow_mut().clear();

    model.reset().unwrap();

    assert_eq!(model.visible_columns(), vec!["A", "B", "C", "D"]);
    assert!(model.hidden_columns().is_empty());
    assert!(model.column(&"B").unwrap().right_neighbors.is_empty());
    assert_eq!(*log.borrow(), vec!["shown B", "shown D"]);
    assert_eq!(*resets.borrow(), 1);
}

#[test]
fn test_reset_while_locked() {
    let mut model = model(&["A", "B", "C"]);
    model.move_column(0, 2).unwrap();
    model.set_locked(true);

    // Pure reorder is allowed.
    model.reset().unwrap();
    assert_eq!(model.visible_columns(), vec!["A", "B", "C"]);

    model.set_locked(false);
    model.set_visible(&"B", false).unwrap();
    model.set_locked(true);
    assert!(matches!(model.reset(), Err(TableError::ColumnsLocked(_))));
    assert_eq!(model.visible_columns(), vec!["A", "C"]);
}

#[test]
fn test_set_visible_columns() {
    let mut model = model(&["A", "B", "C", "D"]);
    let (log, _subs) = record(&model);

    model.set_visible_columns(&["D", "B"]).unwrap();

    assert_eq!(model.visible_columns(), vec!["D", "B"]);
    assert_eq!(model.hidden_columns(), vec!["A", "C"]);
    assert_eq!(*log.borrow(), vec!["hidden A", "hidden C"]);

    log.borrow_mut().clear();
    model.set_visible_columns(&["A", "B", "C", "D"]).unwrap();
    assert_eq!(model.visible_columns(), vec!["A", "B", "C", "D"]);
    assert_eq!(*log.borrow(), vec!["shown A", "shown C"]);
}

#[test]
fn test_set_visible_columns_rejects_bad_input_without_change() {
    let mut model = model(&["A", "B"]);

    assert!(matches!(
        model.set_visible_columns(&["A", "Z"]),
        Err(TableError::ColumnNotFound(_))
    ));
    assert!(matches!(
        model.set_visible_columns(&["A", "A"]),
        Err(TableError::DuplicateColumn(_))
    ));
    assert_eq!(model.visible_columns(), vec!["A", "B"]);
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_lookup_failures_are_errors() {
    let mut model = model(&["A", "B"]);

    assert!(model.contains(&"A"));
    assert!(!model.contains(&"Z"));
    assert!(model.column(&"Z").unwrap_err().is_lookup_failure());
    assert!(model.set_visible(&"Z", false).unwrap_err().is_lookup_failure());
    assert!(matches!(
        model.identifier_at_model_index(2),
        Err(TableError::ModelIndexOutOfRange { index: 2, count: 2 })
    ));
    assert_eq!(*model.identifier(1).unwrap(), "B");
    assert_eq!(*model.identifier_at_model_index(0).unwrap(), "A");
}

#[test]
fn test_duplicate_identifiers_rejected() {
    let result = ColumnModel::new(["A", "B", "A"].map(ColumnSpec::new));
    assert!(matches!(result, Err(TableError::DuplicateColumn(_))));
}

#[test]
fn test_column_snapshot() {
    let mut model =
        ColumnModel::new(vec![ColumnSpec::new(1).header("Id"), ColumnSpec::new(2)]).unwrap();
    model.move_column(0, 1).unwrap();

    let column = model.column(&1).unwrap();
    assert_eq!(column.header, "Id");
    assert_eq!(column.model_index, 0);
    assert_eq!(column.position, Some(1));
    assert_eq!(model.column(&2).unwrap().header, "2");
    assert_eq!(model.columns().len(), 2);
}

#[test]
fn test_default_header_has_no_escapes() {
    assert_eq!(ColumnSpec::new("a\"b").header, "a\"b");
    assert_eq!(ColumnSpec::new("x\\y\tz").header, "x\\y\tz");
    assert_eq!(ColumnSpec::new("bell\u{7}").header, "bell\u{7}");
    assert_eq!(ColumnSpec::new("plain").header, "plain");
    assert_eq!(ColumnSpec::new(42).header, "42");
}
