#![allow(dead_code)]

use std::rc::Rc;

use gridstate::columns::{ColumnModel, ColumnSpec};
use gridstate::source::{ColumnComparator, TableSource, natural_order};
use simplelog::{Config, LevelFilter, TestLogger};

pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// In-memory grid of optional strings. Columns named in `numeric` compare as
/// integers; the `key` column, when set, identifies rows.
#[derive(Debug, Clone)]
pub struct Grid {
    pub columns: Vec<&'static str>,
    pub numeric: Vec<&'static str>,
    pub key: Option<&'static str>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Grid {
    pub fn new(columns: &[&'static str], rows: &[&[Option<&str>]]) -> Self {
        Self {
            columns: columns.to_vec(),
            numeric: Vec::new(),
            key: None,
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.map(str::to_string)).collect())
                .collect(),
        }
    }

    pub fn numeric(mut self, column: &'static str) -> Self {
        self.numeric.push(column);
        self
    }

    pub fn keyed(mut self, column: &'static str) -> Self {
        self.key = Some(column);
        self
    }

    pub fn specs(&self) -> Vec<ColumnSpec<&'static str>> {
        self.columns.iter().copied().map(ColumnSpec::new).collect()
    }

    pub fn column_model(&self) -> ColumnModel<&'static str> {
        ColumnModel::new(self.specs()).unwrap()
    }

    fn index(&self, column: &str) -> usize {
        self.columns
            .iter()
            .position(|c| *c == column)
            .unwrap_or_else(|| panic!("unknown column {column}"))
    }
}

impl TableSource<&'static str> for Grid {
    type Value = String;

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn value(&self, row: usize, column: &&'static str) -> Option<String> {
        self.rows[row][self.index(column)].clone()
    }

    fn display(&self, row: usize, column: &&'static str) -> String {
        self.value(row, column).unwrap_or_default()
    }

    fn comparator(&self, column: &&'static str) -> ColumnComparator<String> {
        if self.numeric.contains(column) {
            Rc::new(|a: &String, b: &String| {
                let a: i64 = a.parse().unwrap_or_default();
                let b: i64 = b.parse().unwrap_or_default();
                a.cmp(&b)
            })
        } else {
            natural_order()
        }
    }

    fn row_key(&self, row: usize) -> Option<String> {
        self.key.and_then(|column| self.value(row, &column))
    }
}

/// The 3x3 grid with "foo" at (0, 1) and (2, 0).
pub fn foo_grid() -> Grid {
    Grid::new(
        &["a", "b", "c"],
        &[
            &[Some("x"), Some("foo"), Some("y")],
            &[Some("bar"), Some("baz"), None],
            &[Some("Foo"), Some("z"), Some("w")],
        ],
    )
}
