use std::error::Error;
use std::fs::File;

use gridstate::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    Name,
    Team,
    Commits,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Cell {
    Number(i64),
    Text(String),
}

struct Contributors(Vec<(&'static str, Option<&'static str>, i64)>);

impl TableSource<Field> for Contributors {
    type Value = Cell;

    fn row_count(&self) -> usize {
        self.0.len()
    }

    fn value(&self, row: usize, column: &Field) -> Option<Cell> {
        let (name, team, commits) = self.0[row];
        match column {
            Field::Name => Some(Cell::Text(name.to_string())),
            Field::Team => team.map(|team| Cell::Text(team.to_string())),
            Field::Commits => Some(Cell::Number(commits)),
        }
    }

    fn display(&self, row: usize, column: &Field) -> String {
        match self.value(row, column) {
            Some(Cell::Text(text)) => text,
            Some(Cell::Number(n)) => n.to_string(),
            None => String::new(),
        }
    }

    fn comparator(&self, _column: &Field) -> ColumnComparator<Cell> {
        natural_order()
    }
}

fn print(table: &Table<Field, Contributors>) {
    let columns = table.columns().visible_columns();
    let header: Vec<String> = columns
        .iter()
        .map(|id| table.columns().column(id).map(|c| c.header).unwrap_or_default())
        .collect();
    println!("{}", header.join(" | "));

    let rows = table.rows();
    for row in 0..rows.row_count() {
        let cells: Vec<String> = columns.iter().map(|id| rows.display(row, id)).collect();
        let marker = if table.selection().is_selected(row) { ">" } else { " " };
        println!("{marker} {}", cells.join(" | "));
    }
    println!();
}

fn main() -> Result<(), Box<dyn Error>> {
    let log_file = File::create("walkthrough.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let source = Contributors(vec![
        ("ada", Some("core"), 412),
        ("grace", Some("tools"), 97),
        ("linus", None, 1203),
        ("barbara", Some("core"), 260),
    ]);
    let specs = vec![
        ColumnSpec::new(Field::Name).header("Name"),
        ColumnSpec::new(Field::Team).header("Team"),
        ColumnSpec::new(Field::Commits).header("Commits"),
    ];
    let mut table = Table::new(source, specs, TableConfig::default())?;

    let _sorted = table
        .sort()
        .sorting_changed()
        .subscribe(|field| println!("sorting changed on {field:?}"));
    let _panels = table
        .conditions()
        .group()
        .state()
        .subscribe(|state| println!("condition panels: {state}"));

    println!("Source order:");
    print(&table);

    table.set_sort_order(&Field::Team, SortOrder::Ascending)?;
    table.add_sort_order(&Field::Commits, SortOrder::Descending)?;
    println!("By team, then commits descending:");
    print(&table);

    table.set_search_string("core");
    println!("{} matches for \"core\"", table.search().results().len());
    table.select_next_result();
    print(&table);

    table.set_column_visible(&Field::Team, false)?;
    println!("Team hidden, search cleared: {:?}", table.search().search_string());
    print(&table);

    table.set_column_visible(&Field::Team, true)?;
    table.toggle_sort_order(&Field::Name, false)?;
    println!("Team shown again, sorted by name:");
    print(&table);

    table.conditions().advance();
    table.conditions().advance();

    table.set_column_visible(&Field::Team, false)?;
    println!("CSV export, hidden columns included:");
    println!("{}", table.export().delimiter(',').hidden(true).get());

    Ok(())
}
