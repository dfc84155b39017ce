//! Rendering-independent state engine for data grids.
//!
//! The crate tracks which columns are visible and in what order
//! ([`columns`]), orders rows by prioritized sort keys ([`sort`]), searches
//! the visible cells ([`search`]) and drives the hidden/simple/advanced
//! state of condition panels ([`condition`]). [`table::Table`] ties them to a
//! [`source::TableSource`] and exports the view as delimited text
//! ([`export`]). Everything is single-threaded; observers are
//! notified synchronously through [`event::Event`] subscriptions.

pub mod columns;
pub mod condition;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod search;
pub mod selection;
pub mod sort;
pub mod source;
pub mod table;

pub use error::{Result, TableError};
pub use table::Table;

pub mod prelude {
    pub use crate::columns::{Column, ColumnModel, ColumnMove, ColumnSpec};
    pub use crate::condition::{
        ConditionPanelGroup, ConditionState, ConditionStateMachine, ConditionToggle,
    };
    pub use crate::config::TableConfig;
    pub use crate::error::TableError;
    pub use crate::event::{Event, Subscription, Value};
    pub use crate::export::Export;
    pub use crate::search::{SearchModel, SearchPredicate, SearchResult, SearchScope};
    pub use crate::selection::RowSelection;
    pub use crate::sort::{RowComparator, SortKey, SortModel, SortOrder};
    pub use crate::source::{ColumnComparator, ColumnId, RowView, TableSource, natural_order};
    pub use crate::table::Table;
}
