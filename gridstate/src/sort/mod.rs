//! Sort model: prioritized sort keys and the row comparator built from them.

mod model;
mod order;

pub use model::{RowComparator, SortModel};
pub use order::{SortKey, SortOrder};
