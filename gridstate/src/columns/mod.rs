//! Column model: visibility, order and locking.

mod column;
mod model;

pub use column::{Column, ColumnSpec};
pub use model::{ColumnModel, ColumnMove};
