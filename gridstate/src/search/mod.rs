//! Search model: text or pattern search over visible cells with a cyclic
//! result cursor.

mod model;
mod predicate;

pub use model::{SearchModel, SearchResult, SearchScope};
pub use predicate::SearchPredicate;
