//! Error types

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors raised by the table state models.
///
/// There are two families: lookup failures, where the caller named a column
/// or position that does not exist, and policy violations, where the caller
/// attempted a mutation the model currently forbids. Both indicate wiring
/// bugs rather than recoverable data conditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// No column with the given identifier exists.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A visible position was outside the visible column range.
    #[error("Column position {position} out of range ({count} visible columns)")]
    PositionOutOfRange {
        /// The requested position.
        position: usize,
        /// Number of visible columns at the time of the call.
        count: usize,
    },

    /// A model index was outside the column universe.
    #[error("Model index {index} out of range ({count} columns)")]
    ModelIndexOutOfRange {
        /// The requested model index.
        index: usize,
        /// Number of columns in the model.
        count: usize,
    },

    /// Two columns were constructed with the same identifier.
    #[error("Duplicate column identifier: {0}")]
    DuplicateColumn(String),

    /// Visibility was changed while the column model is locked.
    #[error("Column model is locked, visibility of {0} cannot change")]
    ColumnsLocked(String),

    /// A sort key was set for a column with sorting disabled.
    #[error("Sorting is disabled for column {0}")]
    SortingDisabled(String),

    /// A header-click sort was attempted while the table has it turned off.
    #[error("Header sorting is disabled")]
    HeaderSortingDisabled,
}

impl TableError {
    pub(crate) fn column_not_found(identifier: &impl std::fmt::Debug) -> Self {
        Self::ColumnNotFound(format!("{identifier:?}"))
    }

    pub(crate) fn columns_locked(identifier: &impl std::fmt::Debug) -> Self {
        Self::ColumnsLocked(format!("{identifier:?}"))
    }

    pub(crate) fn sorting_disabled(identifier: &impl std::fmt::Debug) -> Self {
        Self::SortingDisabled(format!("{identifier:?}"))
    }

    /// Returns true if this error is an unknown identifier or index.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::ColumnNotFound(_)
                | Self::PositionOutOfRange { .. }
                | Self::ModelIndexOutOfRange { .. }
                | Self::DuplicateColumn(_)
        )
    }

    /// Returns true if this error is a forbidden mutation.
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            Self::ColumnsLocked(_) | Self::SortingDisabled(_) | Self::HeaderSortingDisabled
        )
    }
}
