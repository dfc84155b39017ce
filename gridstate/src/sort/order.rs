//! Sort direction and key types.

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Smallest first, nulls first.
    Ascending,
    /// Largest first, nulls last.
    Descending,
    /// Not taking part in sorting.
    #[default]
    Unsorted,
}

impl SortOrder {
    /// The order a header click moves to: unsorted, ascending, descending,
    /// then back to unsorted.
    pub fn next(self) -> Self {
        match self {
            Self::Unsorted => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Unsorted,
        }
    }

    /// Whether this is an active direction.
    pub fn is_sorted(self) -> bool {
        self != Self::Unsorted
    }
}

/// An active sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey<C> {
    /// Column identifier.
    pub identifier: C,
    /// Direction, never [`SortOrder::Unsorted`].
    pub order: SortOrder,
    /// Zero-based rank; lower compares first.
    pub priority: usize,
}
