//! Table configuration

use crate::condition::ConditionState;

/// Initial settings for a [`Table`](crate::table::Table).
///
/// # Example
///
/// ```
/// use gridstate::condition::ConditionState;
/// use gridstate::config::TableConfig;
///
/// let config = TableConfig::default()
///     .with_case_sensitive_search(true)
///     .with_condition_state(ConditionState::Simple);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Whether searches start out case sensitive.
    ///
    /// Default: false
    pub case_sensitive_search: bool,

    /// Whether searches start out in regular expression mode.
    ///
    /// Default: false
    pub regular_expression_search: bool,

    /// Initial state of the condition panel group and every column panel.
    ///
    /// Default: [`ConditionState::Hidden`]
    pub condition_state: ConditionState,

    /// Whether column visibility starts out locked.
    ///
    /// Default: false
    pub columns_locked: bool,

    /// Whether header-click sorting through
    /// [`Table::toggle_sort_order`](crate::table::Table::toggle_sort_order)
    /// starts out enabled.
    ///
    /// Default: true
    pub header_sorting_enabled: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            case_sensitive_search: false,
            regular_expression_search: false,
            condition_state: ConditionState::Hidden,
            columns_locked: false,
            header_sorting_enabled: true,
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial search case sensitivity.
    pub fn with_case_sensitive_search(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive_search = case_sensitive;
        self
    }

    /// Sets the initial regular expression search mode.
    pub fn with_regular_expression_search(mut self, regular_expression: bool) -> Self {
        self.regular_expression_search = regular_expression;
        self
    }

    /// Sets the initial condition panel state.
    pub fn with_condition_state(mut self, state: ConditionState) -> Self {
        self.condition_state = state;
        self
    }

    /// Sets whether column visibility starts out locked.
    pub fn with_columns_locked(mut self, locked: bool) -> Self {
        self.columns_locked = locked;
        self
    }

    /// Sets whether header-click sorting starts out enabled.
    pub fn with_header_sorting_enabled(mut self, enabled: bool) -> Self {
        self.header_sorting_enabled = enabled;
        self
    }
}
