//! Column definition and snapshot types.

/// Column definition supplied when building a column model.
///
/// # Examples
///
/// ```
/// use gridstate::columns::ColumnSpec;
///
/// let columns = vec![
///     ColumnSpec::new("id").header("ID").unsortable(),
///     ColumnSpec::new("name").header("Name"),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec<C> {
    /// Unique column identifier.
    pub identifier: C,
    /// Header text.
    pub header: String,
    /// Whether the column can take part in sorting.
    pub sortable: bool,
}

impl<C: std::fmt::Debug> ColumnSpec<C> {
    /// Create a sortable column whose header is the identifier's debug form.
    ///
    /// String identifiers lose their quotes and escapes, so `"a\"b"` gives
    /// the header `a"b`.
    pub fn new(identifier: C) -> Self {
        let header = default_header(format!("{identifier:?}"));
        Self {
            identifier,
            header,
            sortable: true,
        }
    }

    /// Set the header text.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Disable sorting on this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

/// Turn a debug-formatted identifier into header text.
fn default_header(debug: String) -> String {
    let Some(inner) = debug
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return debug;
    };

    let mut header = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            header.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => header.push('\n'),
            Some('r') => header.push('\r'),
            Some('t') => header.push('\t'),
            Some('0') => header.push('\0'),
            Some('u') => {
                // \u{hex}
                let code: String = chars.by_ref().skip(1).take_while(|&c| c != '}').collect();
                if let Some(c) = u32::from_str_radix(&code, 16).ok().and_then(char::from_u32) {
                    header.push(c);
                }
            }
            Some(other) => header.push(other),
            None => header.push('\\'),
        }
    }
    header
}

/// A point-in-time view of one column in a [`ColumnModel`](super::ColumnModel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<C> {
    /// Column identifier.
    pub identifier: C,
    /// Header text.
    pub header: String,
    /// Index in the original column order.
    pub model_index: usize,
    /// Index among visible columns, `None` when hidden.
    pub position: Option<usize>,
    /// Visible columns that followed this one when it was hidden.
    ///
    /// Empty for visible columns.
    pub right_neighbors: Vec<C>,
    /// Whether the owning model is locked.
    pub locked: bool,
}

impl<C> Column<C> {
    /// Whether the column is visible.
    pub fn visible(&self) -> bool {
        self.position.is_some()
    }
}
