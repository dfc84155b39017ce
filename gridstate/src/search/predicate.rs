//! Search predicates.

use regex::{Regex, RegexBuilder};

/// Cell test derived from the search inputs.
#[derive(Debug, Clone)]
pub enum SearchPredicate {
    /// Substring containment.
    Contains {
        /// The text to find, already lowercased unless case sensitive.
        needle: String,
        /// Whether case is significant.
        case_sensitive: bool,
    },
    /// Regular expression match anywhere in the cell.
    Pattern(Regex),
}

impl SearchPredicate {
    /// Build a predicate from the search inputs.
    ///
    /// Returns `None` for an empty search string and for a pattern that does
    /// not compile, so an incomplete pattern matches nothing.
    pub fn build(text: &str, case_sensitive: bool, regular_expression: bool) -> Option<Self> {
        if text.is_empty() {
            return None;
        }

        if regular_expression {
            return match RegexBuilder::new(text)
                .case_insensitive(!case_sensitive)
                .build()
            {
                Ok(regex) => Some(Self::Pattern(regex)),
                Err(err) => {
                    log::debug!("Search pattern {:?} does not compile: {}", text, err);
                    None
                }
            };
        }

        let needle = if case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        };
        Some(Self::Contains {
            needle,
            case_sensitive,
        })
    }

    /// Test a cell's string representation.
    pub fn test(&self, text: &str) -> bool {
        match self {
            Self::Contains {
                needle,
                case_sensitive: true,
            } => text.contains(needle.as_str()),
            Self::Contains { needle, .. } => text.to_lowercase().contains(needle.as_str()),
            Self::Pattern(regex) => regex.is_match(text),
        }
    }
}
