//! Page-range expressions.
//!
//! Grammar (one-based, inclusive bounds):
//!
//! ```text
//! expr  := token (',' token)*
//! token := WS* (NUMBER | NUMBER '-' NUMBER) WS*
//! ```
//!
//! Empty tokens (for example from a trailing comma) are skipped. Pages named
//! more than once collapse to a single index, and the result is always sorted
//! ascending no matter how the expression was written.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::PageRangeError;

/// Parse `expr` into sorted, zero-based page indices for a document with
/// `max_pages` pages.
///
/// A blank expression selects nothing. Treating a blank expression as "all
/// pages" is left to the caller.
///
/// # Errors
///
/// Fails on the first malformed or out-of-bounds token; no partial result is
/// returned.
pub fn parse_page_range(expr: &str, max_pages: usize) -> Result<Vec<usize>, PageRangeError> {
    let mut pages = BTreeSet::new();
    for token in expr.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_number(start, token, max_pages)?;
                let end = parse_number(end, token, max_pages)?;
                if start < 1 || start > end || end > max_pages {
                    return Err(PageRangeError::InvalidRange {
                        token: token.to_string(),
                        max_pages,
                    });
                }
                pages.extend(start..=end);
            }
            None => {
                let page = parse_number(token, token, max_pages)?;
                if page < 1 || page > max_pages {
                    return Err(PageRangeError::PageOutOfBounds { page, max_pages });
                }
                pages.insert(page);
            }
        }
    }
    Ok(pages.into_iter().map(|page| page - 1).collect())
}

fn parse_number(text: &str, token: &str, max_pages: usize) -> Result<usize, PageRangeError> {
    text.trim()
        .parse::<usize>()
        .map_err(|_| PageRangeError::InvalidToken {
            token: token.to_string(),
            max_pages,
        })
}

/// A validated range expression together with the pages it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    expr: String,
    indices: Vec<usize>,
}

impl PageRange {
    /// Validate `expr` against `max_pages`. The trimmed text is kept so it
    /// can be shown and edited again.
    pub fn parse(expr: &str, max_pages: usize) -> Result<Self, PageRangeError> {
        let indices = parse_page_range(expr, max_pages)?;
        Ok(Self {
            expr: expr.trim().to_string(),
            indices,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.expr
    }

    /// Zero-based indices, ascending and unique.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// One-based page numbers, as the user wrote them.
    pub fn page_numbers(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().map(|index| index + 1)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}
