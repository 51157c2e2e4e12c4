//! Pagination cursor and page model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque continuation token returned by a remote listing call.
///
/// An absent cursor means the listing is exhausted. The loader stores the
/// cursor between fetches and never inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor(String);

impl PageCursor {
    /// Wraps a raw continuation token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for handing back to the remote.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of raw items from a remote listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePage<T> {
    /// Raw items in remote order.
    pub items: Vec<T>,
    /// Cursor for the next page, absent when exhausted.
    pub next_cursor: Option<PageCursor>,
}

impl<T> ResourcePage<T> {
    /// Creates a final page with no continuation.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next_cursor: None }
    }

    /// Creates a page that continues at the given cursor.
    pub fn with_next(items: Vec<T>, next_cursor: PageCursor) -> Self {
        Self { items, next_cursor: Some(next_cursor) }
    }
}
