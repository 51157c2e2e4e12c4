//! Lazy, paginated child loading with per-item error isolation.

use crate::cursor::PageCursor;
use crate::error::{NodeError, Result};
use crate::node::TreeNode;
use crate::source::{NodeBuilder, ResourceSource};
use futures::future::join_all;
use tracing::{debug, warn};

/// Incremental child loader for one container node.
///
/// Fetches pages from a [`ResourceSource`], remembers the continuation
/// cursor between calls, and builds children through a [`NodeBuilder`]
/// with per-item error isolation: one malformed item becomes a placeholder
/// instead of blanking the whole subtree.
///
/// Each loader is owned by its node; concurrent fetches for different
/// nodes are independent, and a node's own cursor state is only mutated by
/// its own in-flight fetch.
#[derive(Debug)]
pub struct TreeLoader<S, B> {
    source: S,
    builder: B,
    cursor: Option<PageCursor>,
    fetched: bool,
}

impl<S, B> TreeLoader<S, B>
where
    S: ResourceSource,
    B: NodeBuilder<S::Item>,
{
    /// Creates a loader that has fetched nothing yet.
    pub fn new(source: S, builder: B) -> Self {
        Self { source, builder, cursor: None, fetched: false }
    }

    /// Returns `true` iff the previous fetch returned a continuation
    /// cursor.
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    /// Loads the next batch of children.
    ///
    /// With `clear_cache` set, any stored cursor is discarded first and
    /// page 1 is fetched fresh. Otherwise the stored cursor selects the
    /// next page, or page 1 if nothing has been fetched yet. Calling this
    /// after exhaustion (without `clear_cache`) is an idempotent no-op
    /// returning an empty list.
    ///
    /// # Errors
    /// Returns [`TreeError::Source`](crate::TreeError::Source) if the
    /// remote fetch fails. Item construction failures never abort the
    /// load; they surface as placeholder nodes.
    pub async fn load_more(&mut self, clear_cache: bool) -> Result<Vec<TreeNode>> {
        if clear_cache {
            self.cursor = None;
            self.fetched = false;
        }

        if self.fetched && self.cursor.is_none() {
            debug!("Listing exhausted, nothing to load");
            return Ok(Vec::new());
        }

        let page = self.source.fetch_page(self.cursor.as_ref()).await?;
        debug!(
            item_count = page.items.len(),
            has_next = page.next_cursor.is_some(),
            "Fetched page"
        );
        self.cursor = page.next_cursor;
        self.fetched = true;

        Ok(self.build_children(&page.items).await)
    }

    /// Builds nodes for one page of raw items, isolating per-item errors.
    ///
    /// Construction runs concurrently across the page; output preserves
    /// the page's item order, with placeholders interleaved at the
    /// position of each labelable failure. Unlabelable failures are
    /// dropped, and the last of them feeds a single trailing summary node.
    async fn build_children(&self, items: &[S::Item]) -> Vec<TreeNode> {
        let results = join_all(items.iter().map(|item| self.builder.build(item))).await;

        let mut nodes = Vec::with_capacity(results.len());
        let mut last_unlabelable: Option<NodeError> = None;

        for (position, (item, result)) in items.iter().zip(results).enumerate() {
            match result {
                Ok(node) => nodes.push(node),
                Err(error) => match self.builder.label_on_error(item) {
                    Some(label) => {
                        warn!(
                            position,
                            label = %label,
                            error = %error,
                            "Item failed to construct, showing invalid entry"
                        );
                        nodes.push(TreeNode::invalid_item(position, label, &error));
                    }
                    None => {
                        warn!(
                            position,
                            error = %error,
                            "Item failed to construct with no derivable label"
                        );
                        last_unlabelable = Some(error);
                    }
                },
            }
        }

        if let Some(error) = last_unlabelable {
            nodes.push(TreeNode::error_summary(&error));
        }

        nodes
    }
}
