//! Seam traits between the loader and the host's remote client.

use crate::cursor::{PageCursor, ResourcePage};
use crate::error::{NodeError, SourceError};
use crate::node::TreeNode;
use async_trait::async_trait;

/// A remote listing endpoint.
///
/// Implementations wrap the host's client for one container (a
/// subscription's apps, an app's environments, and so on). The loader
/// never inspects cursors; it only hands back whatever the previous fetch
/// returned.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Raw item type returned by the remote.
    type Item: Send + Sync;

    /// Fetches one page.
    ///
    /// # Arguments
    /// * `cursor` - Continuation token from the previous page, or `None`
    ///   for the first page
    ///
    /// # Errors
    /// Returns a [`SourceError`] if the remote call fails; this aborts the
    /// page load.
    async fn fetch_page(
        &self,
        cursor: Option<&PageCursor>,
    ) -> Result<ResourcePage<Self::Item>, SourceError>;
}

/// Builds tree nodes from raw items.
///
/// `build` may be invoked concurrently across the items of one page; the
/// loader reassembles results in the page's item order regardless of
/// completion order.
#[async_trait]
pub trait NodeBuilder<T: Send + Sync>: Send + Sync {
    /// Constructs the node for one raw item.
    ///
    /// # Errors
    /// A [`NodeError`] is isolated to this item: the loader substitutes a
    /// placeholder (or drops the item into the page's error summary) and
    /// continues with the rest of the page.
    async fn build(&self, item: &T) -> Result<TreeNode, NodeError>;

    /// Derives a human-readable label for an item whose `build` failed.
    ///
    /// Returning `Some` turns the failure into a recognizable "invalid
    /// item" entry; returning `None` drops the item and feeds the page's
    /// generic error summary.
    fn label_on_error(&self, _item: &T) -> Option<String> {
        None
    }
}
