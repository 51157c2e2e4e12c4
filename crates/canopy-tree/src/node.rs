//! Tree node model.
//!
//! A [`TreeNode`] represents one remote resource or a synthetic grouping in
//! a host's tree view. Nodes are constructed lazily when an ancestor is
//! expanded and discarded when the ancestor's child list is recomputed.

use crate::error::NodeError;
use serde::{Deserialize, Serialize};

/// Context value carried by "invalid item" placeholder nodes.
pub const INVALID_CONTEXT: &str = "canopy.item.invalid";

/// Context value carried by the per-page error summary node.
pub const ERROR_SUMMARY_CONTEXT: &str = "canopy.item.errorSummary";

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A real remote resource or grouping.
    Resource,
    /// A placeholder for one item that failed to construct but still had a
    /// derivable label.
    Invalid,
    /// The single trailing placeholder summarizing items that failed with
    /// no derivable label.
    ErrorSummary,
}

/// One entry in a resource tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Stable id, used for tree identity and reveal/find operations.
    pub id: String,
    /// Label shown in the tree.
    pub label: String,
    /// Secondary text shown next to the label.
    pub description: Option<String>,
    /// Icon name, resolved by the host.
    pub icon: Option<String>,
    /// Context tag used for picker filtering and command enablement.
    pub context_value: String,
    /// Id of the parent node. Back-reference only, no ownership.
    pub parent_id: Option<String>,
    /// Host payload, typically the raw remote API response for this item.
    pub metadata: Option<serde_json::Value>,
    /// What this node stands for.
    pub kind: NodeKind,
    /// Error message, present on placeholder nodes.
    pub error: Option<String>,
}

impl TreeNode {
    /// Creates a resource node.
    ///
    /// # Arguments
    /// * `id` - Stable id for tree identity
    /// * `label` - Label shown in the tree
    /// * `context_value` - Context tag for filtering and command enablement
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        context_value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            icon: None,
            context_value: context_value.into(),
            parent_id: None,
            metadata: None,
            kind: NodeKind::Resource,
            error: None,
        }
    }

    /// Sets the description text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the icon name.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the parent back-reference.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Attaches the host payload.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Creates a placeholder for an item that failed to construct but still
    /// yielded a label.
    ///
    /// The position within the page keeps the id stable and unique when two
    /// broken items share a label.
    pub fn invalid_item(position: usize, label: impl Into<String>, error: &NodeError) -> Self {
        let label = label.into();
        Self {
            id: format!("{INVALID_CONTEXT}.{position}"),
            label,
            description: Some("Invalid".to_string()),
            icon: Some("warning".to_string()),
            context_value: INVALID_CONTEXT.to_string(),
            parent_id: None,
            metadata: None,
            kind: NodeKind::Invalid,
            error: Some(error.to_string()),
        }
    }

    /// Creates the trailing summary placeholder for unlabelable failures.
    pub fn error_summary(error: &NodeError) -> Self {
        Self {
            id: format!("{ERROR_SUMMARY_CONTEXT}.page"),
            label: "Some items could not be displayed".to_string(),
            description: None,
            icon: Some("warning".to_string()),
            context_value: ERROR_SUMMARY_CONTEXT.to_string(),
            parent_id: None,
            metadata: None,
            kind: NodeKind::ErrorSummary,
            error: Some(error.to_string()),
        }
    }

    /// Returns `true` for either placeholder shape.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.kind != NodeKind::Resource
    }
}
