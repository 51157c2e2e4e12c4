//! Lazy resource-tree loading for Canopy.
//!
//! This crate provides the pagination and error-isolation contract that
//! remote-backed tree nodes implement: fetch a page, remember a
//! continuation cursor, support forced cache invalidation, and isolate
//! per-item construction failures so one malformed item does not blank
//! the whole subtree.
//!
//! Hosts implement [`ResourceSource`] over their listing client and
//! [`NodeBuilder`] over their item type; [`TreeLoader`] does the rest.

pub mod cursor;
pub mod error;
pub mod loader;
pub mod node;
pub mod source;

pub use cursor::{PageCursor, ResourcePage};
pub use error::{NodeError, Result, SourceError, TreeError};
pub use loader::TreeLoader;
pub use node::{NodeKind, TreeNode, ERROR_SUMMARY_CONTEXT, INVALID_CONTEXT};
pub use source::{NodeBuilder, ResourceSource};
