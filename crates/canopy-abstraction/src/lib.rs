//! Interaction abstraction layer for Canopy.
//!
//! This module defines the seam traits between the engines and their host:
//! the user-interaction surface (validated text input, list selection,
//! confirmation) and the progress sink. Hosts implement these against their
//! own UI toolkit; the engines only ever see the traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub mod scripted;

/// Represents an error surfaced by an interaction implementation.
#[derive(Error, Debug)]
pub enum InteractionError {
    /// The user dismissed a prompt without providing a value.
    ///
    /// This is the only interaction error hosts should not report as
    /// unexpected: it aborts the current phase and nothing more.
    #[error("operation cancelled by user")]
    Cancelled,

    /// The interaction surface itself failed (e.g., the host UI went away).
    #[error("interaction surface error: {0}")]
    Surface(String),
}

impl InteractionError {
    /// Returns `true` if this error represents a user cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type for interaction operations.
pub type Result<T> = std::result::Result<T, InteractionError>;

/// Outcome of an input validator.
///
/// A rejection re-prompts the same input with the message shown; it is
/// never surfaced to the caller of [`UserInterface::input`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Validation {
    /// The value is acceptable.
    Valid,
    /// The value is rejected; the message explains why.
    Invalid(String),
}

impl Validation {
    /// Returns `true` if the value was accepted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Validator callback for text input.
pub type Validator = Arc<dyn Fn(&str) -> Validation + Send + Sync>;

/// Options for a text input prompt.
#[derive(Clone)]
pub struct InputOptions {
    /// Prompt text shown to the user.
    pub prompt: String,
    /// Placeholder shown in the empty input field.
    pub placeholder: Option<String>,
    /// Validator applied to every submitted value.
    pub validator: Option<Validator>,
}

impl fmt::Debug for InputOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputOptions")
            .field("prompt", &self.prompt)
            .field("placeholder", &self.placeholder)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

impl InputOptions {
    /// Creates input options with the given prompt text.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), placeholder: None, validator: None }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the validator callback.
    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Runs the validator against a candidate value.
    ///
    /// Returns [`Validation::Valid`] when no validator is set.
    pub fn validate(&self, value: &str) -> Validation {
        self.validator.as_ref().map_or(Validation::Valid, |v| v(value))
    }
}

/// Key reserved for the "load more" affordance in pick lists.
///
/// Hosts that page their pick items append an item with this key; when the
/// user selects it, the host fetches the next page and re-invokes
/// [`UserInterface::pick`] with the longer list.
pub const LOAD_MORE_KEY: &str = "canopy.pick.load-more";

/// One selectable entry in a pick list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickItem {
    /// Label shown to the user.
    pub label: String,
    /// Secondary descriptive text.
    pub description: Option<String>,
    /// Opaque key returned on selection.
    pub key: String,
}

impl PickItem {
    /// Creates a pick item with the given label and key.
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self { label: label.into(), description: None, key: key.into() }
    }

    /// Sets the descriptive text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Creates the reserved "load more" entry.
    #[must_use]
    pub fn load_more() -> Self {
        Self::new("Load more...", LOAD_MORE_KEY)
    }

    /// Returns `true` if this is the reserved "load more" entry.
    #[must_use]
    pub fn is_load_more(&self) -> bool {
        self.key == LOAD_MORE_KEY
    }
}

/// A single progress report.
///
/// Progress is a side channel: updates carry an optional status message and
/// an optional percentage increment, and have no effect on control flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Status message to display.
    pub message: Option<String>,
    /// Percentage points to add to the overall progress.
    pub increment: Option<f64>,
}

impl ProgressUpdate {
    /// Creates an update carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), increment: None }
    }

    /// Creates an update carrying a message and an increment.
    pub fn with_increment(message: impl Into<String>, increment: f64) -> Self {
        Self { message: Some(message.into()), increment: Some(increment) }
    }
}

/// A trait for the user-interaction surface.
///
/// All implementations must be `Send + Sync` to allow sharing across the
/// engines via `Arc`.
#[async_trait]
pub trait UserInterface: Send + Sync {
    /// Prompts for a line of text input.
    ///
    /// Implementations loop on validator rejection: a value the validator
    /// rejects re-prompts with the rejection message and never surfaces to
    /// the caller. Only an accepted value or a dismissal ends the prompt.
    ///
    /// # Errors
    /// Returns [`InteractionError::Cancelled`] if the prompt is dismissed.
    async fn input(&self, options: &InputOptions) -> Result<String>;

    /// Prompts for a single selection from a labelled list.
    ///
    /// # Errors
    /// Returns [`InteractionError::Cancelled`] if the picker is dismissed.
    async fn pick(&self, prompt: &str, items: &[PickItem]) -> Result<PickItem>;

    /// Prompts for any number of selections from a labelled list.
    ///
    /// An empty selection is a legal result; only dismissal cancels.
    ///
    /// # Errors
    /// Returns [`InteractionError::Cancelled`] if the picker is dismissed.
    async fn pick_many(&self, prompt: &str, items: &[PickItem]) -> Result<Vec<PickItem>>;

    /// Asks a modal yes/no question.
    ///
    /// An explicit "no" is `Ok(false)`; dismissing the dialog without
    /// answering is [`InteractionError::Cancelled`].
    async fn confirm(&self, message: &str) -> Result<bool>;
}

/// A sink for progress updates.
pub trait ProgressSink: Send + Sync {
    /// Reports one progress update. Fire-and-forget.
    fn report(&self, update: ProgressUpdate);
}

/// Progress sink that discards all updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn report(&self, _update: ProgressUpdate) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_defaults_to_valid() {
        let options = InputOptions::new("Name");
        assert!(options.validate("anything").is_valid());
    }

    #[test]
    fn test_validator_rejects() {
        let options = InputOptions::new("Name").with_validator(Arc::new(|value: &str| {
            if value.is_empty() {
                Validation::Invalid("value must not be empty".to_string())
            } else {
                Validation::Valid
            }
        }));
        assert_eq!(
            options.validate(""),
            Validation::Invalid("value must not be empty".to_string())
        );
        assert!(options.validate("ok").is_valid());
    }

    #[test]
    fn test_load_more_sentinel() {
        let item = PickItem::load_more();
        assert!(item.is_load_more());
        assert!(!PickItem::new("Real", "real-key").is_load_more());
    }

    #[test]
    fn test_cancelled_is_distinguishable() {
        assert!(InteractionError::Cancelled.is_cancelled());
        assert!(!InteractionError::Surface("boom".to_string()).is_cancelled());
    }
}
