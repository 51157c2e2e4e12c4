//! Error types for the wizard engine.

use canopy_abstraction::InteractionError;
use std::fmt;
use thiserror::Error;

/// Wrapper that masks a value in user-facing text.
///
/// Remote resource labels and identifiers are reported through this wrapper
/// so that error dialogs and logs never echo them verbatim. The raw value
/// stays available to owning code via [`Sensitive::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wraps a value.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Unwraps the raw value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sensitive(<redacted>)")
    }
}

/// Errors that can occur during a wizard run.
#[derive(Error, Debug)]
pub enum WizardError {
    /// The user dismissed a prompt without providing a value.
    ///
    /// Aborts the current phase. Not a bug: commands should treat this as
    /// a normal outcome and skip their unexpected-error reporting.
    #[error("operation cancelled by user")]
    Cancelled,

    /// The interaction surface failed for a reason other than cancellation.
    #[error("interaction surface error: {0}")]
    Interaction(String),

    /// A remote listing, create, or delete call failed.
    ///
    /// The resource label is masked in the rendered message.
    #[error("remote operation '{operation}' failed for resource {resource}: {source}")]
    RemoteOperation {
        /// Operation that failed (e.g. "delete", "create").
        operation: String,
        /// Masked label or identifier of the affected resource.
        resource: Sensitive<String>,
        /// Underlying client error.
        #[source]
        source: anyhow::Error,
    },

    /// A step failed for a reason internal to the step.
    #[error("step execution failed: {0}")]
    Execution(String),
}

impl WizardError {
    /// Builds a [`WizardError::RemoteOperation`].
    pub fn remote(
        operation: impl Into<String>,
        resource: impl Into<String>,
        source: anyhow::Error,
    ) -> Self {
        Self::RemoteOperation {
            operation: operation.into(),
            resource: Sensitive::new(resource.into()),
            source,
        }
    }

    /// Returns `true` if this error represents a user cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<InteractionError> for WizardError {
    fn from(error: InteractionError) -> Self {
        match error {
            InteractionError::Cancelled => Self::Cancelled,
            InteractionError::Surface(message) => Self::Interaction(message),
        }
    }
}

/// Result type for wizard operations.
pub type Result<T> = std::result::Result<T, WizardError>;
