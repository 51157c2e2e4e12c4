//! Step traits for the wizard engine.
//!
//! A wizard is assembled from prompt steps (ordered user interaction) and
//! execute steps (priority-ordered side effects). Both operate on a shared
//! context type chosen by the caller.

use crate::error::Result;
use async_trait::async_trait;
use canopy_abstraction::{ProgressSink, UserInterface};
use serde::{Deserialize, Serialize};

/// Priority for execute step ordering.
///
/// Steps with lower priority values execute first; ties are broken by the
/// order steps were added to the wizard. Default priority is 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepPriority(pub u32);

impl Default for StepPriority {
    fn default() -> Self {
        Self(100)
    }
}

impl StepPriority {
    /// Create a new step priority.
    pub fn new(priority: u32) -> Self {
        Self(priority)
    }

    /// Get the priority value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// An ordered unit of user interaction.
///
/// Prompt steps run strictly sequentially in the order they were added;
/// each may depend on context fields set by the steps before it. A field
/// set by an earlier step is read-only to later steps unless the later
/// step explicitly owns it; the engine hands out `&mut C` and relies on
/// this contract.
#[async_trait]
pub trait PromptStep<C: Send>: Send + Sync {
    /// Name of the step, used in records, events, and logs.
    fn name(&self) -> &str;

    /// Returns `true` if the step should prompt for this run.
    ///
    /// A step whose guard returns `false` is skipped entirely: no prompt,
    /// no context mutation, no progress side effects.
    fn should_prompt(&self, _context: &C) -> bool {
        true
    }

    /// Gathers input from the user and records it on the context.
    ///
    /// # Errors
    /// Returns [`WizardError::Cancelled`](crate::WizardError::Cancelled) if
    /// the user dismisses the prompt; any error aborts the prompt phase.
    async fn prompt(&self, context: &mut C, ui: &dyn UserInterface) -> Result<()>;
}

/// An ordered unit of side-effecting work.
///
/// Execute steps run strictly sequentially in ascending [`StepPriority`]
/// order regardless of insertion order. Execution is at-least-once and
/// forward-only: a step that fails after partially creating a remote
/// resource leaves that resource in place, and no compensating actions run
/// for steps already executed.
#[async_trait]
pub trait ExecuteStep<C: Send>: Send + Sync {
    /// Name of the step, used in records, events, and logs.
    fn name(&self) -> &str;

    /// Ordering priority. Lower values run first.
    fn priority(&self) -> StepPriority {
        StepPriority::default()
    }

    /// Returns `true` if the step should execute for this run.
    fn should_execute(&self, _context: &C) -> bool {
        true
    }

    /// Performs the step's side effects.
    ///
    /// Progress reporting is a side channel with no effect on control flow.
    /// Once started, a step runs to completion or failure; there is no
    /// mid-flight cancellation.
    async fn execute(&self, context: &mut C, progress: &dyn ProgressSink) -> Result<()>;
}
