//! Multi-step wizard engine for Canopy.
//!
//! This crate provides a two-phase workflow engine: an ordered, interactive
//! prompt phase followed by a priority-ordered, side-effecting execute
//! phase, both operating on a shared mutable context chosen by the caller.
//! Hosts supply concrete steps and the interaction surface; the engine
//! supplies ordering, guard evaluation, error propagation, progress, and
//! run reporting.
//!
//! Execution is rollback-free by design: cancellation or failure after
//! partial progress leaves already-applied effects in place, and a fresh
//! run rebuilds its context from scratch.

pub mod engine;
pub mod error;
pub mod progress;
pub mod records;
pub mod step;

pub use engine::Wizard;
pub use error::{Result, Sensitive, WizardError};
pub use progress::{ProgressEvent, TracingProgressSink, WizardProgress};
pub use records::{RunReport, StepRecord, StepStatus, WizardPhase};
pub use step::{ExecuteStep, PromptStep, StepPriority};

// Re-exported so hosts implementing steps only need this crate.
pub use canopy_abstraction::{
    InputOptions, InteractionError, PickItem, ProgressSink, ProgressUpdate, UserInterface,
    Validation, Validator,
};
