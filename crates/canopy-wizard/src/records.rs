//! Step records and run reports.
//!
//! Each wizard phase produces a report of what ran, what was skipped, and
//! how long each step took.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a wizard step within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step is currently running.
    InProgress,
    /// Step completed successfully.
    Completed,
    /// Step failed with an error.
    Failed,
    /// Step was skipped because its guard returned false.
    Skipped,
}

/// The wizard phase a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardPhase {
    /// Interactive input gathering.
    Prompt,
    /// Side-effecting execution.
    Execute,
}

/// Record of one step within a phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    /// Step name.
    pub step: String,
    /// Status of the step.
    pub status: StepStatus,
    /// When the step was started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the step completed, failed, or was skipped.
    pub completed_at: Option<DateTime<Utc>>,
    /// Duration of step execution in milliseconds.
    pub duration_ms: Option<u64>,
    /// Error message if the step failed.
    pub error: Option<String>,
}

impl StepRecord {
    /// Creates a record for a step that is starting now.
    pub fn started(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::InProgress,
            started_at: Some(Utc::now()),
            completed_at: None,
            duration_ms: None,
            error: None,
        }
    }

    /// Creates a record for a step skipped by its guard.
    pub fn skipped(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Skipped,
            started_at: None,
            completed_at: Some(Utc::now()),
            duration_ms: None,
            error: None,
        }
    }

    /// Marks the step as completed now.
    pub fn mark_completed(&mut self) {
        self.status = StepStatus::Completed;
        self.finish();
    }

    /// Marks the step as failed with an error message.
    pub fn mark_failed(&mut self, error: impl Into<String>) {
        self.status = StepStatus::Failed;
        self.error = Some(error.into());
        self.finish();
    }

    fn finish(&mut self) {
        let completed_at = Utc::now();
        self.completed_at = Some(completed_at);
        self.duration_ms = self.started_at.map(|started_at| {
            completed_at.signed_duration_since(started_at).num_milliseconds().max(0) as u64
        });
    }
}

/// Report for one completed wizard phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Run this report belongs to.
    pub run_id: Uuid,
    /// Phase the report covers.
    pub phase: WizardPhase,
    /// Per-step records in the order steps were considered.
    pub records: Vec<StepRecord>,
}

impl RunReport {
    /// Creates an empty report for a phase.
    pub fn new(run_id: Uuid, phase: WizardPhase) -> Self {
        Self { run_id, phase, records: Vec::new() }
    }

    /// Number of steps that actually ran to completion.
    pub fn executed_count(&self) -> usize {
        self.records.iter().filter(|r| r.status == StepStatus::Completed).count()
    }

    /// Number of steps skipped by their guards.
    pub fn skipped_count(&self) -> usize {
        self.records.iter().filter(|r| r.status == StepStatus::Skipped).count()
    }

    /// Names of completed steps, in execution order.
    pub fn executed_steps(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.status == StepStatus::Completed)
            .map(|r| r.step.as_str())
            .collect()
    }
}
