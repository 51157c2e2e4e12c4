//! Core wizard execution engine.
//!
//! A [`Wizard`] runs a two-phase workflow: a prompt phase that gathers all
//! required input via sequential, possibly-interactive steps, followed by
//! an execute phase that performs side effects in ascending priority order.

use crate::error::Result;
use crate::progress::{ProgressEvent, WizardProgress};
use crate::records::{RunReport, StepRecord, WizardPhase};
use crate::step::{ExecuteStep, PromptStep};
use canopy_abstraction::{ProgressSink, ProgressUpdate, UserInterface};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info};
use uuid::Uuid;

/// A two-phase prompt/execute workflow over a shared context.
///
/// The context type `C` is chosen by the caller: define the full field set
/// for one wizard up front, with `Option` fields for state that steps
/// populate as the run progresses. The context is created per run and
/// discarded after `execute` returns or fails.
///
/// The engine provides no dependency resolution: a step whose guard reads
/// a field set by an earlier step in the same phase must be ordered after
/// that step (list order for prompts, priority for executes).
pub struct Wizard<C> {
    title: String,
    run_id: Uuid,
    ui: Arc<dyn UserInterface>,
    progress_sink: Arc<dyn ProgressSink>,
    events: WizardProgress,
    prompt_steps: Vec<Box<dyn PromptStep<C>>>,
    execute_steps: Vec<Box<dyn ExecuteStep<C>>>,
}

impl<C> std::fmt::Debug for Wizard<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wizard")
            .field("title", &self.title)
            .field("run_id", &self.run_id)
            .field("prompt_steps", &self.prompt_steps.len())
            .field("execute_steps", &self.execute_steps.len())
            .finish_non_exhaustive()
    }
}

impl<C: Send> Wizard<C> {
    /// Creates a wizard with no steps.
    ///
    /// # Arguments
    /// * `title` - Human-readable title, used in progress messages
    /// * `ui` - Interaction surface handed to prompt steps
    /// * `progress_sink` - Sink handed to execute steps
    pub fn new(
        title: impl Into<String>,
        ui: Arc<dyn UserInterface>,
        progress_sink: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            title: title.into(),
            run_id: Uuid::new_v4(),
            ui,
            progress_sink,
            events: WizardProgress::new(),
            prompt_steps: Vec::new(),
            execute_steps: Vec::new(),
        }
    }

    /// Appends a prompt step. List order is execution order.
    #[must_use]
    pub fn with_prompt_step(mut self, step: impl PromptStep<C> + 'static) -> Self {
        self.prompt_steps.push(Box::new(step));
        self
    }

    /// Adds an execute step. Insertion order only breaks priority ties.
    #[must_use]
    pub fn with_execute_step(mut self, step: impl ExecuteStep<C> + 'static) -> Self {
        self.execute_steps.push(Box::new(step));
        self
    }

    /// Subscribes to step lifecycle events for this wizard.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.events.subscribe()
    }

    /// The wizard title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Unique id of this wizard instance, used in logs and reports.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Runs the prompt phase.
    ///
    /// Steps run strictly sequentially in list order; each is awaited to
    /// completion before the next begins, so a step may depend on context
    /// state set by its predecessors. A step whose guard returns false is
    /// skipped with no observable side effects beyond its `Skipped` record.
    ///
    /// # Errors
    /// Any step error aborts the phase immediately and becomes its terminal
    /// result; context mutations already applied are not rolled back. A
    /// dismissal surfaces as [`WizardError::Cancelled`](crate::WizardError::Cancelled).
    pub async fn prompt(&self, context: &mut C) -> Result<RunReport> {
        info!(
            run_id = %self.run_id,
            title = %self.title,
            step_count = self.prompt_steps.len(),
            "Starting prompt phase"
        );
        self.events.emit(ProgressEvent::PhaseStarted {
            phase: WizardPhase::Prompt,
            step_count: self.prompt_steps.len(),
        });

        let mut report = RunReport::new(self.run_id, WizardPhase::Prompt);

        for step in &self.prompt_steps {
            if !step.should_prompt(context) {
                report.records.push(StepRecord::skipped(step.name()));
                continue;
            }

            debug!(run_id = %self.run_id, step = %step.name(), "Prompting");
            self.events.emit(ProgressEvent::StepStarted {
                phase: WizardPhase::Prompt,
                step: step.name().to_string(),
            });

            let mut record = StepRecord::started(step.name());
            match step.prompt(context, self.ui.as_ref()).await {
                Ok(()) => {
                    self.events.emit(ProgressEvent::StepCompleted {
                        phase: WizardPhase::Prompt,
                        step: step.name().to_string(),
                        duration_ms: record_duration(&mut record),
                    });
                    report.records.push(record);
                }
                Err(e) => {
                    record.mark_failed(e.to_string());
                    self.events.emit(ProgressEvent::StepFailed {
                        phase: WizardPhase::Prompt,
                        step: step.name().to_string(),
                        error: e.to_string(),
                    });
                    if e.is_cancelled() {
                        info!(
                            run_id = %self.run_id,
                            step = %step.name(),
                            "Prompt phase cancelled by user"
                        );
                    } else {
                        error!(
                            run_id = %self.run_id,
                            step = %step.name(),
                            error = %e,
                            "Prompt step failed"
                        );
                    }
                    return Err(e);
                }
            }
        }

        info!(
            run_id = %self.run_id,
            executed = report.executed_count(),
            skipped = report.skipped_count(),
            "Prompt phase complete"
        );
        Ok(report)
    }

    /// Runs the execute phase.
    ///
    /// The ascending-priority, insertion-stable order is computed once;
    /// steps then run strictly sequentially, each guard evaluated
    /// immediately before its step.
    ///
    /// # Errors
    /// A failing step aborts the phase; steps already executed are not
    /// compensated. Execution is at-least-once and forward-only, and the
    /// engine never retries.
    pub async fn execute(&self, context: &mut C) -> Result<RunReport> {
        let mut order: Vec<usize> = (0..self.execute_steps.len()).collect();
        order.sort_by_key(|&index| self.execute_steps[index].priority());

        info!(
            run_id = %self.run_id,
            title = %self.title,
            step_count = self.execute_steps.len(),
            "Starting execute phase"
        );
        self.events.emit(ProgressEvent::PhaseStarted {
            phase: WizardPhase::Execute,
            step_count: self.execute_steps.len(),
        });

        let mut report = RunReport::new(self.run_id, WizardPhase::Execute);
        let increment = if self.execute_steps.is_empty() {
            0.0
        } else {
            100.0 / self.execute_steps.len() as f64
        };

        for index in order {
            let step = &self.execute_steps[index];
            if !step.should_execute(context) {
                debug!(run_id = %self.run_id, step = %step.name(), "Skipping execute step");
                report.records.push(StepRecord::skipped(step.name()));
                continue;
            }

            info!(
                run_id = %self.run_id,
                step = %step.name(),
                priority = step.priority().value(),
                "Executing step"
            );
            self.events.emit(ProgressEvent::StepStarted {
                phase: WizardPhase::Execute,
                step: step.name().to_string(),
            });
            self.progress_sink.report(ProgressUpdate::with_increment(
                format!("{}: {}", self.title, step.name()),
                increment,
            ));

            let mut record = StepRecord::started(step.name());
            match step.execute(context, self.progress_sink.as_ref()).await {
                Ok(()) => {
                    self.events.emit(ProgressEvent::StepCompleted {
                        phase: WizardPhase::Execute,
                        step: step.name().to_string(),
                        duration_ms: record_duration(&mut record),
                    });
                    report.records.push(record);
                }
                Err(e) => {
                    record.mark_failed(e.to_string());
                    self.events.emit(ProgressEvent::StepFailed {
                        phase: WizardPhase::Execute,
                        step: step.name().to_string(),
                        error: e.to_string(),
                    });
                    error!(
                        run_id = %self.run_id,
                        step = %step.name(),
                        error = %e,
                        "Execute step failed"
                    );
                    return Err(e);
                }
            }
        }

        info!(
            run_id = %self.run_id,
            executed = report.executed_count(),
            skipped = report.skipped_count(),
            "Execute phase complete"
        );
        Ok(report)
    }
}

/// Marks a record completed and returns its duration for event emission.
fn record_duration(record: &mut StepRecord) -> u64 {
    record.mark_completed();
    record.duration_ms.unwrap_or(0)
}
