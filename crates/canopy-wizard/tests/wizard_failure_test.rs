//! Integration tests for failure and cancellation semantics.
//!
//! Both phases are forward-only: an error is terminal for its phase, no
//! compensating actions run, and context mutations already applied stay.

use async_trait::async_trait;
use canopy_abstraction::scripted::{
    CollectingProgressSink, ScriptedResponse, ScriptedUserInterface,
};
use canopy_abstraction::{InputOptions, ProgressSink, UserInterface};
use canopy_wizard::{ExecuteStep, PromptStep, Result, StepPriority, Wizard, WizardError};
use std::sync::Arc;

#[derive(Debug, Default)]
struct DeleteContext {
    executed: Vec<String>,
    target: Option<String>,
    confirmed: bool,
}

struct Recorder {
    name: &'static str,
    priority: u32,
    fail: bool,
}

#[async_trait]
impl ExecuteStep<DeleteContext> for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    fn priority(&self) -> StepPriority {
        StepPriority::new(self.priority)
    }

    async fn execute(
        &self,
        context: &mut DeleteContext,
        _progress: &dyn ProgressSink,
    ) -> Result<()> {
        if self.fail {
            return Err(WizardError::remote(
                "delete",
                context.target.clone().unwrap_or_default(),
                anyhow::anyhow!("409 conflict"),
            ));
        }
        context.executed.push(self.name.to_string());
        Ok(())
    }
}

struct TargetStep;

#[async_trait]
impl PromptStep<DeleteContext> for TargetStep {
    fn name(&self) -> &str {
        "target"
    }

    async fn prompt(&self, context: &mut DeleteContext, ui: &dyn UserInterface) -> Result<()> {
        context.target = Some(ui.input(&InputOptions::new("Resource to delete")).await?);
        Ok(())
    }
}

struct ConfirmStep;

#[async_trait]
impl PromptStep<DeleteContext> for ConfirmStep {
    fn name(&self) -> &str {
        "confirm"
    }

    async fn prompt(&self, context: &mut DeleteContext, ui: &dyn UserInterface) -> Result<()> {
        context.confirmed = ui.confirm("Really delete?").await?;
        Ok(())
    }
}

#[tokio::test]
async fn test_failing_step_stops_later_steps() {
    let wizard: Wizard<DeleteContext> = Wizard::new(
        "Delete app",
        Arc::new(ScriptedUserInterface::default()),
        Arc::new(CollectingProgressSink::new()),
    )
    .with_execute_step(Recorder { name: "first", priority: 100, fail: false })
    .with_execute_step(Recorder { name: "second", priority: 200, fail: true })
    .with_execute_step(Recorder { name: "third", priority: 300, fail: false });

    let mut context = DeleteContext::default();
    let err = wizard.execute(&mut context).await.unwrap_err();

    // Step 1 ran, step 2 failed, step 3 never executed.
    assert_eq!(context.executed, vec!["first"]);
    assert!(matches!(err, WizardError::RemoteOperation { .. }));
}

#[tokio::test]
async fn test_completed_steps_are_not_rolled_back_on_failure() {
    let wizard: Wizard<DeleteContext> = Wizard::new(
        "Delete app",
        Arc::new(ScriptedUserInterface::default()),
        Arc::new(CollectingProgressSink::new()),
    )
    .with_execute_step(Recorder { name: "created", priority: 100, fail: false })
    .with_execute_step(Recorder { name: "boom", priority: 200, fail: true });

    let mut context = DeleteContext::default();
    let _ = wizard.execute(&mut context).await;

    // Forward-only: the first step's effect survives the phase failure.
    assert_eq!(context.executed, vec!["created"]);
}

#[tokio::test]
async fn test_cancellation_aborts_prompt_phase_and_keeps_prior_mutations() {
    let ui = ScriptedUserInterface::new([
        ScriptedResponse::Input("stale-site".to_string()),
        ScriptedResponse::Cancel,
    ]);
    let wizard: Wizard<DeleteContext> = Wizard::new(
        "Delete app",
        Arc::new(ui),
        Arc::new(CollectingProgressSink::new()),
    )
    .with_prompt_step(TargetStep)
    .with_prompt_step(ConfirmStep);

    let mut context = DeleteContext::default();
    let err = wizard.prompt(&mut context).await.unwrap_err();

    assert!(err.is_cancelled());
    // The first step's mutation is visible; a re-run rebuilds the context
    // fresh, so nothing is rolled back here.
    assert_eq!(context.target.as_deref(), Some("stale-site"));
    assert!(!context.confirmed);
}

#[tokio::test]
async fn test_remote_error_masks_resource_label() {
    let wizard: Wizard<DeleteContext> = Wizard::new(
        "Delete app",
        Arc::new(ScriptedUserInterface::default()),
        Arc::new(CollectingProgressSink::new()),
    )
    .with_execute_step(Recorder { name: "boom", priority: 100, fail: true });

    let mut context = DeleteContext { target: Some("customer-prod-site".to_string()), ..Default::default() };
    let err = wizard.execute(&mut context).await.unwrap_err();
    let rendered = err.to_string();

    assert!(rendered.contains("delete"));
    assert!(!rendered.contains("customer-prod-site"));

    // The raw value is still available to the owning code.
    if let WizardError::RemoteOperation { resource, .. } = &err {
        assert_eq!(resource.expose(), "customer-prod-site");
    } else {
        panic!("expected RemoteOperation error");
    }
}

#[tokio::test]
async fn test_cancellation_is_not_reported_as_unexpected() {
    let err: WizardError = canopy_abstraction::InteractionError::Cancelled.into();
    assert!(err.is_cancelled());

    let err = WizardError::Execution("step blew up".to_string());
    assert!(!err.is_cancelled());
}
