//! Scripted interaction surface for tests and headless hosts.
//!
//! [`ScriptedUserInterface`] answers prompts from a pre-loaded queue of
//! responses, and [`CollectingProgressSink`] records every update it
//! receives. Both live in the library proper (not behind a test gate) so
//! downstream crates can drive wizards without a real UI.

use crate::{
    InputOptions, InteractionError, PickItem, ProgressSink, ProgressUpdate, Result, UserInterface,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One canned response in a script.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedResponse {
    /// Answer the next `input` prompt with this value.
    Input(String),
    /// Answer the next `pick` prompt by selecting the item with this key.
    Pick(String),
    /// Answer the next `pick_many` prompt by selecting these keys.
    PickMany(Vec<String>),
    /// Answer the next `confirm` prompt.
    Confirm(bool),
    /// Dismiss the next prompt of any kind.
    Cancel,
}

/// User interface that replays a fixed script of responses.
///
/// An exhausted script answers every further prompt with
/// [`InteractionError::Cancelled`], which mirrors a user walking away.
#[derive(Debug, Default)]
pub struct ScriptedUserInterface {
    responses: Mutex<VecDeque<ScriptedResponse>>,
}

impl ScriptedUserInterface {
    /// Creates a scripted surface from a sequence of responses.
    pub fn new(responses: impl IntoIterator<Item = ScriptedResponse>) -> Self {
        Self { responses: Mutex::new(responses.into_iter().collect()) }
    }

    /// Appends a response to the end of the script.
    pub fn push(&self, response: ScriptedResponse) {
        self.responses.lock().expect("script lock poisoned").push_back(response);
    }

    /// Number of responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses.lock().expect("script lock poisoned").len()
    }

    fn next_response(&self) -> Option<ScriptedResponse> {
        self.responses.lock().expect("script lock poisoned").pop_front()
    }
}

#[async_trait]
impl UserInterface for ScriptedUserInterface {
    async fn input(&self, options: &InputOptions) -> Result<String> {
        // Keep consuming responses until one passes validation, the way a
        // real input box re-prompts on a rejected value.
        loop {
            match self.next_response() {
                Some(ScriptedResponse::Input(value)) => {
                    if options.validate(&value).is_valid() {
                        return Ok(value);
                    }
                }
                Some(ScriptedResponse::Cancel) | None => return Err(InteractionError::Cancelled),
                Some(other) => {
                    return Err(InteractionError::Surface(format!(
                        "scripted response {other:?} does not answer an input prompt"
                    )));
                }
            }
        }
    }

    async fn pick(&self, _prompt: &str, items: &[PickItem]) -> Result<PickItem> {
        match self.next_response() {
            Some(ScriptedResponse::Pick(key)) => items
                .iter()
                .find(|item| item.key == key)
                .cloned()
                .ok_or_else(|| {
                    InteractionError::Surface(format!("scripted pick key not in list: {key}"))
                }),
            Some(ScriptedResponse::Cancel) | None => Err(InteractionError::Cancelled),
            Some(other) => Err(InteractionError::Surface(format!(
                "scripted response {other:?} does not answer a pick prompt"
            ))),
        }
    }

    async fn pick_many(&self, _prompt: &str, items: &[PickItem]) -> Result<Vec<PickItem>> {
        match self.next_response() {
            Some(ScriptedResponse::PickMany(keys)) => keys
                .iter()
                .map(|key| {
                    items.iter().find(|item| &item.key == key).cloned().ok_or_else(|| {
                        InteractionError::Surface(format!("scripted pick key not in list: {key}"))
                    })
                })
                .collect(),
            Some(ScriptedResponse::Cancel) | None => Err(InteractionError::Cancelled),
            Some(other) => Err(InteractionError::Surface(format!(
                "scripted response {other:?} does not answer a multi-select prompt"
            ))),
        }
    }

    async fn confirm(&self, _message: &str) -> Result<bool> {
        match self.next_response() {
            Some(ScriptedResponse::Confirm(answer)) => Ok(answer),
            Some(ScriptedResponse::Cancel) | None => Err(InteractionError::Cancelled),
            Some(other) => Err(InteractionError::Surface(format!(
                "scripted response {other:?} does not answer a confirm prompt"
            ))),
        }
    }
}

/// Progress sink that records every update for later assertions.
#[derive(Debug, Default)]
pub struct CollectingProgressSink {
    updates: Mutex<Vec<ProgressUpdate>>,
}

impl CollectingProgressSink {
    /// Creates an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the updates received so far.
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates.lock().expect("progress lock poisoned").clone()
    }
}

impl ProgressSink for CollectingProgressSink {
    fn report(&self, update: ProgressUpdate) {
        self.updates.lock().expect("progress lock poisoned").push(update);
    }
}
