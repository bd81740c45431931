//! In-process backend for driving the adapter and orchestrator in tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

use crate::providers::{GenerativeBackend, ModelDescriptor, ProviderError};

/// One scripted reply: wait `delay`, then answer.
pub struct Step {
    delay: Duration,
    reply: Result<String, ProviderError>,
}

impl Step {
    pub fn now(reply: Result<String, ProviderError>) -> Self {
        Self::after(Duration::ZERO, reply)
    }

    pub fn after(delay: Duration, reply: Result<String, ProviderError>) -> Self {
        Self { delay, reply }
    }
}

/// Answers `generate` calls from a queue, recording the requested models.
///
/// An exhausted queue answers with a 500.
pub struct ScriptedBackend {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<String>>,
    listing: Vec<ModelDescriptor>,
}

impl ScriptedBackend {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            calls: Mutex::new(Vec::new()),
            listing: Vec::new(),
        }
    }

    /// Model listing as `(name, space-separated methods)` pairs.
    pub fn with_listing(mut self, models: &[(&str, &str)]) -> Self {
        self.listing = models
            .iter()
            .map(|(name, methods)| ModelDescriptor {
                name: name.to_string(),
                supported_generation_methods: methods.split_whitespace().map(String::from).collect(),
            })
            .collect();
        self
    }

    /// Models requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

/// A reply string that embeds `value` between chatter.
pub fn reply_with(value: &serde_json::Value) -> String {
    format!("Segue o resultado:\n```json\n{}\n```", value)
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn generate(&self, model: &str, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.lock().push(model.to_string());
        let step = self.steps.lock().pop_front();

        match step {
            Some(step) => {
                if !step.delay.is_zero() {
                    tokio::time::sleep(step.delay).await;
                }
                step.reply
            }
            None => Err(ProviderError::ApiError {
                status: 500,
                message: Some("script exhausted".to_string()),
            }),
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError> {
        Ok(self.listing.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
