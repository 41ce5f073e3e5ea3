//! Scripted classifier for tests and offline demos.
//!
//! Returns queued classifications (FIFO) and falls back to a fixed one once
//! the queue is drained. Every query is recorded for assertions.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use fm_protocol::Classification;

use super::IntentClassifier;
use crate::error::{ClassifyError, ClassifyResult};

enum Step {
    Respond(Classification),
    Fail(String),
}

/// Deterministic `IntentClassifier` with scripted responses and query recording.
pub struct ScriptedClassifier {
    /// Queued outcomes, consumed one per `classify` call.
    steps: Mutex<VecDeque<Step>>,
    /// Returned when the queue is empty.
    fallback: Classification,
    /// All texts passed to `classify`.
    queries: Mutex<Vec<String>>,
    /// Artificial latency before answering.
    delay: Option<Duration>,
}

impl ScriptedClassifier {
    /// Classifier that answers `None` with full confidence unless scripted otherwise.
    pub fn new() -> Self {
        Self::always(Classification::new("None", 1.0))
    }

    /// Classifier that answers every query with `classification`.
    pub fn always(classification: Classification) -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            fallback: classification,
            queries: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Delay every answer by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a classification for the next unanswered query.
    pub fn push(&self, classification: Classification) {
        self.steps
            .lock()
            .unwrap()
            .push_back(Step::Respond(classification));
    }

    /// Queue a request failure for the next unanswered query.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.steps
            .lock()
            .unwrap()
            .push_back(Step::Fail(message.into()));
    }

    /// All texts this classifier was asked about, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

impl Default for ScriptedClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntentClassifier for ScriptedClassifier {
    async fn classify(&self, text: &str) -> ClassifyResult<Classification> {
        self.queries.lock().unwrap().push(text.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Respond(c)) => Ok(c),
            Some(Step::Fail(msg)) => Err(ClassifyError::Request(msg)),
            None => Ok(self.fallback.clone()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
