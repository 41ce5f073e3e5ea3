//! Response dispatcher: turns one user message into one reply.
//!
//! The start marker short-circuits to the help text. Everything else goes
//! through the classifier, and the resulting intent is resolved against the
//! session's order by [`resolve`]. Classifier failures become a fault reply
//! here, so a turn never fails.

use std::sync::Arc;
use std::time::Duration;

use fm_protocol::{Action, Classification, Intent, Order};
use uuid::Uuid;

use crate::classifier::IntentClassifier;
use crate::dishes::parse_dishes;
use crate::error::{ClassifyError, ClassifyResult};
use crate::replies;

/// Conversation start command sent by messaging clients.
pub const START_MARKER: &str = "/start";

/// Minimum score for any action other than `None` to fire.
pub const CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Upper bound on a single classifier call.
pub const DEFAULT_CLASSIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether `text` is the start marker, either bare (`/start`) or
/// addressed to a bot (`/start@FeedMeBot`).
pub fn is_start_marker(text: &str) -> bool {
    match text.strip_prefix(START_MARKER) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('@')
            .is_some_and(|bot| !bot.is_empty() && !bot.contains(char::is_whitespace)),
        None => false,
    }
}

/// Classifies messages and resolves them against a session's order.
pub struct Dispatcher {
    classifier: Arc<dyn IntentClassifier>,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(classifier: Arc<dyn IntentClassifier>) -> Self {
        Self {
            classifier,
            timeout: DEFAULT_CLASSIFY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Produce the reply for one message, mutating `order` when the intent asks for it.
    ///
    /// Callers drop blank messages before getting here.
    pub async fn respond(&self, text: &str, order: &mut Order) -> String {
        if is_start_marker(text) {
            tracing::debug!("start marker, skipping classification");
            return replies::START_HELP.to_string();
        }

        match self.classify(text).await {
            Ok(classification) => resolve(&classification, order),
            Err(e) => {
                tracing::warn!(
                    classifier = self.classifier.name(),
                    error = %e,
                    "classification failed"
                );
                replies::classifier_failure(&e.to_string())
            }
        }
    }

    async fn classify(&self, text: &str) -> ClassifyResult<Classification> {
        tokio::time::timeout(self.timeout, self.classifier.classify(text))
            .await
            .map_err(|_| ClassifyError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            })?
    }
}

/// Map a classification onto a reply, applying the confidence threshold.
///
/// Only `Order` and `Checkout` touch `order`, and only when they fire.
pub fn resolve(classification: &Classification, order: &mut Order) -> String {
    let label = &classification.top_intent.label;
    let score = classification.top_intent.score;

    let Ok(intent) = label.parse::<Intent>() else {
        tracing::debug!(intent = %label, score, "unrecognized intent label");
        return replies::FAULT.to_string();
    };
    let lang = intent.language;

    if intent.action != Action::None && score < CONFIDENCE_THRESHOLD {
        tracing::debug!(%intent, score, "intent below confidence threshold");
        return replies::not_understood(lang).to_string();
    }

    match intent.action {
        Action::None => replies::not_understood(lang).to_string(),
        Action::Greeting => replies::greeting(lang).to_string(),
        Action::ShowMenu => replies::menu(lang).to_string(),
        Action::ShowOrder => replies::show_order(lang, order),
        Action::Checkout => {
            if order.is_empty() {
                return replies::nothing_ordered(lang).to_string();
            }
            let dishes = order.take_all();
            let order_id = Uuid::new_v4();
            tracing::info!(order_id = %order_id, dishes = dishes.len(), "order checked out");
            replies::checkout(lang, order_id)
        }
        Action::Order => {
            let dishes = parse_dishes(classification);
            if dishes.is_empty() {
                return replies::order_not_understood(lang).to_string();
            }
            let reply = replies::ordered(lang, &dishes);
            tracing::info!(
                added = dishes.len(),
                total = order.len() + dishes.len(),
                "dishes ordered"
            );
            order.add_dishes(dishes);
            reply
        }
    }
}
