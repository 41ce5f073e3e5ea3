//! Shared application state for the Axum server.

use std::sync::Arc;

use crate::classifier::{IntentClassifier, ScriptedClassifier};
use crate::dispatcher::Dispatcher;
use crate::session::SessionStore;

/// Shared application state, cheap to clone into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Message dispatcher shared by every session.
    pub dispatcher: Arc<Dispatcher>,
    /// Live sessions, each holding one order.
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            sessions: SessionStore::new(),
        }
    }

    /// State backed by the given classifier with default dispatcher settings.
    pub fn with_classifier(classifier: Arc<dyn IntentClassifier>) -> Self {
        Self::new(Dispatcher::new(classifier))
    }

    /// State backed by a scripted classifier that only ever answers `None` (tests).
    pub fn offline() -> Self {
        Self::with_classifier(Arc::new(ScriptedClassifier::new()))
    }
}
