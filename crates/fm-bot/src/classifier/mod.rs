//! Intent classification for inbound chat messages.
//!
//! Two implementations:
//! - **LUIS** (`luis.rs`): the hosted NLU service, queried over HTTP.
//! - **Scripted** (`scripted.rs`): deterministic responses for tests and demos.

pub mod luis;
pub mod scripted;

use async_trait::async_trait;
use fm_protocol::Classification;

use crate::error::ClassifyResult;

/// Trait for engines that classify a message into an intent with entities.
///
/// Implementations must be safe to call concurrently from many sessions.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify one user message.
    async fn classify(&self, text: &str) -> ClassifyResult<Classification>;

    /// Name of this classifier (for logging).
    fn name(&self) -> &str;
}

pub use luis::{LuisClassifier, LuisConfig};
pub use scripted::ScriptedClassifier;
