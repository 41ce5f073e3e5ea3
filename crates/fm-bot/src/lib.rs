//! FeedMe bot — library crate for the pancake ordering chat-bot.
//!
//! Re-exports all modules so the binaries and external crates
//! (e.g. `fm-e2e-tests`) can access `Dispatcher`, `IntentClassifier`,
//! `SessionStore`, and `build_router`.

pub mod classifier;
pub mod config;
pub mod console;
pub mod dishes;
pub mod dispatcher;
pub mod error;
pub mod replies;
pub mod routes;
pub mod session;
pub mod state;
