//! FeedMe bot — single-session console.
//!
//! Reads one message per line from stdin and prints each reply to stdout.
//! Logs go to stderr.

use std::sync::Arc;

use tokio::io::{BufReader, stdin, stdout};
use tracing_subscriber::EnvFilter;

use fm_bot::classifier::LuisClassifier;
use fm_bot::config::BotConfig;
use fm_bot::console;
use fm_bot::dispatcher::Dispatcher;
use fm_bot::session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "feedme.toml".to_string());
    let config = BotConfig::load(&config_path)?;

    let classifier = LuisClassifier::new(config.luis)?;
    let dispatcher = Dispatcher::new(Arc::new(classifier));
    let mut session = Session::new();
    tracing::info!(session_id = %session.id, "console session started");

    console::run(&dispatcher, &mut session, BufReader::new(stdin()), stdout()).await?;
    Ok(())
}
