//! Line-oriented session loop: one message per line in, one reply out.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::dispatcher::Dispatcher;
use crate::session::Session;

/// Run a single session over `input`/`output` until `input` is exhausted.
///
/// Each reply is followed by a blank line so multi-line replies stay readable.
pub async fn run<R, W>(
    dispatcher: &Dispatcher,
    session: &mut Session,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let Some(reply) = session.handle_message(dispatcher, &line).await else {
            continue;
        };
        output.write_all(reply.trim_end_matches('\n').as_bytes()).await?;
        output.write_all(b"\n\n").await?;
        output.flush().await?;
    }

    tracing::info!(session_id = %session.id, "input closed, session ended");
    Ok(())
}
