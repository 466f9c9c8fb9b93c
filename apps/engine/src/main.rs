//! Feed-driven entry point: newline-delimited JSON events on stdin, one
//! snapshot line on stdout per applied event. The real transport layer is
//! a separate process; this binary is the same wiring without it.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use bridge_table::session::{spawn, SessionConfig, TableEvent};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let handle = spawn(SessionConfig::default());
    let mut snapshots = handle.snapshots();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event: TableEvent = match serde_json::from_str(trimmed) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(%err, "unparseable event line; skipped");
                continue;
            }
        };
        if !handle.send(event).await {
            break;
        }
        // Wait for the session to publish the post-event snapshot, then
        // echo it for whoever is watching the table.
        if snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            match serde_json::to_string(&snapshot) {
                Ok(json) => println!("{json}"),
                Err(err) => tracing::warn!(%err, "snapshot serialization failed"),
            }
        }
    }

    Ok(())
}
