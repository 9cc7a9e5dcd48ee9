//! idclient - drives the action layer from the command line
//!
//! Reads actions as JSON lines on stdin, dispatches them against the
//! configured backend and echoes every dispatched action as a JSON line on
//! stdout. Logs go to a file.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use idclient::{Action, Config, HttpRpcClient, StoreActor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading config")?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(&config.log_dir, &config.log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(
        version = idclient::constants::APP_VERSION,
        backend = %config.backend_url,
        "Starting idclient"
    );

    // Create channels
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<Action>();
    let (observer_tx, observer_rx) = mpsc::unbounded_channel::<Action>();

    // Spawn store actor
    let rpc = Arc::new(HttpRpcClient::new(
        config.backend_url.clone(),
        config.request_timeout(),
    ));
    let actor = StoreActor::new(rpc, &config).with_observer(observer_tx);
    let store = tokio::spawn(actor.run(inbound_rx));
    let printer = tokio::spawn(print_actions(observer_rx));

    read_actions(inbound_tx).await?;

    let state = store.await.context("store actor failed")?;
    printer.await.context("printer failed")??;
    tracing::info!(logged_in = state.session.logged_in, "Shut down");
    Ok(())
}

/// Feed stdin lines to the store until EOF; bad lines are logged and skipped
async fn read_actions(inbound_tx: mpsc::UnboundedSender<Action>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Action>(line) {
            Ok(action) => {
                if inbound_tx.send(action).is_err() {
                    break;
                }
            }
            Err(e) => tracing::warn!(error = %e, line, "Skipping malformed action"),
        }
    }
    Ok(())
}

async fn print_actions(mut observer_rx: mpsc::UnboundedReceiver<Action>) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    while let Some(action) = observer_rx.recv().await {
        let mut line = serde_json::to_vec(&action)?;
        line.push(b'\n');
        stdout.write_all(&line).await?;
        stdout.flush().await?;
    }
    Ok(())
}
