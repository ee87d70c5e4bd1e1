// KeepScore organize-players entry point.
//
// Speaks a JSON-lines protocol: one `UserCommand` per stdin line, one
// `UiUpdate` per stdout line. Logs go to a file so stdout stays parseable.
//
// Startup sequence:
// 1. Load config (copying defaults on first run)
// 2. Initialize tracing
// 3. Build the app state and name-suggestion source
// 4. Spawn the app loop and the stdin command reader
// 5. Write UI updates to stdout until the loop exits

use std::sync::Arc;

use keepscore_app::app::{self, AppState};
use keepscore_app::config;
use keepscore_app::protocol::{UiUpdate, UserCommand};
use keepscore_app::suggest::{HistorySuggestions, NameSuggestions};

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing (log to file, not stdout)
    init_tracing(&config.logging.filter)?;
    info!(
        "KeepScore starting: {} initial players, minimum {}",
        config.roster.initial_players.len(),
        config.roster.min_players
    );

    // 3. App state (no saved-game history yet: configured names only)
    let suggestions: Arc<dyn NameSuggestions> =
        Arc::new(HistorySuggestions::from_config(Vec::new(), &config.suggestions));
    let state = AppState::new(config, suggestions);

    // 4. Channels and tasks
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, mut ui_rx) = mpsc::channel(256);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, state).await {
            error!("Application loop error: {}", e);
        }
    });

    let reader_handle = tokio::spawn(async move {
        if let Err(e) = read_commands(cmd_tx).await {
            error!("Command reader error: {:#}", e);
        }
    });

    // 5. Forward updates until the app loop drops its sender
    let mut stdout = tokio::io::stdout();
    while let Some(update) = ui_rx.recv().await {
        write_update(&mut stdout, &update).await?;
    }

    let _ = app_handle.await;
    reader_handle.abort();

    info!("KeepScore shut down cleanly");
    Ok(())
}

/// Read one JSON command per line from stdin. Sends `Quit` at end of input.
async fn read_commands(cmd_tx: mpsc::Sender<UserCommand>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<UserCommand>(line) {
            Ok(cmd) => {
                if cmd_tx.send(cmd).await.is_err() {
                    // App loop already exited.
                    return Ok(());
                }
            }
            Err(e) => warn!("Ignoring malformed command {:?}: {}", line, e),
        }
    }

    let _ = cmd_tx.send(UserCommand::Quit).await;
    Ok(())
}

async fn write_update(stdout: &mut tokio::io::Stdout, update: &UiUpdate) -> anyhow::Result<()> {
    let mut line = serde_json::to_string(update).context("failed to serialize UI update")?;
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

/// Initialize tracing to log to `logs/keepscore.log`.
///
/// `RUST_LOG` takes precedence over the configured filter.
fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("keepscore.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
