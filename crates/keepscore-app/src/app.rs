// Application state and the event loop behind the organize-players screen.
//
// The loop is the single owner of the roster. User commands mutate it
// in place; the roster's change listener marks it dirty, and every dirty
// roster is pushed to the UI as one full snapshot. Name suggestions are
// fetched in spawned tasks that report back over a channel, so the roster is
// only ever touched from the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use keepscore_core::error::RosterError;
use keepscore_core::player::{PlayerHandle, PlayerScore};
use keepscore_core::roster::EditablePlayers;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::protocol::{RosterSnapshot, UiUpdate, UserCommand};
use crate::suggest::NameSuggestions;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub config: Config,
    pub roster: EditablePlayers,
    pub suggestions: Arc<dyn NameSuggestions>,
    /// Set by the roster's change listener; cleared when a snapshot is sent.
    roster_changed: Arc<AtomicBool>,
}

impl AppState {
    /// Build the state with the roster described by `config`.
    pub fn new(config: Config, suggestions: Arc<dyn NameSuggestions>) -> Self {
        let players = config.initial_players();
        Self::with_players(config, players, suggestions)
    }

    /// Build the state around an existing roster (e.g. a game in progress).
    pub fn with_players(
        config: Config,
        players: Vec<PlayerScore>,
        suggestions: Arc<dyn NameSuggestions>,
    ) -> Self {
        let mut roster = EditablePlayers::new(players, config.roster.min_players);
        let roster_changed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&roster_changed);
        roster.set_on_change(move || flag.store(true, Ordering::SeqCst));

        AppState {
            config,
            roster,
            suggestions,
            roster_changed,
        }
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot::from_roster(&self.roster)
    }

    /// Whether the roster changed since the last call.
    fn take_roster_changed(&self) -> bool {
        self.roster_changed.swap(false, Ordering::SeqCst)
    }

    /// Apply a roster command, returning any non-roster updates it produced.
    ///
    /// Roster changes are reported through the change listener instead.
    pub fn apply(&mut self, cmd: UserCommand) -> Result<Option<UiUpdate>, RosterError> {
        match cmd {
            UserCommand::AddPlayer { name } => {
                let player = PlayerScore::new(name.as_deref(), self.roster.len());
                self.roster.add(player);
            }
            UserCommand::DeletePlayer { index } => {
                let handle = self.handle_at(index)?;
                let removed = self.roster.remove(handle)?;
                return Ok(Some(UiUpdate::PlayerDeleted {
                    name: removed.display_name(),
                }));
            }
            UserCommand::MovePlayer { from, to } => {
                self.roster.move_player(from, to)?;
            }
            UserCommand::RenamePlayer { index, name } => {
                let handle = self.handle_at(index)?;
                self.roster.rename(handle, &name)?;
            }
            UserCommand::RecolorPlayer { index, color } => {
                let handle = self.handle_at(index)?;
                self.roster.recolor(handle, color)?;
            }
            UserCommand::Shuffle => self.roster.shuffle(),
            UserCommand::Sort { order } => self.roster.sort_by(|a, b| order.compare(a, b)),
            UserCommand::BeginDrag { index } => {
                let handle = self.handle_at(index)?;
                self.roster.begin_drag(handle)?;
                return Ok(Some(UiUpdate::Roster(self.snapshot())));
            }
            UserCommand::CancelDrag => {
                self.roster.cancel_drag();
                return Ok(Some(UiUpdate::Roster(self.snapshot())));
            }
            UserCommand::Snapshot => return Ok(Some(UiUpdate::Roster(self.snapshot()))),
            UserCommand::RequestSuggestions | UserCommand::Quit => {}
        }
        Ok(None)
    }

    fn handle_at(&self, index: usize) -> Result<PlayerHandle, RosterError> {
        self.roster
            .handle_at(index)
            .ok_or(RosterError::IndexOutOfRange {
                index,
                len: self.roster.len(),
            })
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the application event loop until `Quit` or the command channel closes.
///
/// Sends the initial roster snapshot first. Listens on two channels using
/// `tokio::select!`:
/// 1. User commands from the UI
/// 2. Completed name-suggestion fetches
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started with {} players", state.roster.len());

    let (suggest_tx, mut suggest_rx) = mpsc::channel::<Vec<String>>(8);

    let initial = state.snapshot();
    let _ = ui_tx.send(UiUpdate::Roster(initial)).await;

    loop {
        tokio::select! {
            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(UserCommand::RequestSuggestions) => {
                        spawn_suggestion_fetch(&state, suggest_tx.clone());
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Suggestion results ---
            Some(names) = suggest_rx.recv() => {
                debug!("Delivering {} name suggestions", names.len());
                let _ = ui_tx.send(UiUpdate::Suggestions { names }).await;
            }
        }
    }

    Ok(())
}

async fn handle_user_command(state: &mut AppState, cmd: UserCommand, ui_tx: &mpsc::Sender<UiUpdate>) {
    debug!("Handling command {:?}", cmd);
    match state.apply(cmd) {
        Ok(extra) => {
            if state.take_roster_changed() {
                let snapshot = state.snapshot();
                let _ = ui_tx.send(UiUpdate::Roster(snapshot)).await;
            }
            if let Some(update) = extra {
                let _ = ui_tx.send(update).await;
            }
        }
        Err(e) => {
            warn!("Command refused: {}", e);
            let reason = e.to_string();
            let _ = ui_tx.send(UiUpdate::Rejected { reason }).await;
        }
    }
}

/// Fetch suggestions in the background; the result comes back through
/// `suggest_tx` and is forwarded to the UI from the loop.
fn spawn_suggestion_fetch(state: &AppState, suggest_tx: mpsc::Sender<Vec<String>>) {
    let provider = Arc::clone(&state.suggestions);
    tokio::spawn(async move {
        match provider.suggestions().await {
            Ok(names) => {
                let _ = suggest_tx.send(names).await;
            }
            Err(e) => warn!("Failed to fetch name suggestions: {:#}", e),
        }
    });
}
