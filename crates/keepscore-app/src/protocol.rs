// Messages exchanged between the UI layer and the app orchestrator.
//
// The UI sends `UserCommand`s once a gesture or dialog completes; the app
// answers with `UiUpdate`s. Roster updates always carry the full snapshot,
// so the UI never has to apply a diff.

use std::cmp::Ordering;

use keepscore_core::player::{PlayerColor, PlayerScore};
use keepscore_core::roster::EditablePlayers;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// UI -> app
// ---------------------------------------------------------------------------

/// A user action on the organize-players screen.
///
/// Players are addressed by their current row index, as displayed in the
/// most recent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserCommand {
    AddPlayer {
        #[serde(default)]
        name: Option<String>,
    },
    DeletePlayer {
        index: usize,
    },
    MovePlayer {
        from: usize,
        to: usize,
    },
    RenamePlayer {
        index: usize,
        name: String,
    },
    RecolorPlayer {
        index: usize,
        color: PlayerColor,
    },
    Shuffle,
    Sort {
        order: SortOrder,
    },
    BeginDrag {
        index: usize,
    },
    CancelDrag,
    /// Fetch name suggestions for the rename dialog.
    RequestSuggestions,
    /// Resend the current roster.
    Snapshot,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Alphabetical by display name, ignoring case.
    Name,
    ScoreDescending,
    ScoreAscending,
}

impl SortOrder {
    pub fn compare(self, a: &PlayerScore, b: &PlayerScore) -> Ordering {
        match self {
            SortOrder::Name => a
                .display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase()),
            SortOrder::ScoreDescending => b.score.cmp(&a.score),
            SortOrder::ScoreAscending => a.score.cmp(&b.score),
        }
    }
}

// ---------------------------------------------------------------------------
// App -> UI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiUpdate {
    Roster(RosterSnapshot),
    /// Names to offer in the rename dialog's autocomplete.
    Suggestions { names: Vec<String> },
    /// A command was refused; the roster is unchanged.
    Rejected { reason: String },
    PlayerDeleted { name: String },
}

/// One rendered roster row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRow {
    pub display_name: String,
    /// Always equal to the row's index.
    pub player_number: usize,
    pub score: i64,
    pub color: PlayerColor,
    /// False when `display_name` is the default "Player N" label.
    pub named: bool,
    /// The UI hides the row of the player being dragged.
    pub dragging: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub players: Vec<PlayerRow>,
    /// Whether delete controls should be enabled.
    pub can_delete: bool,
}

impl RosterSnapshot {
    pub fn from_roster(roster: &EditablePlayers) -> Self {
        let dragging = roster.dragging().and_then(|handle| roster.index_of(handle));
        let players = roster
            .iter()
            .enumerate()
            .map(|(index, player)| PlayerRow {
                display_name: player.display_name(),
                player_number: player.player_number,
                score: player.score,
                color: player.color,
                named: player.has_name(),
                dragging: dragging == Some(index),
            })
            .collect();

        RosterSnapshot {
            players,
            can_delete: roster.can_delete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_tagged_json() {
        let cmd: UserCommand =
            serde_json::from_str(r#"{"type":"move_player","from":0,"to":2}"#).unwrap();
        assert_eq!(cmd, UserCommand::MovePlayer { from: 0, to: 2 });

        let cmd: UserCommand =
            serde_json::from_str(r#"{"type":"recolor_player","index":1,"color":"teal"}"#).unwrap();
        assert_eq!(
            cmd,
            UserCommand::RecolorPlayer {
                index: 1,
                color: PlayerColor::Teal
            }
        );

        let cmd: UserCommand = serde_json::from_str(r#"{"type":"add_player"}"#).unwrap();
        assert_eq!(cmd, UserCommand::AddPlayer { name: None });

        let cmd: UserCommand =
            serde_json::from_str(r#"{"type":"sort","order":"score_descending"}"#).unwrap();
        assert_eq!(
            cmd,
            UserCommand::Sort {
                order: SortOrder::ScoreDescending
            }
        );
    }

    #[test]
    fn unknown_command_is_a_parse_error() {
        assert!(serde_json::from_str::<UserCommand>(r#"{"type":"explode"}"#).is_err());
    }

    #[test]
    fn sort_by_name_ignores_case() {
        let a = PlayerScore::new(Some("alice"), 0);
        let b = PlayerScore::new(Some("Bob"), 1);
        assert_eq!(SortOrder::Name.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn snapshot_marks_the_dragged_row() {
        let mut roster = EditablePlayers::new(
            vec![
                PlayerScore::new(Some("Ann"), 0).with_score(4),
                PlayerScore::new(None, 1),
            ],
            2,
        );
        let second = roster.handle_at(1).unwrap();
        roster.begin_drag(second).unwrap();

        let snapshot = RosterSnapshot::from_roster(&roster);

        assert!(!snapshot.can_delete);
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.players[0].display_name, "Ann");
        assert_eq!(snapshot.players[0].score, 4);
        assert!(!snapshot.players[0].dragging);
        assert_eq!(snapshot.players[1].display_name, "Player 2");
        assert!(!snapshot.players[1].named);
        assert!(snapshot.players[1].dragging);
    }
}
