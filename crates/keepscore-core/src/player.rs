// Player records and their display attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PlayerHandle
// ---------------------------------------------------------------------------

/// Opaque identity of a player on a roster.
///
/// Handles are issued by [`EditablePlayers`](crate::roster::EditablePlayers)
/// when a record enters the roster and never change afterwards, unlike the
/// position-derived `player_number`. Two records with identical fields still
/// get distinct handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerHandle(pub(crate) u64);

impl fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PlayerColor
// ---------------------------------------------------------------------------

/// The color swatch shown next to a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerColor {
    Red,
    Orange,
    Yellow,
    Lime,
    Green,
    Teal,
    Cyan,
    Blue,
    Indigo,
    Purple,
    Pink,
    Brown,
}

impl PlayerColor {
    /// Every color, in the order new players are assigned them.
    pub const ALL: [PlayerColor; 12] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Orange,
        PlayerColor::Purple,
        PlayerColor::Yellow,
        PlayerColor::Cyan,
        PlayerColor::Pink,
        PlayerColor::Lime,
        PlayerColor::Indigo,
        PlayerColor::Teal,
        PlayerColor::Brown,
    ];

    /// Default color for the player at `player_number`, cycling through
    /// [`PlayerColor::ALL`].
    pub fn for_player_number(player_number: usize) -> Self {
        Self::ALL[player_number % Self::ALL.len()]
    }

    /// Parse a lowercase color name (e.g. "red", "indigo").
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(s.trim()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerColor::Red => "red",
            PlayerColor::Orange => "orange",
            PlayerColor::Yellow => "yellow",
            PlayerColor::Lime => "lime",
            PlayerColor::Green => "green",
            PlayerColor::Teal => "teal",
            PlayerColor::Cyan => "cyan",
            PlayerColor::Blue => "blue",
            PlayerColor::Indigo => "indigo",
            PlayerColor::Purple => "purple",
            PlayerColor::Pink => "pink",
            PlayerColor::Brown => "brown",
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// PlayerScore
// ---------------------------------------------------------------------------

/// A player in the current game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    /// Display name. `None` means the default "Player N" label is shown.
    pub name: Option<String>,
    /// Zero-based position on the roster. Derived: the roster overwrites it
    /// after every structural change.
    pub player_number: usize,
    pub color: PlayerColor,
    pub score: i64,
    /// Score deltas in the order they were applied.
    #[serde(default)]
    pub history: Vec<i64>,
}

impl PlayerScore {
    /// Create a zero-score player with the default color for its position.
    ///
    /// A blank `name` is stored as `None`.
    pub fn new(name: Option<&str>, player_number: usize) -> Self {
        PlayerScore {
            name: name.and_then(normalize_name),
            player_number,
            color: PlayerColor::for_player_number(player_number),
            score: 0,
            history: Vec::new(),
        }
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    pub fn with_color(mut self, color: PlayerColor) -> Self {
        self.color = color;
        self
    }

    /// Whether an explicit name has been set.
    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    /// The name to render: the explicit name, or "Player N" (one-based).
    pub fn display_name(&self) -> String {
        display_name(self.name.as_deref(), self.player_number)
    }

    /// Record a score change. The score saturates at the `i64` bounds.
    pub fn apply_delta(&mut self, delta: i64) {
        self.score = self.score.saturating_add(delta);
        self.history.push(delta);
    }
}

/// Display label for a possibly-unnamed player at `player_number`.
pub fn display_name(name: Option<&str>, player_number: usize) -> String {
    match name.and_then(normalize_name) {
        Some(name) => name,
        None => format!("Player {}", player_number + 1),
    }
}

/// Canonical stored form of a user-entered name: trimmed, or `None` if blank.
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_fall_back_to_numbered_label() {
        let player = PlayerScore::new(Some("   "), 2);
        assert!(!player.has_name());
        assert_eq!(player.display_name(), "Player 3");

        let unnamed = PlayerScore::new(None, 0);
        assert_eq!(unnamed.display_name(), "Player 1");
    }

    #[test]
    fn explicit_names_are_trimmed() {
        let player = PlayerScore::new(Some("  Nolan "), 0);
        assert_eq!(player.name.as_deref(), Some("Nolan"));
        assert_eq!(player.display_name(), "Nolan");
    }

    #[test]
    fn default_colors_cycle_through_palette() {
        assert_eq!(PlayerColor::for_player_number(0), PlayerColor::Red);
        assert_eq!(PlayerColor::for_player_number(1), PlayerColor::Blue);
        assert_eq!(
            PlayerColor::for_player_number(PlayerColor::ALL.len()),
            PlayerColor::Red
        );
    }

    #[test]
    fn color_names_round_trip_through_parser() {
        for color in PlayerColor::ALL {
            assert_eq!(PlayerColor::from_name(color.name()), Some(color));
        }
        assert_eq!(PlayerColor::from_name(" Indigo "), Some(PlayerColor::Indigo));
        assert_eq!(PlayerColor::from_name("mauve"), None);
    }

    #[test]
    fn color_serializes_as_snake_case() {
        let json = serde_json::to_string(&PlayerColor::Teal).unwrap();
        assert_eq!(json, "\"teal\"");
    }

    #[test]
    fn apply_delta_tracks_history() {
        let mut player = PlayerScore::new(Some("A"), 0).with_score(10);
        player.apply_delta(5);
        player.apply_delta(-3);
        assert_eq!(player.score, 12);
        assert_eq!(player.history, vec![5, -3]);
    }

    #[test]
    fn apply_delta_saturates_instead_of_overflowing() {
        let mut player = PlayerScore::new(None, 0).with_score(i64::MAX - 1);
        player.apply_delta(10);
        assert_eq!(player.score, i64::MAX);

        player.apply_delta(i64::MIN);
        player.apply_delta(i64::MIN);
        assert_eq!(player.score, i64::MIN);
        assert_eq!(player.history.len(), 3);
    }

    #[test]
    fn with_color_overrides_the_positional_default() {
        let player = PlayerScore::new(Some("Ann"), 0).with_color(PlayerColor::Teal);
        assert_eq!(player.color, PlayerColor::Teal);
        assert_eq!(player.player_number, 0);
    }
}
