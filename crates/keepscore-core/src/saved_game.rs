// Saved-game summaries and the multi-select list used to pick games for a
// batch action.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collection::{filter, transform_with_index};
use crate::player::display_name;

/// Identity of a saved game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId(pub i64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The summary shown for a saved game in the saved-games list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: GameId,
    pub name: Option<String>,
    /// Player names in seat order; `None` for players who were never named.
    pub player_names: Vec<Option<String>>,
    pub num_rounds: u32,
    pub saved_at: DateTime<Utc>,
}

impl GameSummary {
    /// Each player's display label, numbering unnamed players by seat.
    pub fn player_labels(&self) -> Vec<String> {
        transform_with_index(&self.player_names, |name, index| {
            display_name(name.as_deref(), index)
        })
    }

    pub fn num_players(&self) -> usize {
        self.player_names.len()
    }
}

type CheckListener = Box<dyn FnMut() + Send>;

/// Saved games in display order plus the subset currently checked.
///
/// Checked membership is keyed by [`GameId`] and is independent of the
/// display order. Every mutation of the checked set runs the listener.
pub struct SavedGameList {
    games: Vec<GameSummary>,
    checked: HashSet<GameId>,
    on_check_changed: Option<CheckListener>,
}

impl SavedGameList {
    pub fn new(games: Vec<GameSummary>) -> Self {
        SavedGameList {
            games,
            checked: HashSet::new(),
            on_check_changed: None,
        }
    }

    pub fn set_on_check_changed<F>(&mut self, listener: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_check_changed = Some(Box::new(listener));
    }

    pub fn games(&self) -> &[GameSummary] {
        &self.games
    }

    /// Mark or unmark a game.
    pub fn set_checked(&mut self, id: GameId, checked: bool) {
        if checked {
            self.checked.insert(id);
        } else {
            self.checked.remove(&id);
        }
        debug!("Game {} checked={} ({} checked)", id, checked, self.checked.len());
        self.notify();
    }

    pub fn is_checked(&self, id: GameId) -> bool {
        self.checked.contains(&id)
    }

    /// The live checked set.
    pub fn checked(&self) -> &HashSet<GameId> {
        &self.checked
    }

    /// Replace the whole checked set at once.
    pub fn replace_checked(&mut self, checked: HashSet<GameId>) {
        self.checked = checked;
        debug!("Checked set replaced ({} checked)", self.checked.len());
        self.notify();
    }

    /// Checked games in display order, for a batch action.
    pub fn checked_games(&self) -> Vec<&GameSummary> {
        filter(&self.games, |game| self.checked.contains(&game.id))
    }

    fn notify(&mut self) {
        if let Some(listener) = self.on_check_changed.as_mut() {
            listener();
        }
    }
}

impl fmt::Debug for SavedGameList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavedGameList")
            .field("games", &self.games)
            .field("checked", &self.checked)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use chrono::TimeZone;

    fn game(id: i64, names: &[Option<&str>]) -> GameSummary {
        GameSummary {
            id: GameId(id),
            name: None,
            player_names: names.iter().map(|n| n.map(str::to_string)).collect(),
            num_rounds: 3,
            saved_at: Utc.with_ymd_and_hms(2012, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    fn list_with_counter() -> (SavedGameList, Arc<AtomicUsize>) {
        let mut list = SavedGameList::new(vec![
            game(1, &[Some("Ann"), None]),
            game(2, &[None, Some("Bo")]),
            game(3, &[Some("Cy")]),
        ]);
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        list.set_on_check_changed(move || {
            inner.fetch_add(1, Ordering::SeqCst);
        });
        (list, count)
    }

    #[test]
    fn toggling_leaves_only_the_still_checked_game() {
        let (mut list, changes) = list_with_counter();

        list.set_checked(GameId(1), true);
        list.set_checked(GameId(2), true);
        list.set_checked(GameId(1), false);

        assert_eq!(*list.checked(), HashSet::from([GameId(2)]));
        assert!(!list.is_checked(GameId(1)));
        assert!(list.is_checked(GameId(2)));
        assert_eq!(changes.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn checking_twice_does_not_duplicate() {
        let (mut list, _) = list_with_counter();
        list.set_checked(GameId(3), true);
        list.set_checked(GameId(3), true);
        assert_eq!(list.checked().len(), 1);
    }

    #[test]
    fn replace_checked_swaps_the_set_and_notifies() {
        let (mut list, changes) = list_with_counter();
        list.set_checked(GameId(1), true);

        list.replace_checked(HashSet::from([GameId(2), GameId(3)]));

        assert!(!list.is_checked(GameId(1)));
        assert_eq!(list.checked().len(), 2);
        assert_eq!(changes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn checked_games_follow_display_order() {
        let (mut list, _) = list_with_counter();
        list.set_checked(GameId(3), true);
        list.set_checked(GameId(1), true);

        let ids: Vec<GameId> = list.checked_games().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![GameId(1), GameId(3)]);
    }

    #[test]
    fn player_labels_number_unnamed_players_by_seat() {
        let summary = game(9, &[None, Some("Bo"), Some(" ")]);
        assert_eq!(summary.player_labels(), vec!["Player 1", "Bo", "Player 3"]);
        assert_eq!(summary.num_players(), 3);
    }
}
