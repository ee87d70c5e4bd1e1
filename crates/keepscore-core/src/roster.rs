// Editable roster: the ordered players of the current game, with
// position-derived numbering kept in sync after every change.

use std::cmp::Ordering;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::error::RosterError;
use crate::player::{normalize_name, PlayerColor, PlayerHandle, PlayerScore};

type ChangeListener = Box<dyn FnMut() + Send>;
type DeleteListener = Box<dyn FnMut(&PlayerScore) + Send>;

/// A player together with the identity the roster issued for it.
struct Entry {
    handle: PlayerHandle,
    player: PlayerScore,
}

/// The ordered, editable list of players.
///
/// Invariant: `self.get(i).player_number == i` for every index, restored
/// after each structural mutation and before the change listener runs.
///
/// Every successful mutation fires the change listener exactly once. A
/// refused mutation returns a [`RosterError`], leaves the roster untouched,
/// and fires nothing.
///
/// Not internally synchronized: the roster belongs to a single task, which
/// performs all mutations.
pub struct EditablePlayers {
    entries: Vec<Entry>,
    /// Removing a player is refused once the roster is down to this many.
    minimum: usize,
    next_handle: u64,
    /// Player currently being dragged. Presentation state only.
    dragging: Option<PlayerHandle>,
    on_change: Option<ChangeListener>,
    on_delete: Option<DeleteListener>,
}

impl EditablePlayers {
    /// Take ownership of `players` (in display order) and number them.
    ///
    /// `minimum` is the floor below which [`remove`](Self::remove) refuses to
    /// go. A roster may start below its floor; it just cannot shrink further.
    pub fn new(players: Vec<PlayerScore>, minimum: usize) -> Self {
        let mut roster = EditablePlayers {
            entries: Vec::with_capacity(players.len()),
            minimum,
            next_handle: 0,
            dragging: None,
            on_change: None,
            on_delete: None,
        };
        for player in players {
            let handle = roster.issue_handle();
            roster.entries.push(Entry { handle, player });
        }
        roster.renumber();
        roster
    }

    // -----------------------------------------------------------------------
    // Listeners
    // -----------------------------------------------------------------------

    /// Register the listener run after every successful mutation, replacing
    /// any previous one. It carries no payload: re-read the roster.
    pub fn set_on_change<F>(&mut self, listener: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_change = Some(Box::new(listener));
    }

    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    /// Register the listener run with each removed player, after the change
    /// listener.
    pub fn set_on_delete<F>(&mut self, listener: F)
    where
        F: FnMut(&PlayerScore) + Send + 'static,
    {
        self.on_delete = Some(Box::new(listener));
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn minimum(&self) -> usize {
        self.minimum
    }

    /// Whether a removal would currently be accepted. The UI disables its
    /// delete controls when this is false.
    pub fn can_delete(&self) -> bool {
        self.entries.len() > self.minimum
    }

    pub fn get(&self, index: usize) -> Option<&PlayerScore> {
        self.entries.get(index).map(|e| &e.player)
    }

    /// Players in display order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerScore> + '_ {
        self.entries.iter().map(|e| &e.player)
    }

    pub fn handle_at(&self, index: usize) -> Option<PlayerHandle> {
        self.entries.get(index).map(|e| e.handle)
    }

    pub fn index_of(&self, handle: PlayerHandle) -> Option<usize> {
        self.entries.iter().position(|e| e.handle == handle)
    }

    pub fn player(&self, handle: PlayerHandle) -> Option<&PlayerScore> {
        self.index_of(handle).map(|i| &self.entries[i].player)
    }

    /// Give the players back, in display order.
    pub fn into_players(self) -> Vec<PlayerScore> {
        self.entries.into_iter().map(|e| e.player).collect()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a player and return its handle.
    pub fn add(&mut self, player: PlayerScore) -> PlayerHandle {
        let handle = self.issue_handle();
        self.entries.push(Entry { handle, player });
        self.renumber();
        debug!("Added player {} at position {}", handle, self.entries.len() - 1);
        self.notify();
        handle
    }

    /// Remove a player, returning it.
    ///
    /// Refused with [`RosterError::BelowMinimum`] when the roster has no more
    /// than `minimum` players, regardless of whether the UI allowed the call.
    pub fn remove(&mut self, handle: PlayerHandle) -> Result<PlayerScore, RosterError> {
        let index = self.require(handle)?;
        if !self.can_delete() {
            warn!(
                "Refusing to remove player {}: roster is at its minimum of {}",
                handle, self.minimum
            );
            return Err(RosterError::BelowMinimum {
                len: self.entries.len(),
                minimum: self.minimum,
            });
        }

        let removed = self.entries.remove(index).player;
        if self.dragging == Some(handle) {
            self.dragging = None;
        }
        self.renumber();
        debug!("Removed player {} from position {}", handle, index);
        self.notify();
        if let Some(listener) = self.on_delete.as_mut() {
            listener(&removed);
        }
        Ok(removed)
    }

    /// Relocate the player at `from` so it ends up at `to`.
    ///
    /// This is a remove-then-insert, not a swap: moving index 0 to index 2 in
    /// `[A, B, C, D]` yields `[B, C, A, D]`. Both indices must be within the
    /// current bounds. Ends any drag in progress.
    pub fn move_player(&mut self, from: usize, to: usize) -> Result<(), RosterError> {
        let len = self.entries.len();
        for index in [from, to] {
            if index >= len {
                warn!("Refusing to move player {} -> {}: roster has {} players", from, to, len);
                return Err(RosterError::IndexOutOfRange { index, len });
            }
        }

        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        self.dragging = None;
        self.renumber();
        debug!("Moved player from position {} to {}", from, to);
        self.notify();
        Ok(())
    }

    /// Set a player's name. A blank name clears it back to the default label.
    pub fn rename(&mut self, handle: PlayerHandle, name: &str) -> Result<(), RosterError> {
        let index = self.require(handle)?;
        self.entries[index].player.name = normalize_name(name);
        debug!("Renamed player {}", handle);
        self.notify();
        Ok(())
    }

    pub fn recolor(&mut self, handle: PlayerHandle, color: PlayerColor) -> Result<(), RosterError> {
        let index = self.require(handle)?;
        self.entries[index].player.color = color;
        debug!("Recolored player {} to {}", handle, color);
        self.notify();
        Ok(())
    }

    /// Put the players in a uniformly random order.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// [`shuffle`](Self::shuffle) with a caller-supplied random source.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.entries.shuffle(rng);
        self.renumber();
        debug!("Shuffled {} players", self.entries.len());
        self.notify();
    }

    /// Stable sort: players that compare equal keep their relative order.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&PlayerScore, &PlayerScore) -> Ordering,
    {
        self.entries.sort_by(|a, b| compare(&a.player, &b.player));
        self.renumber();
        debug!("Sorted {} players", self.entries.len());
        self.notify();
    }

    // -----------------------------------------------------------------------
    // Drag state
    // -----------------------------------------------------------------------

    /// Mark a player as being dragged, so the UI can hide its row.
    pub fn begin_drag(&mut self, handle: PlayerHandle) -> Result<(), RosterError> {
        self.require(handle)?;
        self.dragging = Some(handle);
        Ok(())
    }

    pub fn cancel_drag(&mut self) {
        self.dragging = None;
    }

    pub fn dragging(&self) -> Option<PlayerHandle> {
        self.dragging
    }

    pub fn is_dragging(&self, handle: PlayerHandle) -> bool {
        self.dragging == Some(handle)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn issue_handle(&mut self) -> PlayerHandle {
        let handle = PlayerHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn require(&self, handle: PlayerHandle) -> Result<usize, RosterError> {
        self.index_of(handle).ok_or_else(|| {
            warn!("Player {} is not on the roster", handle);
            RosterError::UnknownPlayer(handle)
        })
    }

    fn renumber(&mut self) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.player.player_number = index;
        }
    }

    fn notify(&mut self) {
        if let Some(listener) = self.on_change.as_mut() {
            listener();
        }
    }
}

impl fmt::Debug for EditablePlayers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditablePlayers")
            .field("players", &self.iter().collect::<Vec<_>>())
            .field("minimum", &self.minimum)
            .field("dragging", &self.dragging)
            .finish_non_exhaustive()
    }
}
