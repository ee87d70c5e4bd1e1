use thiserror::Error;

use crate::player::PlayerHandle;

/// Reasons a roster mutation was refused.
///
/// A refused mutation leaves the roster exactly as it was and fires no
/// notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("index {index} is out of range for a roster of {len} players")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot remove a player: roster has {len} players and the minimum is {minimum}")]
    BelowMinimum { len: usize, minimum: usize },

    #[error("player {0} is not on this roster")]
    UnknownPlayer(PlayerHandle),
}
