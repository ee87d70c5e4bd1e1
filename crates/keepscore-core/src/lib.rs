// Library root: the player roster, saved-game selection, and the collection
// helpers they share.

pub mod collection;
pub mod error;
pub mod player;
pub mod roster;
pub mod saved_game;
