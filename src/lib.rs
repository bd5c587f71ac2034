//! Authoritative turn/action engine for a two-player grid tactics game.
//!
//! `game` holds the engine itself (board, pieces, turn phases, validation,
//! combat). `server` puts each game instance behind an actor so requests from
//! remote callers are applied one at a time and observers hear about every
//! accepted change.

pub mod config;
pub mod game;
pub mod server;
