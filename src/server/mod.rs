// src/server/mod.rs

//! Server layer root module.
//!
//! This module hosts the game engine behind actors:
//! - Game session orchestration (one actor per game, requests in arrival order)
//! - Game session management (creating, looking up and closing games)
//! - Session-level errors

pub mod error;
pub mod game_session;
