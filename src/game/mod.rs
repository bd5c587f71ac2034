//! Game engine: board, pieces, turn phases, validation and combat.
//!
//! Nothing in here knows about actors or transports; `GameState` is the
//! whole of one game instance.

pub mod board;
pub mod error;
pub mod permissions;
pub mod state;
pub mod turn;
pub mod types;

pub mod entities;
pub mod systems;

pub use board::Board;
pub use error::Rejection;
pub use permissions::{CallerPermissions, Capabilities, PermissionTable};
pub use state::{ActionOutcome, GameState, HealthView};
pub use turn::{TurnController, TurnState};
pub use types::*;
