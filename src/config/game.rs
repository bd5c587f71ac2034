/// Game configuration constants.
///
/// This module defines the board dimensions and the combat tuning shared by
/// every game instance.

/// Number of columns on the board.
pub const BOARD_WIDTH: i32 = 16;

/// Number of rows on the board.
pub const BOARD_HEIGHT: i32 = 8;

/// Lower bound of the damage multiplier drawn for each attack.
pub const DAMAGE_VARIANCE_MIN: f64 = 0.75;

/// Upper bound of the damage multiplier drawn for each attack.
pub const DAMAGE_VARIANCE_MAX: f64 = 1.25;
