//! Game entities module.
//!
//! This module organizes piece entity logic and the opening layouts.

pub mod layout;
pub mod piece;

pub use layout::*;
pub use piece::*;
