pub mod combat;
pub mod movement;
pub mod validator;

pub use combat::*;
pub use movement::*;
pub use validator::*;
