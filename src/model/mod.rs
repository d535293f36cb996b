pub mod game;
pub mod golfer;
pub mod round;
pub mod types;

pub use game::*;
pub use golfer::*;
pub use round::*;
pub use types::*;
