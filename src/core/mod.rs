pub mod board;
pub mod error;
pub mod perft;
pub mod types;
pub mod zobrist;

pub use board::*;
pub use error::*;
pub use perft::*;
pub use types::*;
pub use zobrist::*;
