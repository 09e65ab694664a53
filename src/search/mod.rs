pub mod alpha_beta;
pub mod config;
pub mod evaluation;
pub mod move_ordering;
pub mod transposition;

pub use alpha_beta::*;
pub use config::*;
pub use evaluation::*;
pub use move_ordering::*;
pub use transposition::*;
