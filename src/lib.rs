// Fianco - motor de busca negamax para o jogo Fianco (9x9)

pub mod core;
pub mod search;

pub use crate::core::*;
pub use crate::search::{SearchConfig, SearchEngine, SearchResult, SearchStats};
