// Perft: contagem de folhas da árvore de lances para validar o gerador

use super::board::Position;
use super::types::Move;
use rayon::prelude::*;

/// Conta as folhas até `depth` (posições terminais não são expandidas)
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    if position.is_terminal() {
        return 0;
    }

    let moves = position.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&mv| perft(&position.apply(mv), depth - 1))
        .sum()
}

/// Divide: contagem por lance da raiz, em paralelo (cada thread tem os seus snapshots)
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 || position.is_terminal() {
        return Vec::new();
    }

    position
        .legal_moves()
        .par_iter()
        .map(|&mv| (mv, perft(&position.apply(mv), depth - 1)))
        .collect()
}

/// Perft paralelo na raiz
pub fn perft_parallel(position: &Position, depth: u32) -> u64 {
    if depth <= 1 {
        return perft(position, depth);
    }
    perft_divide(position, depth).iter().map(|&(_, nodes)| nodes).sum()
}
