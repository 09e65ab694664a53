// Zobrist hashing para a transposition table
use super::board::Position;
use super::types::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Semente padrão das chaves Zobrist
pub const DEFAULT_ZOBRIST_SEED: u64 = 0x5EED_F1A2_C0DE_0009;

/// Tabela de chaves aleatórias independentes de 63 bits, indexada por [linha][coluna][lado].
#[derive(Debug, Clone)]
pub struct ZobristHasher {
    pieces: [[[u64; 2]; BOARD_SIZE]; BOARD_SIZE],
    side_to_move: u64, // Para quem joga (pretas)
}

impl Default for ZobristHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ZOBRIST_SEED)
    }
}

impl ZobristHasher {
    /// Gera as chaves de forma determinística a partir da semente
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pieces = [[[0u64; 2]; BOARD_SIZE]; BOARD_SIZE];

        for row in pieces.iter_mut() {
            for cell in row.iter_mut() {
                for key in cell.iter_mut() {
                    *key = rng.gen::<u64>() >> 1;
                }
            }
        }

        ZobristHasher {
            pieces,
            side_to_move: rng.gen::<u64>() >> 1,
        }
    }

    #[inline(always)]
    fn key(&self, row: usize, col: usize, side: Side) -> u64 {
        self.pieces[row][col][side.index()]
    }

    /// Recalcula o hash completo da posição
    pub fn compute(&self, position: &Position) -> u64 {
        let mut hash = position
            .pieces()
            .fold(0u64, |acc, (row, col, side)| acc ^ self.key(row, col, side));

        if position.side_to_move == Side::Black {
            hash ^= self.side_to_move;
        }
        hash
    }

    /// Hash da posição, usando o valor em cache quando existe
    #[inline(always)]
    pub fn fingerprint(&self, position: &Position) -> u64 {
        position.fingerprint().unwrap_or_else(|| self.compute(position))
    }

    /// Devolve a posição com o hash preenchido
    pub fn stamp(&self, mut position: Position) -> Position {
        if position.fingerprint().is_none() {
            let hash = self.compute(&position);
            position.set_fingerprint(hash);
        }
        position
    }

    /// Atualização incremental: retira origem e peça capturada, insere o destino.
    pub fn update(&self, hash: u64, position: &Position, mv: Move) -> u64 {
        let side = position.side_to_move;
        let mut hash = hash;

        hash ^= self.key(mv.from_row as usize, mv.from_col as usize, side);
        hash ^= self.key(mv.to_row as usize, mv.to_col as usize, side);
        if let Some((row, col)) = mv.jumped_square() {
            hash ^= self.key(row, col, !side);
        }
        hash ^ self.side_to_move
    }

    /// Executa o lance propagando o hash de forma incremental
    pub fn play(&self, position: &Position, mv: Move) -> Position {
        let parent_hash = self.fingerprint(position);
        let mut next = position.apply(mv);
        next.set_fingerprint(self.update(parent_hash, position, mv));
        next
    }
}
