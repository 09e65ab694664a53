//! Tipos de erro do motor.
//!
//! Erros recuperáveis: leitura de layouts de tabuleiro, configuração
//! inválida e pedidos de busca numa posição já terminada. Violações de
//! invariantes (lance ilegal em `apply`) continuam a ser `panic!`.

use crate::core::types::Side;
use thiserror::Error;

/// Erros que podem ocorrer no motor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Layout sem o campo de lado a jogar
    #[error("Invalid layout: expected '<rows> <side>', got {found} field(s)")]
    MissingField { found: usize },

    /// Número de linhas diferente de 9
    #[error("Invalid layout: expected 9 rows, got {rows}")]
    RowCount { rows: usize },

    /// Linha com largura errada
    #[error("Invalid layout: row {row} has width {width} (must be 9)")]
    RowWidth { row: usize, width: usize },

    /// Caractere de peça desconhecido
    #[error("Invalid piece character '{ch}' in row {row}")]
    InvalidPiece { ch: char, row: usize },

    /// Lado a jogar desconhecido
    #[error("Invalid side to move: '{0}' (expected 'w' or 'b')")]
    InvalidSide(String),

    /// Parâmetro de configuração fora do domínio
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A posição já tem vencedor
    #[error("Game is already over: {winner} has won")]
    GameOver { winner: Side },

    /// O lado a jogar não tem lances
    #[error("No legal moves for {side}")]
    NoLegalMoves { side: Side },
}

/// Alias de resultado para operações do motor
pub type Result<T> = std::result::Result<T, Error>;
