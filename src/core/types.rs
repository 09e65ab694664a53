// Ficheiro: src/core/types.rs
// Descrição: Definições de tipos fundamentais do jogo (lados, lances, scores).

/// Dimensão do tabuleiro (9x9).
pub const BOARD_SIZE: usize = 9;

/// Score sempre do ponto de vista de quem joga (convenção negamax).
pub type Score = i32;

/// Sentinela finita de vitória. Nunca infinito, para que `guess ± delta` continue válido.
pub const WIN_SCORE: Score = 1_000_000;

/// Limite finito usado como "infinito" nas janelas alpha-beta.
pub const INFINITY: Score = 10_000_000;

// Enum para representar o lado de uma peça ou de um jogador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Começa nas linhas de baixo e sobe em direção à linha 0. Joga primeiro.
    White,
    /// Começa nas linhas de cima e desce em direção à linha 8.
    Black,
}

impl std::ops::Not for Side {
    type Output = Side;

    fn not(self) -> Self::Output {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl Side {
    /// Direção "para a frente" em linhas.
    #[inline(always)]
    pub fn forward(self) -> isize {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Linha que este lado precisa alcançar para vencer.
    #[inline(always)]
    pub fn goal_row(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => BOARD_SIZE - 1,
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Side::White => 'W',
            Side::Black => 'B',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

// Struct para representar um lance no jogo.
// Guarda a casa de origem, a de destino e se é captura.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from_row: u8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
    pub is_capture: bool,
}

impl Move {
    pub fn new(
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
        is_capture: bool,
    ) -> Self {
        Move {
            from_row: from_row as u8,
            from_col: from_col as u8,
            to_row: to_row as u8,
            to_col: to_col as u8,
            is_capture,
        }
    }

    /// Casa da peça saltada numa captura.
    pub fn jumped_square(&self) -> Option<(usize, usize)> {
        if !self.is_capture {
            return None;
        }
        let row = (self.from_row as usize + self.to_row as usize) / 2;
        let col = (self.from_col as usize + self.to_col as usize) / 2;
        Some((row, col))
    }

    /// Deslocamento em linhas (|Δrow| > 1 só acontece em saltos).
    #[inline(always)]
    pub fn row_span(&self) -> u8 {
        self.from_row.abs_diff(self.to_row)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = if self.is_capture { 'x' } else { '-' };
        write!(
            f,
            "{}{}{}",
            to_coordinate(self.from_row, self.from_col),
            sep,
            to_coordinate(self.to_row, self.to_col)
        )
    }
}

// Colunas a..i da esquerda para a direita, linhas 9..1 de cima para baixo
fn to_coordinate(row: u8, col: u8) -> String {
    let file = (col + b'a') as char;
    let rank = BOARD_SIZE as u8 - row;
    format!("{}{}", file, rank)
}
