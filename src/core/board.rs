// Ficheiro: src/core/board.rs
// Descrição: Módulo que contém a struct Position e as regras de movimento do Fianco.

use super::error::{Error, Result};
use super::types::*;
use std::str::FromStr;

/// Layout inicial: linha de fundo completa mais duas diagonais que convergem para o centro.
pub const START_LAYOUT: &str = "BBBBBBBBB/1B5B1/2B3B2/3B1B3/9/3W1W3/2W3W2/1W5W1/WWWWWWWWW w";

type Grid = [[Option<Side>; BOARD_SIZE]; BOARD_SIZE];

// A struct principal do tabuleiro. É `Copy`: cada lance produz um snapshot novo,
// nenhum nó da busca observa mutações feitas pela subárvore de um irmão.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    cells: Grid,

    // De quem é a vez de jogar.
    pub side_to_move: Side,

    // Meios-lances jogados desde o início.
    pub ply: u32,

    // Cache: o lado a jogar tem pelo menos uma captura (captura obrigatória).
    capture_available: bool,

    // Preenchido pelo ZobristHasher (calculado de forma preguiçosa).
    fingerprint: Option<u64>,
}

impl PartialEq for Position {
    // Identidade de jogo: grelha e lado a jogar. Ply e hash não contam.
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells && self.side_to_move == other.side_to_move
    }
}

impl Eq for Position {}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Cria a posição inicial padrão (15 peças por lado, brancas jogam).
    pub fn new() -> Self {
        let mut cells: Grid = [[None; BOARD_SIZE]; BOARD_SIZE];

        for col in 0..BOARD_SIZE {
            cells[0][col] = Some(Side::Black);
            cells[BOARD_SIZE - 1][col] = Some(Side::White);
        }
        for i in 1..=3 {
            cells[i][i] = Some(Side::Black);
            cells[i][BOARD_SIZE - 1 - i] = Some(Side::Black);

            let row = BOARD_SIZE - 1 - i;
            cells[row][i] = Some(Side::White);
            cells[row][BOARD_SIZE - 1 - i] = Some(Side::White);
        }

        Self::from_cells(cells, Side::White)
    }

    /// Cria uma posição a partir de uma grelha arbitrária.
    pub fn from_cells(
        cells: [[Option<Side>; BOARD_SIZE]; BOARD_SIZE],
        side_to_move: Side,
    ) -> Self {
        let mut position = Position {
            cells,
            side_to_move,
            ply: 0,
            capture_available: false,
            fingerprint: None,
        };
        position.capture_available = position.has_capture(side_to_move);
        position
    }

    #[inline(always)]
    pub fn piece_at(&self, row: usize, col: usize) -> Option<Side> {
        self.cells[row][col]
    }

    /// Itera sobre todas as peças do tabuleiro (linha, coluna, lado).
    pub fn pieces(&self) -> impl Iterator<Item = (usize, usize, Side)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|side| (row, col, side)))
        })
    }

    pub fn piece_count(&self, side: Side) -> u32 {
        self.pieces().filter(|&(_, _, s)| s == side).count() as u32
    }

    /// Flag de captura obrigatória para o lado a jogar.
    #[inline(always)]
    pub fn capture_available(&self) -> bool {
        self.capture_available
    }

    /// Hash Zobrist, se já tiver sido calculado.
    #[inline(always)]
    pub fn fingerprint(&self) -> Option<u64> {
        self.fingerprint
    }

    pub(crate) fn set_fingerprint(&mut self, fingerprint: u64) {
        self.fingerprint = Some(fingerprint);
    }

    // ========================================================================
    // GERAÇÃO DE LANCES
    // ========================================================================

    /// Gera todos os lances legais do lado a jogar.
    ///
    /// Ordem de geração (determinística): linhas 0..9, colunas 0..9 e, por peça,
    /// salto diagonal esquerdo, salto diagonal direito, passo em frente, passo
    /// lateral esquerdo, passo lateral direito. Se existir alguma captura, só
    /// capturas são devolvidas.
    pub fn legal_moves(&self) -> Vec<Move> {
        let side = self.side_to_move;
        let mut captures = Vec::new();
        let mut steps = Vec::with_capacity(48);

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.cells[row][col] != Some(side) {
                    continue;
                }
                self.push_captures(side, row, col, &mut captures);
                if captures.is_empty() {
                    self.push_steps(side, row, col, &mut steps);
                }
            }
        }

        if captures.is_empty() {
            steps
        } else {
            captures
        }
    }

    fn push_captures(&self, side: Side, row: usize, col: usize, out: &mut Vec<Move>) {
        let forward = side.forward();
        for dcol in [-1, 1] {
            let Some((mid_row, mid_col)) = offset(row, col, forward, dcol) else {
                continue;
            };
            let Some((land_row, land_col)) = offset(row, col, 2 * forward, 2 * dcol) else {
                continue;
            };
            if self.cells[mid_row][mid_col] == Some(!side)
                && self.cells[land_row][land_col].is_none()
            {
                out.push(Move::new(row, col, land_row, land_col, true));
            }
        }
    }

    fn push_steps(&self, side: Side, row: usize, col: usize, out: &mut Vec<Move>) {
        for (drow, dcol) in [(side.forward(), 0), (0, -1), (0, 1)] {
            if let Some((to_row, to_col)) = offset(row, col, drow, dcol) {
                if self.cells[to_row][to_col].is_none() {
                    out.push(Move::new(row, col, to_row, to_col, false));
                }
            }
        }
    }

    /// Verifica se `side` tem alguma captura disponível.
    pub fn has_capture(&self, side: Side) -> bool {
        let mut buffer = Vec::new();
        for (row, col, s) in self.pieces() {
            if s == side {
                self.push_captures(side, row, col, &mut buffer);
                if !buffer.is_empty() {
                    return true;
                }
            }
        }
        false
    }

    /// Número de peças inimigas distintas que `side` poderia capturar agora.
    pub fn capturable_pieces(&self, side: Side) -> u32 {
        let mut buffer = Vec::new();
        for (row, col, s) in self.pieces() {
            if s == side {
                self.push_captures(side, row, col, &mut buffer);
            }
        }

        let mut seen = [[false; BOARD_SIZE]; BOARD_SIZE];
        let mut count = 0;
        for (row, col) in buffer.iter().filter_map(Move::jumped_square) {
            if !seen[row][col] {
                seen[row][col] = true;
                count += 1;
            }
        }
        count
    }

    // ========================================================================
    // EXECUÇÃO DE LANCES
    // ========================================================================

    /// Executa um lance e devolve a nova posição.
    ///
    /// Um lance fora do conjunto legal é um defeito do gerador ou do chamador:
    /// falha imediatamente.
    pub fn apply(&self, mv: Move) -> Position {
        let side = self.side_to_move;
        let (from_row, from_col) = (mv.from_row as usize, mv.from_col as usize);
        let (to_row, to_col) = (mv.to_row as usize, mv.to_col as usize);

        assert!(
            [from_row, from_col, to_row, to_col].iter().all(|&i| i < BOARD_SIZE),
            "illegal move {mv}: off the board"
        );
        assert_eq!(
            self.cells[from_row][from_col],
            Some(side),
            "illegal move {mv}: no {side} piece at origin"
        );
        assert!(self.cells[to_row][to_col].is_none(), "illegal move {mv}: destination occupied");
        assert!(
            mv.is_capture || !self.capture_available,
            "illegal move {mv}: capture is mandatory"
        );
        debug_assert!(self.legal_moves().contains(&mv), "illegal move {mv}: not generated");

        let mut next = *self;
        next.cells[from_row][from_col] = None;
        next.cells[to_row][to_col] = Some(side);

        if let Some((jumped_row, jumped_col)) = mv.jumped_square() {
            assert_eq!(
                self.cells[jumped_row][jumped_col],
                Some(!side),
                "illegal move {mv}: nothing to capture"
            );
            next.cells[jumped_row][jumped_col] = None;
        }

        next.side_to_move = !side;
        next.ply += 1;
        next.fingerprint = None;
        next.capture_available = next.has_capture(next.side_to_move);
        next
    }

    // ========================================================================
    // ESTADO TERMINAL
    // ========================================================================

    /// Lado vencedor, se algum lado já tem uma peça na sua linha objetivo.
    pub fn winner(&self) -> Option<Side> {
        // Quem acabou de jogar é o único que pode ter chegado agora
        let last_mover = !self.side_to_move;
        [last_mover, self.side_to_move]
            .into_iter()
            .find(|&side| self.cells[side.goal_row()].contains(&Some(side)))
    }

    #[inline(always)]
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }
}

// Soma um deslocamento a uma casa, devolvendo None fora do tabuleiro
#[inline(always)]
fn offset(row: usize, col: usize, drow: isize, dcol: isize) -> Option<(usize, usize)> {
    let row = row.checked_add_signed(drow)?;
    let col = col.checked_add_signed(dcol)?;
    (row < BOARD_SIZE && col < BOARD_SIZE).then_some((row, col))
}

impl FromStr for Position {
    type Err = Error;

    /// Lê um layout no formato `linhas lado`, linhas separadas por '/', de cima
    /// para baixo: 'W' brancas, 'B' pretas, '.' ou dígitos para casas vazias.
    fn from_str(layout: &str) -> Result<Self> {
        let parts: Vec<&str> = layout.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(Error::MissingField { found: parts.len() });
        }

        let rows: Vec<&str> = parts[0].split('/').collect();
        if rows.len() != BOARD_SIZE {
            return Err(Error::RowCount { rows: rows.len() });
        }

        let mut cells: Grid = [[None; BOARD_SIZE]; BOARD_SIZE];
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0usize;
            for ch in text.chars() {
                let (run, piece) = match ch {
                    'W' => (1, Some(Side::White)),
                    'B' => (1, Some(Side::Black)),
                    '.' => (1, None),
                    '1'..='9' => (ch as usize - '0' as usize, None),
                    _ => return Err(Error::InvalidPiece { ch, row }),
                };
                for _ in 0..run {
                    if col < BOARD_SIZE {
                        cells[row][col] = piece;
                    }
                    col += 1;
                }
            }
            if col != BOARD_SIZE {
                return Err(Error::RowWidth { row, width: col });
            }
        }

        let side = match parts[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => return Err(Error::InvalidSide(other.to_string())),
        };

        Ok(Self::from_cells(cells, side))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, line) in self.cells.iter().enumerate() {
            write!(f, "{} ", BOARD_SIZE - row)?;
            for cell in line {
                let ch = cell.map_or('.', Side::to_char);
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {}", (b'a' + col as u8) as char)?;
        }
        writeln!(f)?;
        write!(f, "{} to move (ply {})", self.side_to_move, self.ply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(layout: &str) -> Position {
        layout.parse().expect("valid layout")
    }

    #[test]
    fn test_start_position() {
        let position = Position::new();
        assert_eq!(position.piece_count(Side::White), 15);
        assert_eq!(position.piece_count(Side::Black), 15);
        assert_eq!(position.side_to_move, Side::White);
        assert!(!position.capture_available());
        assert!(!position.is_terminal());
        assert_eq!(position, parse(START_LAYOUT));
    }

    #[test]
    fn test_start_moves_are_steps_in_generation_order() {
        let moves = Position::new().legal_moves();
        assert!(moves.iter().all(|mv| !mv.is_capture));
        // Primeira peça branca em varrimento: linha 5, coluna 3
        assert_eq!(moves[0], Move::new(5, 3, 4, 3, false));
        assert_eq!(moves[1], Move::new(5, 3, 5, 2, false));
        assert_eq!(moves[2], Move::new(5, 3, 5, 4, false));
        // Linha de fundo só tem passos laterais onde há espaço livre: nenhum
        assert!(moves.iter().all(|mv| mv.from_row != 8 || mv.to_row == 7));
    }

    #[test]
    fn test_single_capture_is_the_only_legal_move() {
        // Branca em e5 pode saltar sobre a preta em d6 para c7
        let position = parse("9/9/9/3B5/4W4/9/9/W8/9 w");
        let moves = position.legal_moves();
        assert_eq!(moves, vec![Move::new(4, 4, 2, 2, true)]);
        assert!(position.capture_available());
    }

    #[test]
    fn test_mandatory_capture_filters_steps() {
        let position = parse("9/9/9/3B1B3/4W4/9/9/WW7/9 w");
        let moves = position.legal_moves();
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|mv| mv.is_capture));
    }

    #[test]
    fn test_capture_needs_empty_landing() {
        let position = parse("9/9/2W6/3B5/4W4/9/9/9/9 w");
        assert!(!position.capture_available());
        assert!(position.legal_moves().iter().all(|mv| !mv.is_capture));
    }

    #[test]
    fn test_black_captures_downwards() {
        let position = parse("9/9/9/4B4/3W5/9/9/9/9 b");
        assert_eq!(position.legal_moves(), vec![Move::new(3, 4, 5, 2, true)]);
    }

    #[test]
    fn test_apply_capture_removes_piece() {
        let position = parse("9/9/9/3B5/4W4/9/9/W8/9 w");
        let next = position.apply(Move::new(4, 4, 2, 2, true));
        assert_eq!(next.piece_at(3, 3), None);
        assert_eq!(next.piece_at(2, 2), Some(Side::White));
        assert_eq!(next.piece_at(4, 4), None);
        assert_eq!(next.piece_count(Side::Black), 0);
        assert_eq!(next.side_to_move, Side::Black);
        assert_eq!(next.ply, 1);
    }

    #[test]
    fn test_apply_leaves_parent_untouched() {
        let position = Position::new();
        let mv = position.legal_moves()[0];
        let next = position.apply(mv);
        assert_ne!(position, next);
        assert_eq!(position, Position::new());
    }

    #[test]
    #[should_panic(expected = "illegal move")]
    fn test_apply_rejects_foreign_piece() {
        Position::new().apply(Move::new(1, 1, 2, 1, false));
    }

    #[test]
    #[should_panic(expected = "capture is mandatory")]
    fn test_apply_rejects_step_when_capture_exists() {
        let position = parse("9/9/9/3B5/4W4/9/9/W8/9 w");
        position.apply(Move::new(7, 0, 6, 0, false));
    }

    #[test]
    fn test_winner_on_goal_row() {
        let position = parse("W8/9/9/9/9/9/9/9/BBBBBBBB1 b");
        assert_eq!(position.winner(), Some(Side::White));

        let position = parse("9/9/9/9/9/9/9/9/4B4 w");
        assert_eq!(position.winner(), Some(Side::Black));

        assert_eq!(parse("9/9/9/4W4/9/9/9/9/9 w").winner(), None);
    }

    #[test]
    fn test_capturable_pieces_counts_distinct_targets() {
        // Duas brancas podem saltar a mesma preta
        let position = parse("9/9/9/4B4/3W1W3/9/9/9/9 w");
        assert_eq!(position.capturable_pieces(Side::White), 1);
        // A preta pode saltar qualquer uma das duas
        assert_eq!(position.capturable_pieces(Side::Black), 2);
    }

    #[test]
    fn test_layout_errors() {
        assert_eq!("9/9 w".parse::<Position>(), Err(Error::RowCount { rows: 2 }));
        assert_eq!(
            "8/9/9/9/9/9/9/9/9 w".parse::<Position>(),
            Err(Error::RowWidth { row: 0, width: 8 })
        );
        assert_eq!(
            "X8/9/9/9/9/9/9/9/9 w".parse::<Position>(),
            Err(Error::InvalidPiece { ch: 'X', row: 0 })
        );
        assert_eq!(
            "9/9/9/9/9/9/9/9/9 x".parse::<Position>(),
            Err(Error::InvalidSide("x".to_string()))
        );
        assert_eq!("9/9/9/9/9/9/9/9/9".parse::<Position>(), Err(Error::MissingField { found: 1 }));
    }

    #[test]
    fn test_display_round_trip_shape() {
        let text = Position::new().to_string();
        assert!(text.starts_with("9  B B B B B B B B B"));
        assert!(text.contains("white to move"));
    }
}
