use crate::core::*;
use super::config::EvalWeights;

/// Avaliação estática: material, avanço e peças expostas a captura
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvalWeights::default())
    }
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> EvalWeights {
        self.weights
    }

    /// Score do ponto de vista de quem joga. Posição terminal devolve a sentinela fixa.
    pub fn evaluate(&self, position: &Position) -> Score {
        if let Some(score) = terminal_score(position) {
            return score;
        }

        let us = position.side_to_move;
        let them = !us;

        let material = position.piece_count(us) as Score - position.piece_count(them) as Score;
        let advancement = self.advancement(position, us) - self.advancement(position, them);

        // Peças que o adversário poderia capturar no próximo lance, e vice-versa
        let exposed =
            position.capturable_pieces(them) as Score - position.capturable_pieces(us) as Score;

        material * self.weights.material + advancement * self.weights.advancement
            - exposed * self.weights.vulnerability
    }

    // Soma dos quadrados do progresso: peças perto da linha objetivo valem muito mais
    fn advancement(&self, position: &Position, side: Side) -> Score {
        let goal = side.goal_row();
        position
            .pieces()
            .filter(|&(_, _, s)| s == side)
            .map(|(row, _, _)| {
                let progress = (BOARD_SIZE - 1 - row.abs_diff(goal)) as Score;
                progress * progress
            })
            .sum()
    }
}

/// Verifica se a posição é terminal.
///
/// +WIN_SCORE se quem joga já venceu, -WIN_SCORE caso contrário.
pub fn terminal_score(position: &Position) -> Option<Score> {
    position.winner().map(|winner| {
        if winner == position.side_to_move {
            WIN_SCORE
        } else {
            -WIN_SCORE
        }
    })
}
