use crate::core::{Error, Result, Score, DEFAULT_ZOBRIST_SEED, INFINITY};
use std::time::Duration;

/// Pesos da avaliação estática
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalWeights {
    pub material: Score,
    pub advancement: Score,
    pub vulnerability: Score,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            material: 100,
            advancement: 2,
            vulnerability: 40,
        }
    }
}

/// Heurísticas de ordenação ativas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderingFlags {
    pub killer_moves: bool,
    pub history_heuristic: bool,
    pub capture_priority: bool,
}

impl OrderingFlags {
    pub fn all() -> Self {
        Self {
            killer_moves: true,
            history_heuristic: true,
            capture_priority: true,
        }
    }

    pub fn none() -> Self {
        Self {
            killer_moves: false,
            history_heuristic: false,
            capture_priority: false,
        }
    }
}

/// Parâmetros do multi-cut: redução R, cortes necessários C, amostra M
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiCutParams {
    pub reduction: u32,
    pub cutoffs: u32,
    pub sample: u32,
}

impl Default for MultiCutParams {
    fn default() -> Self {
        Self {
            reduction: 2,
            cutoffs: 3,
            sample: 6,
        }
    }
}

/// Janela de aspiração e profundidade máxima do aprofundamento iterativo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspirationParams {
    pub delta: Score,
    pub max_depth: u32,
}

impl Default for AspirationParams {
    fn default() -> Self {
        Self {
            delta: 1200,
            max_depth: 5,
        }
    }
}

/// Configuração completa do motor, fixada na construção
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    // Transposition table
    pub transposition: bool,
    pub tt_capacity: usize,
    pub retain_fraction: f64,
    pub reset_after_move: bool,

    // Ordenação
    pub ordering: OrderingFlags,
    pub history_capacity: usize,

    // Estratégias
    pub multi_cut: bool,
    pub multi_cut_params: MultiCutParams,
    pub aspiration: bool,
    pub aspiration_params: AspirationParams,
    pub extension: bool,

    // Busca
    pub depth: u32,
    pub alpha: Score,
    pub beta: Score,
    pub time_budget: Option<Duration>,

    pub zobrist_seed: u64,
    pub weights: EvalWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            transposition: true,
            tt_capacity: 1 << 18,
            retain_fraction: 0.75,
            reset_after_move: true,
            ordering: OrderingFlags::all(),
            history_capacity: 1024,
            multi_cut: false,
            multi_cut_params: MultiCutParams::default(),
            aspiration: true,
            aspiration_params: AspirationParams::default(),
            extension: true,
            depth: 5,
            alpha: -INFINITY,
            beta: INFINITY,
            time_budget: None,
            zobrist_seed: DEFAULT_ZOBRIST_SEED,
            weights: EvalWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Negamax alpha-beta puro: sem TT, sem ordenação, sem multi-cut, aspiração ou extensão
    pub fn plain() -> Self {
        Self {
            transposition: false,
            ordering: OrderingFlags::none(),
            multi_cut: false,
            aspiration: false,
            extension: false,
            ..Self::default()
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Rejeita combinações sem sentido
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(Error::InvalidConfig {
                message: message.to_string(),
            })
        };

        if self.tt_capacity == 0 {
            return invalid("tt_capacity must be positive");
        }
        if !(self.retain_fraction > 0.0 && self.retain_fraction < 1.0) {
            return invalid("retain_fraction must be in (0, 1)");
        }
        if self.history_capacity < 2 {
            return invalid("history_capacity must be at least 2");
        }
        if self.alpha >= self.beta {
            return invalid("alpha must be below beta");
        }
        if self.alpha < -INFINITY || self.beta > INFINITY {
            return invalid("window bounds must stay within +/-INFINITY");
        }
        let mc = self.multi_cut_params;
        if self.multi_cut && (mc.cutoffs == 0 || mc.cutoffs > mc.sample) {
            return invalid("multi-cut needs 0 < C <= M");
        }
        if self.aspiration && self.aspiration_params.delta <= 0 {
            return invalid("aspiration delta must be positive");
        }
        Ok(())
    }
}
