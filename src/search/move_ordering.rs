use crate::core::*;
use super::config::OrderingFlags;
use fxhash::FxHashMap as HashMap;

/// Máximo de killer moves guardados por profundidade
pub const MAX_KILLERS_PER_DEPTH: usize = 10;

/// Killer moves: por profundidade, lances que causaram cutoff, ordenados por frequência
#[derive(Debug, Default, Clone)]
pub struct KillerTable {
    by_depth: HashMap<u32, Vec<(Move, u32)>>,
}

impl KillerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regista um cutoff; com a tabela cheia, um lance novo substitui o menos frequente
    pub fn record(&mut self, mv: Move, depth: u32) {
        let killers = self.by_depth.entry(depth).or_default();

        if let Some((_, count)) = killers.iter_mut().find(|(killer, _)| *killer == mv) {
            *count += 1;
        } else if killers.len() < MAX_KILLERS_PER_DEPTH {
            killers.push((mv, 1));
        } else if let Some(last) = killers.last_mut() {
            // Já ordenada por frequência: o último é o menos frequente
            *last = (mv, 1);
        }

        // sort estável: empates mantêm a ordem de chegada
        killers.sort_by(|a, b| b.1.cmp(&a.1));
        killers.truncate(MAX_KILLERS_PER_DEPTH);
    }

    /// Frequência do lance como killer nesta profundidade
    pub fn frequency(&self, mv: Move, depth: u32) -> Option<u32> {
        self.by_depth
            .get(&depth)?
            .iter()
            .find(|(killer, _)| *killer == mv)
            .map(|&(_, count)| count)
    }

    pub fn at_depth(&self, depth: u32) -> &[(Move, u32)] {
        self.by_depth.get(&depth).map_or(&[], |killers| killers.as_slice())
    }

    pub fn clear(&mut self) {
        self.by_depth.clear();
    }
}

/// History heuristic: bónus acumulado por lance (+2*depth por cutoff)
#[derive(Debug, Clone)]
pub struct HistoryTable {
    scores: HashMap<Move, u32>,
    capacity: usize,
}

impl HistoryTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            scores: HashMap::default(),
            capacity,
        }
    }

    pub fn add(&mut self, mv: Move, depth: u32) {
        *self.scores.entry(mv).or_insert(0) += 2 * depth;

        if self.scores.len() > self.capacity {
            self.evict_lower_half();
        }
    }

    pub fn score(&self, mv: Move) -> Option<u32> {
        self.scores.get(&mv).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    // Remove a metade com menor bónus
    fn evict_lower_half(&mut self) {
        let mut ranked: Vec<(Move, u32)> =
            self.scores.iter().map(|(&mv, &score)| (mv, score)).collect();
        // Desempate pelo próprio lance para que o resultado não dependa da ordem do HashMap
        ranked.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| move_key(a.0).cmp(&move_key(b.0)))
        });
        ranked.truncate(ranked.len() / 2);
        self.scores = ranked.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }
}

#[inline(always)]
fn move_key(mv: Move) -> (u8, u8, u8, u8) {
    (mv.from_row, mv.from_col, mv.to_row, mv.to_col)
}

/// Move Ordering - Ordena lances em camadas para maximizar cutoffs no alpha-beta
///
/// 1. killer moves desta profundidade (por frequência)
/// 2. capturas
/// 3. lances com history (por bónus)
/// 4. o resto, na ordem de geração
#[derive(Debug, Clone)]
pub struct MoveOrderer {
    flags: OrderingFlags,
    killers: KillerTable,
    history: HistoryTable,
}

impl MoveOrderer {
    pub fn new(flags: OrderingFlags, history_capacity: usize) -> Self {
        Self {
            flags,
            killers: KillerTable::new(),
            history: HistoryTable::new(history_capacity),
        }
    }

    /// Ordena por (camada, chave decrescente).
    /// O sort estável preserva a ordem de geração nos empates.
    pub fn order(&self, mut moves: Vec<Move>, depth: u32) -> Vec<Move> {
        moves.sort_by_cached_key(|&mv| {
            let (tier, key) = self.rank(mv, depth);
            (tier, std::cmp::Reverse(key))
        });
        moves
    }

    fn rank(&self, mv: Move, depth: u32) -> (u8, u32) {
        if self.flags.killer_moves {
            if let Some(count) = self.killers.frequency(mv, depth) {
                return (0, count);
            }
        }
        if self.flags.capture_priority && mv.is_capture {
            return (1, 0);
        }
        if self.flags.history_heuristic {
            if let Some(score) = self.history.score(mv) {
                return (2, score);
            }
        }
        (3, 0)
    }

    /// Regista o lance que causou cutoff a esta profundidade
    pub fn record_cutoff(&mut self, mv: Move, depth: u32) {
        if self.flags.killer_moves {
            self.killers.record(mv, depth);
        }
        if self.flags.history_heuristic {
            self.history.add(mv, depth);
        }
    }

    pub fn killers(&self) -> &KillerTable {
        &self.killers
    }

    pub fn history(&self) -> &HistoryTable {
        &self.history
    }

    pub fn clear(&mut self) {
        self.killers.clear();
        self.history.clear();
    }
}
