use crate::core::*;
use tracing::debug;

// Tipos de entrada na TT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact, // Valor exato
    Lower, // Score >= beta (fail-high)
    Upper, // Score <= alpha (fail-low)
}

// Entrada da Transposition Table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub fingerprint: u64,
    pub score: Score,
    pub bound: Bound,
    pub depth: u32,
    pub best_move: Move,
}

/// Transposition Table de endereçamento direto: slot = fingerprint % capacidade.
///
/// Só devolve entradas cujo fingerprint coincide com o procurado; uma colisão
/// de slot nunca é confiável. Em colisões fica a entrada de maior profundidade.
/// Quando todos os slots estão ocupados, compacta antes de inserir.
pub struct TranspositionTable {
    slots: Vec<Option<TTEntry>>,
    len: usize,
    retain_fraction: f64,
    collisions: u64,
    compactions: u64,
}

impl TranspositionTable {
    pub fn new(capacity: usize, retain_fraction: f64) -> Self {
        assert!(capacity > 0, "transposition table needs at least one slot");
        Self {
            slots: vec![None; capacity],
            len: 0,
            retain_fraction,
            collisions: 0,
            compactions: 0,
        }
    }

    #[inline(always)]
    fn index(&self, fingerprint: u64) -> usize {
        (fingerprint % self.slots.len() as u64) as usize
    }

    /// Busca uma posição na TT (só match exato de fingerprint)
    pub fn get(&self, fingerprint: u64) -> Option<&TTEntry> {
        self.slots[self.index(fingerprint)]
            .as_ref()
            .filter(|entry| entry.fingerprint == fingerprint)
    }

    /// Armazena com substituição por profundidade
    pub fn put(&mut self, entry: TTEntry) {
        if self.len >= self.slots.len() {
            self.compact(self.retain_fraction);
        }

        let index = self.index(entry.fingerprint);
        match self.slots[index] {
            None => {
                self.slots[index] = Some(entry);
                self.len += 1;
            }
            Some(existing) => {
                if existing.fingerprint != entry.fingerprint {
                    self.collisions += 1;
                }
                if entry.depth >= existing.depth {
                    self.slots[index] = Some(entry);
                }
            }
        }
    }

    /// Mantém só a fração `retain_fraction` mais profunda das entradas. Bloqueante.
    pub fn compact(&mut self, retain_fraction: f64) {
        let mut ranked: Vec<(u32, usize)> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|entry| (entry.depth, index)))
            .collect();

        // Profundidade decrescente; empates ficam na ordem dos slots
        ranked.sort_by(|a, b| b.0.cmp(&a.0));

        let keep = ((ranked.len() as f64) * retain_fraction).floor() as usize;
        for &(_, index) in &ranked[keep.min(ranked.len())..] {
            self.slots[index] = None;
        }

        debug!(
            before = ranked.len(),
            after = keep.min(ranked.len()),
            "transposition table compacted"
        );
        self.len = keep.min(ranked.len());
        self.compactions += 1;
    }

    /// Limpa a TT
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }

    /// Zera os contadores de diagnóstico
    pub fn reset_counters(&mut self) {
        self.collisions = 0;
        self.compactions = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    pub fn compactions(&self) -> u64 {
        self.compactions
    }

    /// Hashfull: percentual de ocupação da TT (0-1000)
    pub fn hashfull(&self) -> u64 {
        (self.len as u64 * 1000) / self.capacity() as u64
    }
}
