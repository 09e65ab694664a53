use crate::core::*;
use super::config::SearchConfig;
use super::evaluation::{terminal_score, Evaluator};
use super::move_ordering::MoveOrderer;
use super::transposition::{Bound, TTEntry, TranspositionTable};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Contadores de uma busca
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
    pub tt_hits: u64,
    pub tt_cutoffs: u64,
    pub multi_cut_prunes: u64,
    pub re_searches: u64,
    pub collisions: u64,
    pub compactions: u64,
}

/// Resultado da busca Alpha-Beta
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: Score,
    pub depth: u32,
    pub stats: SearchStats,
    pub time_elapsed: Duration,
}

/// Motor negamax alpha-beta parametrizado por um único `SearchConfig`.
///
/// TT, killers e history são campos deste valor: acesso exclusivo, sem estado global.
/// A busca é sequencial e determinística; a ordem de visita dos irmãos decide a
/// contabilidade de killers/history e portanto a ordenação e as podas.
pub struct SearchEngine {
    config: SearchConfig,
    hasher: ZobristHasher,
    evaluator: Evaluator,
    table: TranspositionTable,
    orderer: MoveOrderer,
    stats: SearchStats,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            hasher: ZobristHasher::new(config.zobrist_seed),
            evaluator: Evaluator::new(config.weights),
            table: TranspositionTable::new(config.tt_capacity, config.retain_fraction),
            orderer: MoveOrderer::new(config.ordering, config.history_capacity),
            stats: SearchStats::default(),
            config,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn hasher(&self) -> &ZobristHasher {
        &self.hasher
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    pub fn orderer(&self) -> &MoveOrderer {
        &self.orderer
    }

    /// Contadores da última busca
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            collisions: self.table.collisions(),
            compactions: self.table.compactions(),
            ..self.stats
        }
    }

    /// Esquece TT, killers e history
    pub fn reset(&mut self) {
        self.table.clear();
        self.orderer.clear();
    }

    /// Joga um lance com a profundidade e a janela configuradas
    pub fn think(&mut self, position: &Position) -> Result<Position> {
        self.think_with(position, self.config.depth, self.config.alpha, self.config.beta)
    }

    /// Escolhe e aplica o melhor lance. Devolve a posição resultante.
    pub fn think_with(
        &mut self,
        position: &Position,
        depth: u32,
        alpha: Score,
        beta: Score,
    ) -> Result<Position> {
        let result = self.search(position, depth, alpha, beta)?;
        let next = self.hasher.play(position, result.best_move);

        if self.config.reset_after_move {
            self.reset();
        }
        Ok(next)
    }

    /// Executa a estratégia configurada a partir da raiz
    pub fn search(
        &mut self,
        position: &Position,
        depth: u32,
        alpha: Score,
        beta: Score,
    ) -> Result<SearchResult> {
        assert!(depth >= 1, "search depth must be at least 1");
        assert!(alpha < beta, "empty search window ({alpha}, {beta})");

        if let Some(winner) = position.winner() {
            return Err(Error::GameOver { winner });
        }
        let root = self.hasher.stamp(*position);
        let root_moves = root.legal_moves();
        if root_moves.is_empty() {
            return Err(Error::NoLegalMoves { side: root.side_to_move });
        }

        self.stats = SearchStats::default();
        self.table.reset_counters();
        let start_time = Instant::now();

        let (score, best_move, depth_reached) = if self.config.aspiration {
            self.iterative_deepening(&root, depth, start_time)
        } else {
            let (score, best_move) = self.negamax(&root, depth, 0, alpha, beta);
            (score, best_move, depth)
        };

        // Um hit na TT da raiz devolve o lance guardado; confirma que é legal aqui
        let best_move = best_move
            .filter(|mv| root_moves.contains(mv))
            .unwrap_or(root_moves[0]);

        let result = SearchResult {
            best_move,
            score,
            depth: depth_reached,
            stats: self.stats(),
            time_elapsed: start_time.elapsed(),
        };

        info!(
            best_move = %result.best_move,
            score = result.score,
            depth = result.depth,
            nodes = result.stats.nodes,
            cutoffs = result.stats.cutoffs,
            tt_hits = result.stats.tt_hits,
            collisions = result.stats.collisions,
            elapsed_ms = result.time_elapsed.as_millis() as u64,
            "search finished"
        );

        Ok(result)
    }

    /// Aprofundamento iterativo com janelas de aspiração
    fn iterative_deepening(
        &mut self,
        root: &Position,
        depth: u32,
        start_time: Instant,
    ) -> (Score, Option<Move>, u32) {
        let params = self.config.aspiration_params;
        let max_depth = depth.min(params.max_depth).max(1);

        let mut guess: Score = 0;
        let mut best_move = None;
        let mut depth_completed = 0;

        for d in 1..=max_depth {
            // Verificação cooperativa: nunca interrompe uma profundidade já iniciada
            if let Some(budget) = self.config.time_budget {
                if depth_completed > 0 && start_time.elapsed() >= budget {
                    debug!(depth = d, "time budget exhausted");
                    break;
                }
            }

            let mut alpha = (guess - params.delta).max(-INFINITY);
            let mut beta = (guess + params.delta).min(INFINITY);
            let mut narrow = true;

            loop {
                let (score, mv) = self.negamax(root, d, 0, alpha, beta);

                let failed_low = score <= alpha && alpha > -INFINITY;
                let failed_high = score >= beta && beta < INFINITY;
                if !failed_low && !failed_high {
                    guess = score;
                    best_move = mv;
                    break;
                }

                self.stats.re_searches += 1;
                if failed_low {
                    debug!(depth = d, score, alpha, "aspiration fail low");
                } else {
                    debug!(depth = d, score, beta, "aspiration fail high");
                }

                (alpha, beta) = match (narrow, failed_low) {
                    (true, true) => (-INFINITY, guess),
                    (true, false) => (guess, INFINITY),
                    // Instabilidade da busca: janela completa
                    (false, _) => (-INFINITY, INFINITY),
                };
                narrow = false;
            }

            depth_completed = d;
            debug!(
                depth = d,
                score = guess,
                nodes = self.stats.nodes,
                best_move = ?best_move.map(|mv| mv.to_string()),
                "iteration complete"
            );
        }

        (guess, best_move, depth_completed)
    }

    /// Negamax com alpha-beta, TT, multi-cut e extensão de capturas
    fn negamax(
        &mut self,
        position: &Position,
        depth: u32,
        ply: u32,
        mut alpha: Score,
        mut beta: Score,
    ) -> (Score, Option<Move>) {
        self.stats.nodes += 1;
        let fingerprint = self.hasher.fingerprint(position);

        // ========== TT PROBE ==========
        if self.config.transposition {
            if let Some(entry) = self.table.get(fingerprint).copied() {
                if entry.depth >= depth {
                    self.stats.tt_hits += 1;
                    match entry.bound {
                        Bound::Exact => return (entry.score, Some(entry.best_move)),
                        Bound::Lower => alpha = alpha.max(entry.score),
                        Bound::Upper => beta = beta.min(entry.score),
                    }
                    if alpha >= beta {
                        self.stats.tt_cutoffs += 1;
                        trace!(ply, depth, score = entry.score, "tt cutoff");
                        return (entry.score, Some(entry.best_move));
                    }
                }
            }
        }

        // ========== HORIZONTE ==========
        if let Some(score) = terminal_score(position) {
            // Vitórias mais rápidas valem mais (continua finito)
            return (score + score.signum() * depth as Score, None);
        }
        if depth == 0 {
            return (self.evaluator.evaluate(position), None);
        }

        let moves = position.legal_moves();
        if moves.is_empty() {
            // Sem lances: derrota de quem joga
            return (-(WIN_SCORE + depth as Score), None);
        }
        let moves = self.orderer.order(moves, depth);

        // ========== MULTI-CUT ==========
        if self.config.multi_cut && ply > 0 && depth > self.config.multi_cut_params.reduction {
            if self.multi_cut(position, &moves, depth, ply, alpha, beta) {
                self.stats.multi_cut_prunes += 1;
                return (beta, None);
            }
        }

        // ========== EXPANSÃO ==========
        let window_alpha = alpha;
        let mut best_score = Score::MIN;
        let mut best_move = None;

        for &mv in &moves {
            let child = self.hasher.play(position, mv);
            let child_depth = if self.config.extension && mv.row_span() > 1 {
                depth
            } else {
                depth - 1
            };

            let (score, _) = self.negamax(&child, child_depth, ply + 1, -beta, -alpha);
            let score = -score; // Negamax: sempre nega o score do filho

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }

            alpha = alpha.max(best_score);

            if alpha >= beta {
                self.stats.cutoffs += 1;
                self.orderer.record_cutoff(mv, depth);
                break; // Beta cutoff
            }
        }

        // ========== TT STORE ==========
        if let (true, Some(mv)) = (self.config.transposition, best_move) {
            let bound = if best_score <= window_alpha {
                Bound::Upper
            } else if best_score >= beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.table.put(TTEntry {
                fingerprint,
                score: best_score,
                bound,
                depth,
                best_move: mv,
            });
        }

        (best_score, best_move)
    }

    /// Amostra os primeiros M lances a profundidade reduzida; C fail-highs bastam para cortar
    fn multi_cut(
        &mut self,
        position: &Position,
        moves: &[Move],
        depth: u32,
        ply: u32,
        alpha: Score,
        beta: Score,
    ) -> bool {
        let params = self.config.multi_cut_params;
        let reduced = depth - 1 - params.reduction;
        let mut cuts = 0;

        for &mv in moves.iter().take(params.sample as usize) {
            let child = self.hasher.play(position, mv);
            let (score, _) = self.negamax(&child, reduced, ply + 1, -beta, -alpha);

            if -score >= beta {
                cuts += 1;
                if cuts >= params.cutoffs {
                    return true;
                }
            }
        }
        false
    }
}
