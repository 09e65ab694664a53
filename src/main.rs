// Fianco - partida motor contra motor no terminal
use clap::{Parser, ValueEnum};
use fianco::search::{AspirationParams, OrderingFlags};
use fianco::{Error, Position, SearchConfig, SearchEngine, DEFAULT_ZOBRIST_SEED};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Negamax alpha-beta sem heurísticas
    Plain,
    /// Alpha-beta com transposition table e ordenação
    Tt,
    /// Multi-cut sobre alpha-beta com TT
    MultiCut,
    /// Aprofundamento iterativo com janelas de aspiração e TT
    Aspiration,
}

#[derive(Debug, Parser)]
#[command(name = "fianco", about = "Engine self-play for Fianco")]
struct Args {
    /// Profundidade de busca
    #[arg(short, long, default_value_t = 5)]
    depth: u32,

    #[arg(short, long, value_enum, default_value_t = Strategy::Aspiration)]
    strategy: Strategy,

    /// Número máximo de meios-lances
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    /// Layout inicial (linhas separadas por '/', seguido de 'w' ou 'b')
    #[arg(long)]
    layout: Option<String>,

    /// Mantém TT, killers e history entre lances
    #[arg(long)]
    persist: bool,

    /// Orçamento de tempo por lance, em milissegundos (só com aspiração)
    #[arg(long)]
    time_ms: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_ZOBRIST_SEED)]
    seed: u64,
}

fn build_config(args: &Args) -> SearchConfig {
    let base = match args.strategy {
        Strategy::Plain => SearchConfig::plain(),
        Strategy::Tt => SearchConfig {
            aspiration: false,
            ..SearchConfig::default()
        },
        Strategy::MultiCut => SearchConfig {
            aspiration: false,
            multi_cut: true,
            ..SearchConfig::default()
        },
        Strategy::Aspiration => SearchConfig {
            aspiration_params: AspirationParams {
                max_depth: args.depth,
                ..Default::default()
            },
            ..SearchConfig::default()
        },
    };

    SearchConfig {
        depth: args.depth,
        reset_after_move: !args.persist,
        time_budget: args.time_ms.map(Duration::from_millis),
        zobrist_seed: args.seed,
        ordering: if matches!(args.strategy, Strategy::Plain) {
            OrderingFlags::none()
        } else {
            OrderingFlags::all()
        },
        ..base
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = build_config(&args);
    println!("=== FIANCO: {:?} depth {} ===\n", args.strategy, config.depth);

    let mut position = match &args.layout {
        Some(layout) => layout.parse::<Position>()?,
        None => Position::new(),
    };
    let mut engine = SearchEngine::new(config)?;
    let game_start = Instant::now();

    println!("{}\n", position);

    while position.ply < args.max_plies {
        let start = Instant::now();
        match engine.think(&position) {
            Ok(next) => position = next,
            Err(Error::GameOver { winner }) => {
                println!("🏁 {} wins after {} plies", winner, position.ply);
                break;
            }
            Err(Error::NoLegalMoves { side }) => {
                println!("🏁 {} has no moves and loses after {} plies", side, position.ply);
                break;
            }
            Err(e) => return Err(e.into()),
        }

        let stats = engine.stats();
        println!("{}", position);
        println!(
            "   nodes {} cutoffs {} tt hits {} collisions {} ({:.2}ms)\n",
            stats.nodes,
            stats.cutoffs,
            stats.tt_hits,
            stats.collisions,
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    println!("Tempo total: {:.2}s", game_start.elapsed().as_secs_f64());
    Ok(())
}
