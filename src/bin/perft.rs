// Perft / divide para validar o gerador de lances do Fianco

use clap::Parser;
use fianco::{perft, perft_divide, Position};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fianco_perft", about = "Move generator leaf counts")]
struct Args {
    /// Profundidade máxima
    #[arg(short, long, default_value_t = 5)]
    depth: u32,

    /// Threads do pool rayon (padrão: número de CPUs)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Mostra a contagem por lance da raiz na profundidade máxima
    #[arg(long)]
    divide: bool,

    #[arg(long)]
    layout: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let threads = args.threads.unwrap_or_else(num_cpus::get).max(1);
    rayon::ThreadPoolBuilder::new().num_threads(threads).build_global()?;
    info!(threads, "rayon pool ready");

    let position = match &args.layout {
        Some(layout) => layout.parse::<Position>()?,
        None => Position::new(),
    };
    println!("{}\n", position);

    for depth in 1..=args.depth {
        let start = Instant::now();
        let nodes = fianco::perft_parallel(&position, depth);
        let elapsed = start.elapsed();
        let nps = if elapsed.as_secs_f64() > 0.0 {
            (nodes as f64 / elapsed.as_secs_f64()) as u64
        } else {
            0
        };
        println!(
            "perft({}) = {:>12}  {:>8.2}ms  {} nps",
            depth,
            nodes,
            elapsed.as_secs_f64() * 1000.0,
            nps
        );
    }

    if args.divide {
        println!();
        let divide = perft_divide(&position, args.depth);
        for (mv, nodes) in &divide {
            println!("{}: {}", mv, nodes);
        }
        let total: u64 = divide.iter().map(|&(_, nodes)| nodes).sum();
        println!("\nTotal: {}", total);
        // Confere com a versão sequencial
        assert_eq!(
            total,
            perft(&position, args.depth),
            "parallel divide disagrees with sequential perft"
        );
    }

    Ok(())
}
