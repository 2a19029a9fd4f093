use std::{
    error::Error,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use clap::{Parser, ValueEnum};
use flexi_logger::LoggerHandle;
use fleury::{eulerian_circuit, generate_eulerian_graph, BridgeStrategy, Circuit};
use rand::{rngs::StdRng, SeedableRng};

/// Generates random Eulerian graphs and walks them with Fleury's algorithm.
#[derive(Debug, Parser)]
#[command(name = "fleury")]
struct Cli {
    /// Number of vertices of the generated graph.
    #[arg(short = 'n', long, default_value_t = 10_000)]
    vertices: usize,
    /// Seed for the random generator. Defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,
    /// How bridges are detected.
    #[arg(long, value_enum, default_value_t = Strategy::Tarjan)]
    strategy: Strategy,
    /// Vertex the circuit starts from.
    #[arg(long, default_value_t = 0)]
    start: usize,
    /// Repeat generation and traversal this many times and report the mean duration.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    runs: u32,
    /// Give up after this many generated graphs. Unbounded by default.
    #[arg(long)]
    max_attempts: Option<usize>,
    /// Print the circuit.
    #[arg(long)]
    print_path: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Remove each candidate edge and recheck connectivity.
    Naive,
    /// Tarjan's low-link bridge finding.
    Tarjan,
}

impl From<Strategy> for BridgeStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Naive => BridgeStrategy::Naive,
            Strategy::Tarjan => BridgeStrategy::Tarjan,
        }
    }
}

fn init_logger() -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    fleury::logging::logger("info")?.log_to_stderr().start()
}

fn print_path(circuit: &Circuit) {
    let path: Vec<String> = circuit.path.iter().map(|u| u.to_string()).collect();
    println!("Eulerian circuit: {} -> END", path.join(" -> "));
}

fn run(cli: &Cli, rng: &mut StdRng) -> Result<Duration, Box<dyn Error>> {
    let start = Instant::now();
    let mut eulerian = generate_eulerian_graph(cli.vertices, rng, cli.max_attempts)?;
    let edges = eulerian.graph.edge_count();
    println!("Tried {} times, {edges} edges in total", eulerian.attempts);
    println!("Eulerian graph generated with {} vertices.", cli.vertices);
    let detector = BridgeStrategy::from(cli.strategy).detector();
    let circuit = eulerian_circuit(&mut eulerian.graph, cli.start, detector)?;
    let elapsed = start.elapsed();
    log::debug!("Circuit of {} edges in {elapsed:?}", circuit.len());
    if cli.print_path {
        print_path(&circuit);
    }
    println!("Took {:.3}s", elapsed.as_secs_f64());
    Ok(elapsed)
}

fn main() -> Result<(), Box<dyn Error>> {
    let _logger = init_logger()?;
    let cli = Cli::parse();
    let seed = match cli.seed {
        Some(seed) => seed,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs(),
    };
    log::info!("seed = {seed}, strategy = {:?}", cli.strategy);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut total = Duration::ZERO;
    for r in 0..cli.runs {
        log::debug!("Run {r}");
        total += run(&cli, &mut rng)?;
    }
    if cli.runs > 1 {
        println!("Mean = {:.3}s", (total / cli.runs).as_secs_f64());
    }
    Ok(())
}
