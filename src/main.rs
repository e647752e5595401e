use std::{error::Error, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

use sbp_solver::{parse_board, random_walk, solve, Algorithm, Board, SearchConfig};

// Puzzle format:
// `W,H,` then H rows of W comma-terminated labels,
// -1 goal, 0 empty, 1 wall, 2 the master brick, 3 and up other bricks.
//
// Example:
// 4,3,
// 1,1,1,1,
// 1,2,0,-1,
// 1,1,1,1,
#[derive(Debug, Parser)]
#[command(name = "sbp", about = "Solve a sliding brick puzzle")]
struct Cli {
    /// Puzzle file.
    puzzle: PathBuf,

    /// TOML run configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Run every algorithm in turn.
    #[arg(long, conflicts_with = "algorithm")]
    all: bool,

    #[arg(long)]
    max_depth: Option<u32>,

    #[arg(long)]
    node_budget: Option<usize>,

    /// Random moves to take (and print) before searching.
    #[arg(long)]
    walk: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn config(&self) -> Result<SearchConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load(path)?,
            None => SearchConfig::default(),
        };

        if let Some(algorithm) = self.algorithm {
            config = config.with_algorithm(algorithm);
        }
        if let Some(depth) = self.max_depth {
            config = config.with_max_depth(depth);
        }
        if let Some(budget) = self.node_budget {
            config = config.with_node_budget(budget);
        }
        let seed = self.seed.or(config.random_seed);
        let steps = self.walk.unwrap_or(config.random_walk_steps);
        config = config.with_random_walk(steps, seed);

        config.validate()?;
        Ok(config)
    }
}

fn walk(board: &Board, config: &SearchConfig) {
    let mut rng = match config.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("{}", board.clone().normalized());
    for step in random_walk(board, config.random_walk_steps, &mut rng) {
        println!("{}", step.mv);
        println!("{}", step.board);
    }
}

fn search(board: &Board, algorithm: Algorithm, config: &SearchConfig) {
    let start = Instant::now();
    let report = solve(board, algorithm, config.max_depth, &config.limits());
    let elapsed = start.elapsed();

    println!("----");
    println!("{}:", algorithm);
    match report.solution() {
        Some(solution) => println!("{}", solution),
        None => println!("No solution found ({:?})", report.outcome),
    }
    println!(
        "{} {:.3}s {}",
        report.stats.closed_states,
        elapsed.as_secs_f64(),
        report.path_cost()
    );
    println!(
        "Expanded {} nodes (generated {} total).",
        report.stats.expanded, report.stats.generated
    );
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.config()?;
    let text = std::fs::read_to_string(&cli.puzzle)?;
    let board = parse_board(&text)?;

    println!("Puzzle:");
    println!("{}", board);

    if config.random_walk_steps > 0 {
        walk(&board, &config);
    }

    if cli.all {
        for algorithm in Algorithm::ALL {
            search(&board, algorithm, &config);
        }
    } else {
        search(&board, config.algorithm, &config);
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
