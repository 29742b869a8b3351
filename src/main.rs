use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use u_drayage::config::{SolverConfig, Strategy};
use u_drayage::evaluation::RouteEvaluator;
use u_drayage::io::{parse_problem, MatrixReport, Report};
use u_drayage::reduction::ReducedProblem;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Instance file; reads stdin when omitted
    input: Option<PathBuf>,

    /// JSON solver config; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Optimizer: nearest-neighbor, cheapest-insertion, local-search, exact, ruin-recreate
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Seed for randomized strategies
    #[arg(long)]
    seed: Option<u64>,

    /// Ruin-and-recreate iterations
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Print the derived matrix instead of solving
    #[arg(long)]
    print_matrix: bool,

    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = load_config(&cli)?;
    let text = read_input(cli.input.as_ref())?;
    let problem = parse_problem(&text).context("failed to read instance")?;
    let reduced = ReducedProblem::new(problem);

    if cli.print_matrix {
        let report = MatrixReport::new(reduced.problem(), reduced.derived());
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let optimizer = config.build_optimizer();
    info!(strategy = optimizer.name(), "solving");
    let solution = optimizer.solve(reduced.derived())?;

    let (_, violations) = RouteEvaluator::new(reduced.derived()).evaluate_solution(&solution);
    anyhow::ensure!(violations.is_empty(), "optimizer returned an invalid solution: {violations:?}");

    let report = Report::new(optimizer.name(), reduced.problem(), reduced.derived(), &solution);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_config(cli: &Cli) -> Result<SolverConfig, anyhow::Error> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            SolverConfig::from_json(&text)?
        }
        None => SolverConfig::default(),
    };

    if let Some(strategy) = cli.strategy {
        config = config.with_strategy(strategy);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(iterations) = cli.iterations {
        config = config.with_iterations(iterations);
    }
    Ok(config)
}

fn read_input(path: Option<&PathBuf>) -> Result<String, anyhow::Error> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}
