//! Thin CLI demonstrating the `build_tree`/`solve` entry points over a
//! JSON record file. YAML/CSV ingestion and rendering aren't implemented
//! here; this just proves the library compiles to a runnable shape, the
//! way every binary in this crate's ancestry does.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rebalance::{BucketSolver, SolveOptions, Tree};

#[derive(Parser)]
#[command(about = "Rebalance a tree of buckets toward their target ratios")]
struct Cli {
    /// Path to a JSON file containing an array of records.
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = SolverChoice::Constrained)]
    solver: SolverChoice,

    /// Monte-Carlo step size, ignored by the other solvers.
    #[arg(long, default_value_t = 0.01)]
    step_size: f64,

    /// Monte-Carlo iteration cap; defaults to ⌈A / step_size⌉.
    #[arg(long)]
    max_steps: Option<usize>,

    /// Outer fixed-point iteration cap for the graph driver.
    #[arg(long, default_value_t = 1024)]
    max_attempts: usize,
}

#[derive(Clone, ValueEnum)]
enum SolverChoice {
    Unconstrained,
    Constrained,
    MonteCarlo,
}

#[derive(serde::Serialize)]
struct SolvedNode {
    label: String,
    level: usize,
    current_value: f64,
    optimal_ratio: f64,
    current_ratio: f64,
    amount_to_add: f64,
    results_value: f64,
    results_ratio: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.input)?;
    let records: Vec<rebalance::Record> = serde_json::from_str(&raw)?;
    let tree = rebalance::build_tree(records)?;

    let amount_to_add = tree.node(tree.root()).amount_to_add;
    let solver = match cli.solver {
        SolverChoice::Unconstrained => BucketSolver::Unconstrained,
        SolverChoice::Constrained => BucketSolver::Constrained,
        SolverChoice::MonteCarlo => BucketSolver::MonteCarlo {
            step_size: cli.step_size,
            max_steps: cli
                .max_steps
                .unwrap_or_else(|| (amount_to_add / cli.step_size).ceil().max(0.0) as usize),
        },
    };

    let options = SolveOptions {
        max_attempts: cli.max_attempts,
        ..SolveOptions::default()
    };
    let solved = rebalance::solve(tree, &solver, options)?;

    print_solution(&solved);
    Ok(())
}

fn print_solution(tree: &Tree) {
    let mut nodes: Vec<SolvedNode> = tree
        .nodes()
        .map(|idx| {
            let data = tree.node(idx);
            SolvedNode {
                label: data.label.clone(),
                level: data.level,
                current_value: data.current_value,
                optimal_ratio: data.optimal_ratio,
                current_ratio: data.current_ratio,
                amount_to_add: data.amount_to_add,
                results_value: data.results_value,
                results_ratio: data.results_ratio,
            }
        })
        .collect();
    nodes.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.label.cmp(&b.label)));

    match serde_json::to_string_pretty(&nodes) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("failed to serialize solved tree: {}", err),
    }
}
