mod problem_file;

use clap::{Parser, Subcommand};
use simplex_solver::SolverError;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use problem_file::{Overrides, ProblemFile};

#[derive(Parser)]
#[command(name = "simplex")]
#[command(about = "Solve linear programs with the two-phase simplex method", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file and output the optimal solution
    Solve {
        /// JSON file describing the problem
        file: PathBuf,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
        /// Maximum pivots across both phases
        #[arg(long)]
        max_iterations: Option<usize>,
        /// Tolerance for floating point comparisons
        #[arg(long)]
        tolerance: Option<f64>,
    },
    /// Check a problem file for errors without solving it
    Check {
        /// JSON file describing the problem
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Solve {
            file,
            format,
            max_iterations,
            tolerance,
        } => {
            let problem_file = read_problem(&file);
            let solver = match problem_file.into_solver(Overrides {
                max_iterations,
                tolerance,
            }) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            };

            let solution = match solver.solve() {
                Ok(s) => s,
                Err(e) => {
                    let status = match &e {
                        SolverError::Unbounded { .. } => "UNBOUNDED",
                        SolverError::Infeasible { .. } => "INFEASIBLE",
                        SolverError::MaxIterations { .. } => "MAX ITERATIONS",
                        SolverError::InvalidInput(_) => "ERROR",
                    };
                    println!("Status: {}", status);
                    println!("{}", e);
                    std::process::exit(1);
                }
            };

            if format == "json" {
                match serde_json::to_string_pretty(&solution) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error writing JSON: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                println!("Status: OPTIMAL");
                println!(
                    "Objective ({}): {:.4}",
                    solver.problem().sense(),
                    solution.objective_value()
                );
                println!("Iterations: {}", solution.iterations());
                println!();
                println!("Variables:");
                for (label, value) in solution.variables() {
                    println!("  {:8} {:12.4}", label, value);
                }
            }
        }
        Commands::Check { file } => {
            let problem_file = read_problem(&file);
            match problem_file.into_solver(Overrides::default()) {
                Ok(solver) => {
                    let problem = solver.problem();
                    println!("✓ {} is valid", file.display());
                    println!("  {} variables", problem.num_variables());
                    println!("  {} constraints", problem.num_constraints());
                    println!("  objective: {}", problem.sense());
                }
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(1);
    }
}

fn read_problem(path: &Path) -> ProblemFile {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    match ProblemFile::parse(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    }
}
