//! Rush Hour Solver
//!
//! Loads a puzzle from a JSON file and solves it with breadth-first,
//! best-first or iterative deepening search. Prints the solution moves and
//! search statistics, or the whole report as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use rush_hour::persistence::{self, PuzzleFile};
use rush_hour::{
    solve, Board, Error, GoalRule, HeuristicKind, Method, Outcome, SearchReport, SolverConfig,
    DEFAULT_STEP_BUDGET,
};

/// Solves Rush Hour sliding-block puzzles.
#[derive(Parser)]
#[command(name = "rush-hour")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle and print the moves.
    Solve {
        /// Puzzle file (JSON).
        file: PathBuf,
        #[arg(short, long, value_enum, default_value_t = Method::Bfs)]
        method: Method,
        /// Maximum number of expansions.
        #[arg(short, long, default_value_t = DEFAULT_STEP_BUDGET)]
        budget: usize,
        #[arg(short, long, value_enum, default_value_t = GoalRule::ReachedExit)]
        goal: GoalRule,
        #[arg(long, value_enum, default_value_t = HeuristicKind::BlockingVehicles)]
        heuristic: HeuristicKind,
        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
        /// Also write the report to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the legal moves from the initial board.
    Moves { file: PathBuf },
    /// Print the board and its canonical key.
    Show { file: PathBuf },
    /// Run every method on a puzzle and summarise each run.
    Compare {
        file: PathBuf,
        #[arg(short, long, default_value_t = DEFAULT_STEP_BUDGET)]
        budget: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Solve {
            file,
            method,
            budget,
            goal,
            heuristic,
            json,
            output,
        } => {
            let config = SolverConfig::default()
                .with_method(method)
                .with_step_budget(budget)
                .with_goal_rule(goal)
                .with_heuristic(heuristic);
            run_solve(&file, &config, json, output)
        }
        Command::Moves { file } => run_moves(&file),
        Command::Show { file } => run_show(&file),
        Command::Compare { file, budget } => run_compare(&file, budget),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_board(file: &Path) -> Result<Board, Error> {
    Ok(PuzzleFile::load(file)?.board()?)
}

/// Solves the puzzle and prints (and optionally saves) the report.
fn run_solve(
    file: &Path,
    config: &SolverConfig,
    json: bool,
    output: Option<PathBuf>,
) -> Result<(), Error> {
    let board = load_board(file)?;
    let report = solve(&board, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(path) = output {
        persistence::save_report(&path, &report)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn print_report(report: &SearchReport) {
    match &report.outcome {
        Outcome::Solved { moves } => {
            println!("Solved in {} moves:", moves.len());
            for (i, mv) in moves.iter().enumerate() {
                println!("{:>4}. {}", i + 1, mv);
            }
        }
        Outcome::NoSolution => println!("No solution"),
        Outcome::BudgetExhausted => {
            println!("Gave up after {} steps", report.steps_used())
        }
    }
    println!("{}: {}", report.method, report.stats);
}

/// Prints every legal move from the initial board.
fn run_moves(file: &Path) -> Result<(), Error> {
    let board = load_board(file)?;
    let moves = board.possible_moves();
    println!("{} legal moves", moves.len());
    for mv in moves {
        println!("{mv}");
    }
    Ok(())
}

fn run_show(file: &Path) -> Result<(), Error> {
    let board = load_board(file)?;
    print!("{board}");
    println!("{}", board.canonical_key());
    Ok(())
}

/// Runs each method with its default settings and prints one line per run.
fn run_compare(file: &Path, budget: usize) -> Result<(), Error> {
    let board = load_board(file)?;
    for method in Method::ALL {
        let config = SolverConfig::default()
            .with_method(method)
            .with_step_budget(budget);
        let report = solve(&board, &config)?;
        let result = match &report.outcome {
            Outcome::Solved { moves } => format!("{} moves", moves.len()),
            Outcome::NoSolution => "no solution".to_string(),
            Outcome::BudgetExhausted => "budget exhausted".to_string(),
        };
        println!("{:<10} {:<16} {}", method.to_string(), result, report.stats);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_solve_defaults() {
        let cli = Cli::try_parse_from(["rush-hour", "solve", "puzzle.json"]).unwrap();
        let Command::Solve {
            method,
            budget,
            goal,
            heuristic,
            json,
            output,
            ..
        } = cli.command
        else {
            panic!("Expected the solve subcommand");
        };
        assert_eq!(method, Method::Bfs);
        assert_eq!(budget, DEFAULT_STEP_BUDGET);
        assert_eq!(goal, GoalRule::ReachedExit);
        assert_eq!(heuristic, HeuristicKind::BlockingVehicles);
        assert!(!json);
        assert_eq!(output, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_solve_flags() {
        let cli = Cli::try_parse_from([
            "rush-hour",
            "-vv",
            "solve",
            "puzzle.json",
            "--method",
            "ida-star",
            "--goal",
            "drove-through",
            "--heuristic",
            "lower-bound",
            "--budget",
            "10",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Solve {
            method,
            budget,
            goal,
            heuristic,
            json,
            ..
        } = cli.command
        else {
            panic!("Expected the solve subcommand");
        };
        assert_eq!(method, Method::IdaStar);
        assert_eq!(budget, 10);
        assert_eq!(goal, GoalRule::DroveThrough);
        assert_eq!(heuristic, HeuristicKind::LowerBound);
        assert!(json);
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let result = Cli::try_parse_from(["rush-hour", "solve", "p.json", "--method", "dfs"]);
        assert!(result.is_err(), "dfs is not a search method");
    }
}
