mod serve;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;

use variant_constraints::prelude::*;
use variant_solver_lib::prelude::*;

#[derive(Debug, Parser)]
#[clap(name = "Variant Solver")]
#[clap(about = "Variant Sudoku solver utility.")]
#[clap(author, version, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Command,

    /// Give up on a query after this many milliseconds
    #[clap(long, global = true)]
    timeout_ms: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find a single solution
    Solve {
        /// Puzzle JSON file
        file: PathBuf,
        /// Pick branch values at random instead of lowest-first
        #[clap(long)]
        random: bool,
        /// Seed for --random, for reproducible results
        #[clap(long)]
        seed: Option<u64>,
    },
    /// Count the solutions
    Count {
        /// Puzzle JSON file
        file: PathBuf,
        /// Stop after this many solutions; 0 counts without bound
        #[clap(long, default_value_t = 0)]
        max: usize,
    },
    /// Compute the true candidates
    Candidates {
        /// Puzzle JSON file
        file: PathBuf,
        /// Count solutions per candidate up to this cap
        #[clap(long, default_value_t = 1)]
        per_candidate: usize,
    },
    /// Run logical steps to a fixed point and print the path
    Path {
        /// Puzzle JSON file
        file: PathBuf,
    },
    /// Perform a single logical step
    Step {
        /// Puzzle JSON file
        file: PathBuf,
    },
    /// Answer query messages over stdin/stdout
    Serve,
}

fn main() {
    let args = Args::parse();

    let cancellation = match args.timeout_ms {
        Some(timeout_ms) => Cancellation::with_deadline(Duration::from_millis(timeout_ms)),
        None => Cancellation::default(),
    };

    let result = match args.command {
        Command::Solve { file, random, seed } => solve(&file, random, seed, &cancellation),
        Command::Count { file, max } => count(&file, max, &cancellation),
        Command::Candidates {
            file,
            per_candidate,
        } => candidates(&file, per_candidate, &cancellation),
        Command::Path { file } => logical_path(&file),
        Command::Step { file } => step(&file),
        Command::Serve => {
            serve::run(cancellation);
            Ok(())
        }
    };

    if let Err(error) = result {
        eprintln!("{} {}", "error:".red().bold(), error);
        std::process::exit(1);
    }
}

fn load_solver(file: &PathBuf, treat_pencilmarks_as_given: bool) -> Result<Solver, String> {
    let json = fs::read_to_string(file).map_err(|err| format!("{}: {}", file.display(), err))?;
    let data = BoardData::from_json(&json)?;
    PuzzleParser::new().parse_board(&data, treat_pencilmarks_as_given)
}

fn print_grid(board: &Board) {
    let size = board.size();
    for row in 0..size {
        let cu = board.cell_utility();
        let line = (0..size)
            .map(|col| {
                let cell = cu.cell(row, col);
                let mask = board.candidates(cell);
                if value_count(mask) == 1 {
                    get_value(mask).to_string()
                } else {
                    ".".to_owned()
                }
            })
            .join(if size > 9 { " " } else { "" });
        println!("{}", line);
    }
}

fn solve(
    file: &PathBuf,
    random: bool,
    seed: Option<u64>,
    cancellation: &Cancellation,
) -> Result<(), String> {
    let solver = load_solver(file, false)?;
    let result = if random {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        solver.find_random_solution(&mut rng, cancellation)
    } else {
        solver.find_first_solution(cancellation)
    };

    match result {
        SingleSolutionResult::Solved(board) => {
            println!("{}", "Solved!".green());
            print_grid(&board);
            Ok(())
        }
        SingleSolutionResult::None => Err("no solution".to_owned()),
        SingleSolutionResult::Cancelled => Err("cancelled".to_owned()),
        SingleSolutionResult::Error(error) => Err(error),
    }
}

fn count(file: &PathBuf, max: usize, cancellation: &Cancellation) -> Result<(), String> {
    let solver = load_solver(file, false)?;
    match solver.find_solution_count(max, None, cancellation) {
        SolutionCountResult::None => {
            println!("{}", "0 solutions".yellow());
            Ok(())
        }
        SolutionCountResult::ExactCount(count) => {
            println!("{} solutions", count.to_string().green());
            Ok(())
        }
        SolutionCountResult::AtLeastCount(count) => {
            println!("at least {} solutions", count.to_string().green());
            Ok(())
        }
        SolutionCountResult::Cancelled(count) => {
            Err(format!("cancelled after {} solutions", count))
        }
        SolutionCountResult::Error(error) => Err(error),
    }
}

fn candidates(
    file: &PathBuf,
    per_candidate: usize,
    cancellation: &Cancellation,
) -> Result<(), String> {
    let solver = load_solver(file, false)?;
    let result = if per_candidate > 1 {
        solver.find_true_candidates_with_count(per_candidate, cancellation)
    } else {
        solver.find_true_candidates(cancellation)
    };

    match result {
        TrueCandidatesResult::Solved(board) => {
            println!("{}", "Unique solution.".green());
            print_grid(&board);
            Ok(())
        }
        TrueCandidatesResult::Candidates(board, _) => {
            let cu = board.cell_utility();
            for cell in board.all_cells() {
                println!(
                    "{}: {}",
                    cell.name(),
                    mask_to_string(board.candidates(cell), cu.size())
                );
            }
            Ok(())
        }
        TrueCandidatesResult::None => Err("no solution".to_owned()),
        TrueCandidatesResult::Cancelled => Err("cancelled".to_owned()),
        TrueCandidatesResult::Error(error) => Err(error),
    }
}

fn logical_path(file: &PathBuf) -> Result<(), String> {
    let mut solver = load_solver(file, true)?;
    let result = solver.run_logical_solve();
    if let Some(desc) = result.description() {
        for line in desc.iter() {
            println!("{}", line);
        }
    } else {
        println!("No logical steps found.");
    }
    print_grid(solver.board());
    if result.is_invalid() {
        Err("board is invalid".to_owned())
    } else {
        Ok(())
    }
}

fn step(file: &PathBuf) -> Result<(), String> {
    let mut solver = load_solver(file, true)?;
    let result = solver.run_single_logical_step();
    match result {
        LogicalStepResult::None => {
            println!("No logical steps found.");
            Ok(())
        }
        LogicalStepResult::Changed(_) => {
            println!("{}", result);
            Ok(())
        }
        LogicalStepResult::Invalid(_) => {
            println!("{}", result);
            Err("board is invalid".to_owned())
        }
    }
}
