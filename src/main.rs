//! 8-Puzzle Solver
//!
//! Solves the 3x3 sliding tile puzzle with breadth-first search, writing the
//! explored states and the shortest solution path to text files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::TimestampPrecision;
use log::LevelFilter;

use eightpuzzle::{persistence, solve, Board, SearchReport};

/// Default start board, tiles in column-major order.
const DEFAULT_START: &str = "1 4 7 0 2 8 3 5 6";

/// Finds the shortest solution to an 8-puzzle.
///
/// Boards are nine tiles 0-8 in column-major order, 0 being the blank,
/// separated by spaces or commas.
#[derive(Parser)]
#[command(name = "eightpuzzle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the puzzle and write Nodes.txt, NodesInfo.txt and nodePath.txt.
    Solve {
        #[command(flatten)]
        boards: BoardArgs,
        /// Directory to write the output files into.
        #[arg(long, short = 'o', default_value = ".", value_name = "DIR")]
        output_dir: PathBuf,
    },
    /// Solve the puzzle and print each board on the solution path.
    Show {
        #[command(flatten)]
        boards: BoardArgs,
    },
}

#[derive(clap::Args)]
struct BoardArgs {
    /// Starting board.
    #[arg(long, short = 's', default_value = DEFAULT_START)]
    start: Board,
    /// Goal board.
    #[arg(long, short = 'g', default_value = "1 4 7 2 5 8 3 6 0")]
    goal: Board,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match cli.command {
        Some(Command::Solve { boards, output_dir }) => run_solve(&boards, output_dir),
        Some(Command::Show { boards }) => run_show(&boards),
        // default: solve the built-in board into the working directory
        None => match DEFAULT_START.parse() {
            Ok(start) => run_solve(
                &BoardArgs {
                    start,
                    goal: Board::GOAL,
                },
                PathBuf::from("."),
            ),
            Err(e) => {
                eprintln!("Invalid default board: {}", e);
                ExitCode::from(2)
            }
        },
    }
}

/// Solves the puzzle and writes the three artifacts.
fn run_solve(boards: &BoardArgs, output_dir: PathBuf) -> ExitCode {
    let report = solve(boards.start, boards.goal);

    if let Err(e) = persistence::save(&report, &output_dir) {
        eprintln!("Failed to write output files: {}", e);
        return ExitCode::FAILURE;
    }

    println!("{}", summary(&report));
    println!(
        "Wrote {}, {} and {} to {}",
        persistence::NODES_TXT,
        persistence::NODES_INFO_TXT,
        persistence::NODE_PATH_TXT,
        output_dir.display()
    );

    exit_code(&report)
}

/// Solves the puzzle and prints the solution path as grids.
fn run_show(boards: &BoardArgs) -> ExitCode {
    let report = solve(boards.start, boards.goal);

    println!("{}", summary(&report));
    if report.is_solved() {
        print!("{}", format_path(&report));
    }

    exit_code(&report)
}

fn exit_code(report: &SearchReport) -> ExitCode {
    if report.is_solved() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// One-line description of the outcome.
fn summary(report: &SearchReport) -> String {
    match report.move_count() {
        Some(moves) => format!(
            "Found goal state in {} moves ({} states explored)",
            moves,
            report.explored_len()
        ),
        None => format!(
            "This configuration is not solvable ({} states explored)",
            report.explored_len()
        ),
    }
}

/// Formats every board on the solution path with the move that reached it.
fn format_path(report: &SearchReport) -> String {
    let mut output = String::new();

    for node in report.path().unwrap_or_default() {
        match node.last_move {
            None => output.push_str("Start:\n"),
            Some(mv) => output.push_str(&format!("Move {}: {}\n", node.depth, mv)),
        }
        output.push_str(&node.board.to_string());
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn start() -> Board {
        DEFAULT_START.parse().unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_boards() {
        let cli = Cli::parse_from([
            "eightpuzzle",
            "-vv",
            "show",
            "--start",
            "2,8,3,1,6,4,7,0,5",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Show { boards }) => {
                assert_eq!(boards.start.tiles(), &[2, 8, 3, 1, 6, 4, 7, 0, 5]);
                assert_eq!(boards.goal, Board::GOAL);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_cli_rejects_malformed_board() {
        let result = Cli::try_parse_from(["eightpuzzle", "solve", "--start", "1 1 2 3 4 5 6 7 8"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_path_snapshot() {
        let report = solve(start(), Board::GOAL);

        let mut output = summary(&report);
        output.push_str("\n\n");
        output.push_str(&format_path(&report));

        insta::assert_snapshot!(output, @r"
        Found goal state in 3 moves (15 states explored)

        Start:
        1 . 3
        4 2 5
        7 8 6

        Move 1: Down
        1 2 3
        4 . 5
        7 8 6

        Move 2: Right
        1 2 3
        4 5 .
        7 8 6

        Move 3: Down
        1 2 3
        4 5 6
        7 8 .
        ");
    }

    #[test]
    fn test_unsolvable_summary() {
        let start: Board = "8 2 3 1 6 4 7 0 5".parse().unwrap();
        let report = solve(start, Board::GOAL);

        assert_eq!(
            summary(&report),
            "This configuration is not solvable (181440 states explored)"
        );
        assert_eq!(format_path(&report), "");
    }
}
