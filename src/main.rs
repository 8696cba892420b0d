//! Rubik's Cube Explorer
//!
//! Applies face turns to a piece-tracked 3x3x3 cube, prints layer diagrams,
//! measures how often a sequence must repeat to return to solved, searches
//! for sequences that only disturb one layer, and provides an interactive
//! 3D view.

mod visualization;

use clap::{Parser, Subcommand};
use log::info;

use rubik::notation::{apply_moves, format_moves, Move};
use rubik::pieces::PieceKind;
use rubik::search::{self, SearchOptions};
use rubik::{Cube, CubeError, Face};

/// Turns, inspects, and searches a 3x3x3 Rubik's cube.
#[derive(Parser)]
#[command(name = "rubik")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply moves to a solved cube and print the result.
    Show {
        /// Moves such as R U R' U'.
        moves: Vec<Move>,
    },
    /// Count how many repetitions of a sequence return the cube to solved.
    Cycle {
        /// Moves such as R U.
        moves: Vec<Move>,
        /// Give up after this many repetitions.
        #[arg(long, default_value_t = 10_000)]
        limit: usize,
    },
    /// Search for sequences that only disturb one layer.
    Search {
        /// Face letters the sequences may turn.
        #[arg(long, default_value = "RUF")]
        faces: String,
        /// Longest sequence to try.
        #[arg(long, default_value_t = 6)]
        depth: usize,
        /// Layer the sequences may disturb.
        #[arg(long, default_value = "U")]
        layer: Face,
        /// Stop after this many results.
        #[arg(long)]
        max_results: Option<usize>,
    },
    /// Display the cube in an interactive 3D viewer.
    Display {
        /// Moves to apply before opening the viewer.
        moves: Vec<Move>,
    },
}

/// Parses a run of face letters such as `RUF`.
fn parse_faces(letters: &str) -> Result<Vec<Face>, CubeError> {
    letters.chars().map(Face::from_letter).collect()
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Show { moves }) => run_show(&moves),
        Some(Command::Cycle { moves, limit }) => run_cycle(&moves, limit),
        Some(Command::Search {
            faces,
            depth,
            layer,
            max_results,
        }) => parse_faces(&faces).and_then(|faces| {
            run_search(SearchOptions {
                faces,
                max_depth: depth,
                layer,
                max_results,
            })
        }),
        Some(Command::Display { moves }) => run_display(&moves),
        None => run_show(&[]),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Applies moves to a fresh cube.
fn scrambled(moves: &[Move]) -> Result<Cube, CubeError> {
    let mut cube = Cube::new();
    apply_moves(&mut cube, moves)?;
    info!("applied {} moves", moves.len());
    Ok(cube)
}

/// Describes which kinds of pieces are out of place.
fn format_summary(cube: &Cube) -> String {
    let summary = cube.diff_summary();
    if summary.is_empty() {
        return "solved".to_string();
    }

    let mut kinds: Vec<_> = summary.into_iter().collect();
    kinds.sort();
    let parts: Vec<String> = kinds
        .into_iter()
        .rev()
        .map(|(kind, count)| {
            let name = match kind {
                PieceKind::Corner => "corner",
                PieceKind::Edge => "edge",
                PieceKind::Center => "center",
                PieceKind::Core => "core",
            };
            let plural = if count == 1 { "" } else { "s" };
            format!("{count} {name}{plural}")
        })
        .collect();
    format!("changed: {}", parts.join(", "))
}

/// Prints the cube diagram after applying moves.
fn run_show(moves: &[Move]) -> Result<(), CubeError> {
    let cube = scrambled(moves)?;
    if !moves.is_empty() {
        println!("{}", format_moves(moves));
    }
    print!("{cube}");
    println!("{}", format_summary(&cube));
    Ok(())
}

/// Prints how many repetitions a sequence needs to return to solved.
fn run_cycle(moves: &[Move], limit: usize) -> Result<(), CubeError> {
    match search::cycle_length(moves, limit)? {
        Some(count) => println!("{}: {} repetitions", format_moves(moves), count),
        None => println!(
            "{}: not solved within {} repetitions",
            format_moves(moves),
            limit
        ),
    }
    Ok(())
}

/// Prints every sequence found by the layer search.
fn run_search(options: SearchOptions) -> Result<(), CubeError> {
    let results = search::search(&options)?;
    println!(
        "Found {} sequences disturbing only the {} layer",
        results.len(),
        options.layer
    );
    for moves in &results {
        let mut cube = Cube::new();
        apply_moves(&mut cube, moves)?;
        println!("{:<30} {}", format_moves(moves), format_summary(&cube));
    }
    Ok(())
}

/// Opens the 3D viewer on a scrambled cube.
fn run_display(moves: &[Move]) -> Result<(), CubeError> {
    let cube = scrambled(moves)?;
    println!("Controls: U D L R F B turn, Space toggles counter-clockwise, N resets");
    visualization::display(cube);
    Ok(())
}
