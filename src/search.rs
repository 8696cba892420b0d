//! Move-sequence search drivers built on top of the cube.
//!
//! Both drivers only use the cube's public turn, solved, and state queries.
//!
//! The algorithm search is an iterative backtracking search:
//! - Explicit stack of partial sequences instead of recursion
//! - Trivial sequences pruned before turning (undoing the previous move,
//!   three identical moves in a row)
//! - FxHashMap of reached states, so a state is only expanded again when it
//!   is reached by a strictly shorter sequence

use log::{info, trace};
use rustc_hash::FxHashMap;

use crate::cube::{Cube, Face, StateKey};
use crate::error::CubeError;
use crate::notation::{apply_moves, Move};

/// What to search for.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Faces the sequences may turn, in both directions.
    pub faces: Vec<Face>,
    /// Longest sequence to try.
    pub max_depth: usize,
    /// Layer the sequence is allowed to disturb.
    pub layer: Face,
    /// Stop after this many distinct results.
    pub max_results: Option<usize>,
}

/// A partial sequence in the iterative backtracking search.
struct PartialSequence {
    /// Cube after applying `moves` to a solved cube.
    cube: Cube,
    moves: Vec<Move>,
    /// Index into the candidate list of the next move to try.
    next_move: usize,
}

/// Whether appending `next` can only produce something a shorter sequence
/// already does.
fn is_trivial(moves: &[Move], next: Move) -> bool {
    match moves {
        [.., last] if *last == next.inverse() => true,
        [.., second_last, last] => *second_last == next && *last == next,
        _ => false,
    }
}

/// Whether the cube is scrambled but every piece that starts outside
/// `layer` is still home and untwisted.
pub fn only_layer_changed(cube: &Cube, layer: Face) -> bool {
    let (ax, ay, az) = layer.axis(cube.orientation()).rounded();
    !cube.solved()
        && cube.pieces().all(|(_, piece)| {
            let (hx, hy, hz) = piece.home_slot();
            let in_layer = hx * ax + hy * ay + hz * az == 1;
            in_layer || !piece.changed()
        })
}

/// Finds move sequences that scramble only the target layer.
///
/// Results are distinct by resulting cube state, each with the shortest
/// sequence found for it, ordered by length and then by move order
/// (faces U D L R F B, counter-clockwise before clockwise).
pub fn search(options: &SearchOptions) -> Result<Vec<Vec<Move>>, CubeError> {
    let candidates: Vec<Move> = options
        .faces
        .iter()
        .flat_map(|&face| [Move::new(face, true), Move::new(face, false)])
        .collect();

    let root = Cube::new();
    let mut reached: FxHashMap<StateKey, usize> = FxHashMap::default();
    reached.insert(root.state_key(), 0);
    let mut found: FxHashMap<StateKey, Vec<Move>> = FxHashMap::default();
    let mut expanded = 0usize;

    let mut search_stack = vec![PartialSequence {
        cube: root,
        moves: Vec::new(),
        next_move: 0,
    }];

    'search: while let Some(mut partial) = search_stack.pop() {
        if partial.moves.len() >= options.max_depth {
            continue;
        }

        while partial.next_move < candidates.len() {
            let next = candidates[partial.next_move];
            partial.next_move += 1;

            if is_trivial(&partial.moves, next) {
                continue;
            }

            let mut cube = partial.cube.clone();
            next.apply(&mut cube)?;
            expanded += 1;

            // skip states already reached at this depth or shallower
            let depth = partial.moves.len() + 1;
            let key = cube.state_key();
            if reached.get(&key).is_some_and(|&seen| seen <= depth) {
                continue;
            }
            reached.insert(key, depth);

            let mut moves = partial.moves.clone();
            moves.push(next);
            trace!("expanding {}", crate::notation::format_moves(&moves));

            if only_layer_changed(&cube, options.layer) {
                found.insert(key, moves.clone());
                if options.max_results.is_some_and(|limit| found.len() >= limit) {
                    break 'search;
                }
            }

            // save current partial sequence for backtracking, then descend
            search_stack.push(partial);
            search_stack.push(PartialSequence {
                cube,
                moves,
                next_move: 0,
            });
            continue 'search;
        }
    }

    let mut results: Vec<Vec<Move>> = found.into_values().collect();
    results.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    info!(
        "search expanded {expanded} moves, reached {} states, found {} sequences",
        reached.len(),
        results.len()
    );
    Ok(results)
}

/// Counts how many repetitions of `moves` bring a solved cube back to solved.
///
/// Returns `None` if that does not happen within `limit` repetitions.
pub fn cycle_length(moves: &[Move], limit: usize) -> Result<Option<usize>, CubeError> {
    let mut cube = Cube::new();
    for repetition in 1..=limit {
        apply_moves(&mut cube, moves)?;
        if cube.solved() {
            info!("cycle closed after {repetition} repetitions");
            return Ok(Some(repetition));
        }
    }
    Ok(None)
}
