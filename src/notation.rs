//! Single face-turn moves written as a face letter plus an optional `'`.
//!
//! `R` turns the right face clockwise, `R'` counter-clockwise. A sequence is
//! just moves separated by whitespace; there is no grouping or repetition.

use std::fmt;
use std::str::FromStr;

use crate::cube::{Cube, Face};
use crate::error::CubeError;

/// One quarter turn of one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub face: Face,
    pub clockwise: bool,
}

impl Move {
    pub const fn new(face: Face, clockwise: bool) -> Self {
        Self { face, clockwise }
    }

    /// The move that undoes this one.
    pub const fn inverse(self) -> Self {
        Self::new(self.face, !self.clockwise)
    }

    /// Both directions of every face, clockwise first.
    pub fn all() -> impl Iterator<Item = Move> {
        Face::ALL
            .into_iter()
            .flat_map(|face| [Move::new(face, true), Move::new(face, false)])
    }

    pub fn apply(self, cube: &mut Cube) -> Result<(), CubeError> {
        cube.rotate_face(self.face, self.clockwise)
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        let face = chars
            .next()
            .ok_or_else(|| CubeError::InvalidMove(token.to_string()))?;
        let face =
            Face::from_letter(face).map_err(|_| CubeError::InvalidMove(token.to_string()))?;
        match chars.as_str() {
            "" => Ok(Move::new(face, true)),
            "'" => Ok(Move::new(face, false)),
            _ => Err(CubeError::InvalidMove(token.to_string())),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clockwise {
            write!(f, "{}", self.face)
        } else {
            write!(f, "{}'", self.face)
        }
    }
}

/// Parses whitespace-separated moves, e.g. `"R U R' U'"`.
pub fn parse_moves(sequence: &str) -> Result<Vec<Move>, CubeError> {
    sequence.split_whitespace().map(str::parse).collect()
}

/// Formats moves separated by single spaces.
pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Applies moves in order, stopping at the first error.
pub fn apply_moves(cube: &mut Cube, moves: &[Move]) -> Result<(), CubeError> {
    moves.iter().try_for_each(|mv| mv.apply(cube))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_moves() {
        assert_eq!("R".parse::<Move>(), Ok(Move::new(Face::Right, true)));
        assert_eq!("U'".parse::<Move>(), Ok(Move::new(Face::Up, false)));
        assert_eq!("B".parse::<Move>(), Ok(Move::new(Face::Back, true)));
    }

    #[test]
    fn test_reject_malformed_moves() {
        for token in ["", "X", "r", "R2", "R''", "Rw"] {
            assert_eq!(
                token.parse::<Move>(),
                Err(CubeError::InvalidMove(token.to_string())),
                "Token {token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_sequence_round_trip_formatting() {
        let moves = parse_moves("  R U  R' U'\tF ").unwrap();
        assert_eq!(moves.len(), 5);
        assert_eq!(format_moves(&moves), "R U R' U' F");
        assert_eq!(parse_moves(""), Ok(vec![]));
    }

    #[test]
    fn test_all_moves_cover_both_directions() {
        let moves: Vec<Move> = Move::all().collect();
        assert_eq!(moves.len(), 12);
        for mv in &moves {
            assert!(moves.contains(&mv.inverse()));
        }
    }

    #[test]
    fn test_sexy_move_has_order_six() {
        let moves = parse_moves("R U R' U'").unwrap();
        let mut cube = Cube::new();
        for repetition in 1..=6 {
            apply_moves(&mut cube, &moves).unwrap();
            assert_eq!(cube.solved(), repetition == 6, "After {repetition} repetitions");
        }
    }
}
