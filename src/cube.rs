//! The cube: 27 owned pieces in a 3x3x3 slot grid, plus face turns.
//!
//! A face turn picks the nine pieces in one layer, rotates each of them a
//! quarter turn about the face's axis, and then moves every rotated piece
//! into the slot its rounded position now names. Pieces are moved between
//! slots by value; no slot ever aliases another.

use std::fmt;
use std::str::FromStr;

use log::debug;
use rustc_hash::FxHashMap;

use crate::error::CubeError;
use crate::geometry::{Orientation, Vector};
use crate::grid::{checked_slot, format_cube, idx_to_coord, layer_slots, GRID_SIZE};
use crate::pieces::{Colors, Coord, Piece, PieceKind, HOME_COLORS};

/// One of the six faces, named relative to the cube's own frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Up,
    Down,
    Left,
    Right,
    Front,
    Back,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Down,
        Face::Left,
        Face::Right,
        Face::Front,
        Face::Back,
    ];

    pub fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Down => 'D',
            Face::Left => 'L',
            Face::Right => 'R',
            Face::Front => 'F',
            Face::Back => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Result<Self, CubeError> {
        Face::ALL
            .into_iter()
            .find(|face| face.letter() == letter)
            .ok_or_else(|| CubeError::UnknownFace(letter.to_string()))
    }

    /// Outward axis of this face in the given frame.
    pub fn axis(self, frame: &Orientation) -> Vector {
        match self {
            Face::Right => frame.ax().clone(),
            Face::Left => frame.ax().scale(-1.0),
            Face::Up => frame.ay().clone(),
            Face::Down => frame.ay().scale(-1.0),
            Face::Front => frame.az().clone(),
            Face::Back => frame.az().scale(-1.0),
        }
    }
}

impl FromStr for Face {
    type Err = CubeError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Face::from_letter(letter),
            _ => Err(CubeError::UnknownFace(label.to_string())),
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Hashable snapshot of a cube, one entry per slot.
///
/// Each entry packs the occupying piece's colors in the high byte and its
/// quantized frame in the low byte (0 where orientation is ignored).
pub type StateKey = [u16; GRID_SIZE];

/// A 3x3x3 cube of individually tracked pieces.
///
/// Slot `i` always holds the piece whose rounded position is
/// `grid::idx_to_coord(i)`, outside of the body of [`Cube::rotate_face`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    slots: [Piece; GRID_SIZE],
    orientation: Orientation,
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

impl Cube {
    /// Creates a solved cube, white up and green front.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|slot_index| {
                let (slot, colors) = HOME_COLORS[slot_index];
                Piece::solved(slot, colors)
            }),
            orientation: Orientation::default(),
        }
    }

    /// The cube's own frame, used to map face names to rotation axes.
    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    /// Piece in the slot with the given linear index, if the index is below
    /// [`GRID_SIZE`].
    pub fn piece_at(&self, slot_index: usize) -> Option<&Piece> {
        self.slots.get(slot_index)
    }

    /// Piece in the slot at centered coordinates.
    pub fn piece(&self, slot: Coord) -> Result<&Piece, CubeError> {
        Ok(&self.slots[checked_slot(slot)?])
    }

    /// All pieces with their slot coordinates, in slot index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, &Piece)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(slot_index, piece)| (idx_to_coord(slot_index), piece))
    }

    /// Finds the piece with exactly these colors.
    pub fn find(&self, colors: Colors) -> Option<(Coord, &Piece)> {
        self.pieces().find(|(_, piece)| piece.colors() == colors)
    }

    /// Whether every piece is home and untwisted.
    pub fn solved(&self) -> bool {
        self.slots.iter().all(|piece| !piece.changed())
    }

    /// Parses a face letter and turns that face.
    ///
    /// The label is checked before anything moves.
    pub fn turn(&mut self, label: &str, clockwise: bool) -> Result<(), CubeError> {
        let face: Face = label.parse()?;
        self.rotate_face(face, clockwise)
    }

    /// Turns one face a quarter turn.
    pub fn rotate_face(&mut self, face: Face, clockwise: bool) -> Result<(), CubeError> {
        let axis = face.axis(&self.orientation);
        let selector = axis.rounded();
        let layer = layer_slots(selector).ok_or(CubeError::SlotOutOfRange {
            x: selector.0,
            y: selector.1,
            z: selector.2,
        })?;
        debug!(
            "turning {face} {}",
            if clockwise { "clockwise" } else { "counter-clockwise" }
        );

        let axis = axis.components();
        for &slot_index in &layer {
            self.slots[slot_index].rotate(axis, clockwise)?;
        }

        // follow each permutation cycle, swapping the occupant into place
        for &slot_index in &layer {
            let mut hops = 0;
            loop {
                let destination = checked_slot(self.slots[slot_index].slot())?;
                if destination == slot_index {
                    break;
                }
                hops += 1;
                if hops > layer.len() || !layer.contains(&destination) {
                    let (x, y, z) = idx_to_coord(destination);
                    return Err(CubeError::SlotConflict { x, y, z });
                }
                self.slots.swap(slot_index, destination);
            }
        }

        Ok(())
    }

    /// Number of changed pieces of each kind. Kinds with no changes are
    /// absent.
    pub fn diff_summary(&self) -> FxHashMap<PieceKind, usize> {
        let mut counts = FxHashMap::default();
        for piece in self.slots.iter().filter(|piece| piece.changed()) {
            *counts.entry(piece.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Quantized snapshot of the current state.
    pub fn state_key(&self) -> StateKey {
        self.slots.each_ref().map(|piece| {
            let frame = if piece.orientation_matters() {
                piece.orientation().quantized()
            } else {
                0
            };
            ((piece.colors().bits() as u16) << 8) | frame as u16
        })
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cube(self))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn apply(cube: &mut Cube, moves: &[(Face, bool)]) {
        for &(face, clockwise) in moves {
            cube.rotate_face(face, clockwise).unwrap();
        }
    }

    fn random_moves() -> impl Strategy<Value = Vec<(Face, bool)>> {
        prop::collection::vec(
            (prop::sample::select(Face::ALL.to_vec()), any::<bool>()),
            0..40,
        )
    }

    #[test]
    fn test_new_cube_is_solved() {
        let cube = Cube::new();
        assert!(cube.solved());
        assert!(cube.diff_summary().is_empty());
        for (slot, piece) in cube.pieces() {
            assert_eq!(piece.slot(), slot, "Piece {piece} not at its slot");
        }
    }

    #[test]
    fn test_single_turn_unsolves() {
        for face in Face::ALL {
            for clockwise in [true, false] {
                let mut cube = Cube::new();
                cube.rotate_face(face, clockwise).unwrap();
                assert!(!cube.solved(), "{face} (clockwise={clockwise}) left cube solved");
            }
        }
    }

    #[test]
    fn test_four_turns_restore_solved() {
        for face in Face::ALL {
            let mut cube = Cube::new();
            for turn in 1..=4 {
                cube.rotate_face(face, true).unwrap();
                assert_eq!(cube.solved(), turn == 4, "{face} after {turn} turns");
            }
        }
    }

    #[test]
    fn test_right_turn_moves_corner_back() {
        let mut cube = Cube::new();
        cube.rotate_face(Face::Right, true).unwrap();

        let corner = cube.piece((1, 1, -1)).unwrap();
        assert_eq!(corner.colors(), Colors::RED | Colors::WHITE | Colors::GREEN);
        assert!(corner.orientation_changed());

        let center = cube.piece((1, 0, 0)).unwrap();
        assert_eq!(center.colors(), Colors::RED);
        assert!(!center.changed());

        // front-right edge goes up
        let edge = cube.piece((1, 1, 0)).unwrap();
        assert_eq!(edge.colors(), Colors::RED | Colors::GREEN);

        // left layer untouched
        assert!(cube
            .pieces()
            .filter(|((x, _, _), _)| *x < 1)
            .all(|(_, piece)| !piece.changed()));
    }

    #[test]
    fn test_up_turn_matches_standard_notation() {
        let mut cube = Cube::new();
        cube.rotate_face(Face::Up, true).unwrap();
        // U sends the front-right corner to the front-left
        let corner = cube.piece((-1, 1, 1)).unwrap();
        assert_eq!(corner.colors(), Colors::RED | Colors::WHITE | Colors::GREEN);
    }

    #[test]
    fn test_diff_summary_after_turn() {
        let mut cube = Cube::new();
        cube.rotate_face(Face::Front, false).unwrap();
        let summary = cube.diff_summary();
        assert_eq!(summary.get(&PieceKind::Corner), Some(&4));
        assert_eq!(summary.get(&PieceKind::Edge), Some(&4));
        assert_eq!(summary.get(&PieceKind::Center), None);
        assert_eq!(summary.get(&PieceKind::Core), None);
    }

    #[test]
    fn test_unknown_face_rejected_before_mutation() {
        let mut cube = Cube::new();
        assert_eq!(
            cube.turn("X", true),
            Err(CubeError::UnknownFace("X".to_string()))
        );
        assert_eq!(
            cube.turn("RU", true),
            Err(CubeError::UnknownFace("RU".to_string()))
        );
        assert_eq!(cube, Cube::new());

        cube.turn("R", false).unwrap();
        assert!(!cube.solved());
    }

    #[test]
    fn test_out_of_range_lookup() {
        let cube = Cube::new();
        assert_eq!(
            cube.piece((0, 0, 2)).err(),
            Some(CubeError::SlotOutOfRange { x: 0, y: 0, z: 2 })
        );
        assert!(cube.piece_at(GRID_SIZE - 1).is_some());
        assert!(cube.piece_at(GRID_SIZE).is_none());
    }

    #[test]
    fn test_right_up_cycle_length() {
        let mut cube = Cube::new();
        for repetition in 1..=105 {
            cube.rotate_face(Face::Right, true).unwrap();
            cube.rotate_face(Face::Up, true).unwrap();
            assert_eq!(cube.solved(), repetition == 105, "After {repetition} repetitions");
        }
    }

    #[test]
    fn test_state_key_tracks_quantized_state() {
        let mut cube = Cube::new();
        let solved_key = cube.state_key();
        cube.rotate_face(Face::Back, true).unwrap();
        assert_ne!(cube.state_key(), solved_key);
        for _ in 0..3 {
            cube.rotate_face(Face::Back, true).unwrap();
        }
        assert_eq!(cube.state_key(), solved_key);
    }

    #[test]
    fn test_find_piece_by_colors() {
        let mut cube = Cube::new();
        cube.rotate_face(Face::Down, true).unwrap();
        let (slot, _) = cube.find(Colors::YELLOW | Colors::GREEN).unwrap();
        // D sends the front edge to the right
        assert_eq!(slot, (1, -1, 0));
        assert!(cube.find(Colors::YELLOW | Colors::WHITE).is_none());
    }

    proptest! {
        #[test]
        fn test_slots_match_rounded_positions(moves in random_moves()) {
            let mut cube = Cube::new();
            apply(&mut cube, &moves);
            for (slot, piece) in cube.pieces() {
                prop_assert_eq!(piece.slot(), slot);
            }
        }

        #[test]
        fn test_piece_colors_are_conserved(moves in random_moves()) {
            let mut cube = Cube::new();
            apply(&mut cube, &moves);
            let mut colors: Vec<Colors> = cube.pieces().map(|(_, piece)| piece.colors()).collect();
            let mut expected: Vec<Colors> = HOME_COLORS.iter().map(|&(_, colors)| colors).collect();
            colors.sort();
            expected.sort();
            prop_assert_eq!(colors, expected);
        }

        #[test]
        fn test_turn_then_inverse_restores_pieces(
            moves in random_moves(),
            face in prop::sample::select(Face::ALL.to_vec()),
        ) {
            let mut cube = Cube::new();
            apply(&mut cube, &moves);
            let before = cube.clone();

            cube.rotate_face(face, true).unwrap();
            cube.rotate_face(face, false).unwrap();

            for ((slot, piece), (_, expected)) in cube.pieces().zip(before.pieces()) {
                prop_assert_eq!(piece.colors(), expected.colors(), "slot {:?}", slot);
                let drift: f64 = piece
                    .position()
                    .components()
                    .iter()
                    .zip(expected.position().components())
                    .map(|(a, b)| (a - b).abs())
                    .sum();
                prop_assert!(drift < 1e-9, "position drifted at {:?}", slot);
                for (axis, expected_axis) in piece.orientation().axes().iter().zip(expected.orientation().axes()) {
                    let drift: f64 = axis
                        .components()
                        .iter()
                        .zip(expected_axis.components())
                        .map(|(a, b)| (a - b).abs())
                        .sum();
                    prop_assert!(drift < 1e-9, "orientation drifted at {:?}", slot);
                }
            }
            prop_assert_eq!(cube.state_key(), before.state_key());
        }

        #[test]
        fn test_inverse_sequence_solves(moves in random_moves()) {
            let mut cube = Cube::new();
            apply(&mut cube, &moves);
            for &(face, clockwise) in moves.iter().rev() {
                cube.rotate_face(face, !clockwise).unwrap();
            }
            prop_assert!(cube.solved());
        }
    }
}
