//! Piece definitions, color labels, and the solved-state color table.
//!
//! Slots use centered coordinates: each axis runs over -1, 0, 1 with +x to
//! the right, +y up, and +z toward the viewer. The colors follow the standard
//! reference orientation, white up and green front.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::CubeError;
use crate::geometry::{Orientation, Vector};

/// A 3D coordinate representing a slot in the cube.
pub type Coord = (i32, i32, i32);

/// Marker printed before a piece's colors when it is twisted.
pub const TWISTED_MARKER: char = '*';

/// Marker printed after a piece's colors when it is out of place.
pub const MOVED_MARKER: char = '+';

bitflags! {
    /// Set of sticker colors on a piece.
    ///
    /// Flags are declared in letter order so iteration yields the canonical
    /// sorted spelling (`B G O R W Y`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Colors: u8 {
        const BLUE = 1 << 0;
        const GREEN = 1 << 1;
        const ORANGE = 1 << 2;
        const RED = 1 << 3;
        const WHITE = 1 << 4;
        const YELLOW = 1 << 5;
    }
}

/// Each single color paired with its letter and the outward direction of
/// its face on a solved cube.
const FACE_COLORS: [(Colors, char, Coord); 6] = [
    (Colors::BLUE, 'B', (0, 0, -1)),
    (Colors::GREEN, 'G', (0, 0, 1)),
    (Colors::ORANGE, 'O', (-1, 0, 0)),
    (Colors::RED, 'R', (1, 0, 0)),
    (Colors::WHITE, 'W', (0, 1, 0)),
    (Colors::YELLOW, 'Y', (0, -1, 0)),
];

impl Colors {
    /// Letter for a single color, or `None` for empty or combined sets.
    pub fn letter(self) -> Option<char> {
        FACE_COLORS
            .iter()
            .find(|&&(color, _, _)| color == self)
            .map(|&(_, letter, _)| letter)
    }

    /// Outward direction of this color's face on a solved cube.
    ///
    /// Only defined for a single color.
    pub fn home_normal(self) -> Option<Coord> {
        FACE_COLORS
            .iter()
            .find(|&&(color, _, _)| color == self)
            .map(|&(_, _, normal)| normal)
    }

    /// Parses a single color letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        FACE_COLORS
            .iter()
            .find(|&&(_, l, _)| l == letter)
            .map(|&(color, _, _)| color)
    }
}

impl FromStr for Colors {
    type Err = CubeError;

    /// Parses whitespace-separated color letters, e.g. `"R W G"`.
    fn from_str(labels: &str) -> Result<Self, Self::Err> {
        labels.split_whitespace().try_fold(Colors::empty(), |set, token| {
            let mut chars = token.chars();
            match (chars.next().and_then(Colors::from_letter), chars.next()) {
                (Some(color), None) => Ok(set | color),
                _ => Err(CubeError::UnknownColor(token.to_string())),
            }
        })
    }
}

impl fmt::Display for Colors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in self.iter() {
            if let Some(letter) = color.letter() {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

/// Kind of piece, determined by how many stickers it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    /// The hidden piece in the middle of the cube.
    Core,
    /// A face center with one sticker.
    Center,
    /// Two stickers.
    Edge,
    /// Three stickers.
    Corner,
}

impl PieceKind {
    pub fn of(colors: Colors) -> Self {
        match colors.bits().count_ones() {
            0 => PieceKind::Core,
            1 => PieceKind::Center,
            2 => PieceKind::Edge,
            _ => PieceKind::Corner,
        }
    }
}

const fn c3(a: Colors, b: Colors, c: Colors) -> Colors {
    a.union(b).union(c)
}

const fn c2(a: Colors, b: Colors) -> Colors {
    a.union(b)
}

/// Colors of the piece that belongs in each slot of a solved cube.
///
/// Listed in slot index order (x-major, see `grid::coord_to_idx`).
pub const HOME_COLORS: [(Coord, Colors); 27] = {
    use Colors as C;
    [
        ((-1, -1, -1), c3(C::ORANGE, C::YELLOW, C::BLUE)),
        ((-1, -1, 0), c2(C::ORANGE, C::YELLOW)),
        ((-1, -1, 1), c3(C::ORANGE, C::YELLOW, C::GREEN)),
        ((-1, 0, -1), c2(C::ORANGE, C::BLUE)),
        ((-1, 0, 0), C::ORANGE),
        ((-1, 0, 1), c2(C::ORANGE, C::GREEN)),
        ((-1, 1, -1), c3(C::ORANGE, C::WHITE, C::BLUE)),
        ((-1, 1, 0), c2(C::ORANGE, C::WHITE)),
        ((-1, 1, 1), c3(C::ORANGE, C::WHITE, C::GREEN)),
        ((0, -1, -1), c2(C::YELLOW, C::BLUE)),
        ((0, -1, 0), C::YELLOW),
        ((0, -1, 1), c2(C::YELLOW, C::GREEN)),
        ((0, 0, -1), C::BLUE),
        // core, no stickers
        ((0, 0, 0), C::empty()),
        ((0, 0, 1), C::GREEN),
        ((0, 1, -1), c2(C::WHITE, C::BLUE)),
        ((0, 1, 0), C::WHITE),
        ((0, 1, 1), c2(C::WHITE, C::GREEN)),
        ((1, -1, -1), c3(C::RED, C::YELLOW, C::BLUE)),
        ((1, -1, 0), c2(C::RED, C::YELLOW)),
        ((1, -1, 1), c3(C::RED, C::YELLOW, C::GREEN)),
        ((1, 0, -1), c2(C::RED, C::BLUE)),
        ((1, 0, 0), C::RED),
        ((1, 0, 1), c2(C::RED, C::GREEN)),
        ((1, 1, -1), c3(C::RED, C::WHITE, C::BLUE)),
        ((1, 1, 0), c2(C::RED, C::WHITE)),
        ((1, 1, 1), c3(C::RED, C::WHITE, C::GREEN)),
    ]
};

/// One physical piece of the cube.
///
/// The colors never change; turns only move the position and rotate the
/// orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    position: Vector,
    colors: Colors,
    orientation: Orientation,
    orientation_matters: bool,
}

impl Piece {
    /// Creates a piece whose orientation counts toward being solved.
    pub fn new(position: impl Into<Vector>, colors: Colors) -> Self {
        Self {
            position: position.into(),
            colors,
            orientation: Orientation::default(),
            orientation_matters: true,
        }
    }

    /// Creates a piece from whitespace-separated color letters.
    pub fn parse(position: impl Into<Vector>, labels: &str) -> Result<Self, CubeError> {
        Ok(Self::new(position, labels.parse()?))
    }

    /// Creates the piece that sits in `slot` on a solved cube.
    ///
    /// Centers and the core spin in place without looking different, so their
    /// orientation is ignored.
    pub fn home(slot: Coord) -> Result<Self, CubeError> {
        let &(_, colors) = HOME_COLORS
            .iter()
            .find(|&&(coord, _)| coord == slot)
            .ok_or(CubeError::SlotOutOfRange {
                x: slot.0,
                y: slot.1,
                z: slot.2,
            })?;
        Ok(Self::solved(slot, colors))
    }

    /// Creates a piece with the given colors at rest in `slot`.
    pub(crate) fn solved(slot: Coord, colors: Colors) -> Self {
        let piece = Self::new(slot, colors);
        match PieceKind::of(colors) {
            PieceKind::Core | PieceKind::Center => piece.ignoring_orientation(),
            PieceKind::Edge | PieceKind::Corner => piece,
        }
    }

    /// Marks this piece's orientation as irrelevant to being solved.
    pub fn ignoring_orientation(mut self) -> Self {
        self.orientation_matters = false;
        self
    }

    pub fn position(&self) -> &Vector {
        &self.position
    }

    pub fn colors(&self) -> Colors {
        self.colors
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn orientation_matters(&self) -> bool {
        self.orientation_matters
    }

    pub fn kind(&self) -> PieceKind {
        PieceKind::of(self.colors)
    }

    /// Slot the piece currently occupies, from its rounded position.
    pub fn slot(&self) -> Coord {
        self.position.rounded()
    }

    /// Slot the piece started in.
    pub fn home_slot(&self) -> Coord {
        Vector::from(self.position.original()).rounded()
    }

    /// Turns the piece a quarter turn about `axis`.
    ///
    /// Clockwise is as seen from the tip of the axis looking back toward the
    /// origin, which is a negative angle under the right-hand rule.
    pub fn rotate(&mut self, axis: impl Into<[f64; 3]>, clockwise: bool) -> Result<(), CubeError> {
        let axis = axis.into();
        let angle = if clockwise {
            -std::f64::consts::FRAC_PI_2
        } else {
            std::f64::consts::FRAC_PI_2
        };
        self.position.rotate(axis, angle)?;
        self.orientation.rotate(axis, angle)
    }

    pub fn position_changed(&self) -> bool {
        self.position.changed()
    }

    /// Always false for pieces whose orientation is ignored.
    pub fn orientation_changed(&self) -> bool {
        self.orientation_matters && self.orientation.changed()
    }

    pub fn changed(&self) -> bool {
        self.position_changed() || self.orientation_changed()
    }
}

/// One-line summary: colors in canonical order, with a leading marker when
/// twisted and a trailing marker when moved. The core prints as `.`.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.orientation_changed() {
            write!(f, "{TWISTED_MARKER}")?;
        }
        if self.colors.is_empty() {
            write!(f, ".")?;
        } else {
            write!(f, "{}", self.colors)?;
        }
        if self.position_changed() {
            write!(f, "{MOVED_MARKER}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_table_covers_every_slot_once() {
        let mut seen = std::collections::HashSet::new();
        for &((x, y, z), colors) in &HOME_COLORS {
            assert!(seen.insert((x, y, z)), "Slot ({x},{y},{z}) listed twice");
            let expected_stickers = [x, y, z].iter().filter(|&&c| c != 0).count();
            assert_eq!(
                colors.bits().count_ones() as usize,
                expected_stickers,
                "Wrong sticker count at ({x},{y},{z})"
            );
        }
        assert_eq!(seen.len(), 27);
    }

    #[test]
    fn test_home_colors_face_outward() {
        for &(slot, colors) in &HOME_COLORS {
            for color in colors.iter() {
                let (nx, ny, nz) = color.home_normal().unwrap();
                assert!(
                    (nx != 0 && nx == slot.0) || (ny != 0 && ny == slot.1) || (nz != 0 && nz == slot.2),
                    "{color:?} sticker at {slot:?} does not face outward"
                );
            }
        }
    }

    #[test]
    fn test_home_colors_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for &(_, colors) in &HOME_COLORS {
            assert!(seen.insert(colors), "Duplicate piece {colors}");
        }
    }

    #[test]
    fn test_parse_colors() {
        let colors: Colors = "R W G".parse().unwrap();
        assert_eq!(colors, Colors::RED | Colors::WHITE | Colors::GREEN);
        assert_eq!(colors.to_string(), "GRW");
        assert_eq!("".parse::<Colors>().unwrap(), Colors::empty());
        assert_eq!(
            "R X".parse::<Colors>(),
            Err(CubeError::UnknownColor("X".to_string()))
        );
        assert_eq!(
            "r".parse::<Colors>(),
            Err(CubeError::UnknownColor("r".to_string()))
        );
        assert_eq!(
            "RW".parse::<Colors>(),
            Err(CubeError::UnknownColor("RW".to_string()))
        );
    }

    #[test]
    fn test_piece_kinds() {
        assert_eq!(Piece::home((0, 0, 0)).unwrap().kind(), PieceKind::Core);
        assert_eq!(Piece::home((0, 1, 0)).unwrap().kind(), PieceKind::Center);
        assert_eq!(Piece::home((1, 1, 0)).unwrap().kind(), PieceKind::Edge);
        assert_eq!(Piece::home((1, 1, 1)).unwrap().kind(), PieceKind::Corner);
        assert_eq!(
            Piece::home((2, 0, 0)),
            Err(CubeError::SlotOutOfRange { x: 2, y: 0, z: 0 })
        );
    }

    #[test]
    fn test_clockwise_quarter_turn_moves_corner() {
        let mut piece = Piece::parse((1, 1, 1), "R W G").unwrap();
        piece.rotate([1.0, 0.0, 0.0], true).unwrap();
        assert_eq!(piece.slot(), (1, 1, -1));
        assert!(piece.position_changed());
        assert!(piece.orientation_changed());
        assert_eq!(piece.to_string(), "*GRW+");

        piece.rotate([1.0, 0.0, 0.0], false).unwrap();
        assert!(!piece.changed());
        assert_eq!(piece.to_string(), "GRW");
    }

    #[test]
    fn test_center_ignores_spin() {
        let mut center = Piece::home((1, 0, 0)).unwrap();
        center.rotate([1.0, 0.0, 0.0], true).unwrap();
        assert!(center.orientation().changed());
        assert!(!center.orientation_changed());
        assert!(!center.changed());
        assert_eq!(center.to_string(), "R");
    }

    #[test]
    fn test_pieces_do_not_share_state() {
        let mut first = Piece::new((1, 0, 1), Colors::RED | Colors::GREEN);
        let second = Piece::new((1, 0, 1), Colors::RED | Colors::GREEN);
        first.rotate([0.0, 1.0, 0.0], true).unwrap();
        assert!(first.changed());
        assert!(!second.changed());
    }
}
