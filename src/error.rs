//! Error type shared by the whole crate.
//!
//! Every variant is an invalid-argument condition. Nothing here is transient,
//! so callers should propagate rather than retry.

/// Invalid input to a vector, piece, or cube operation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CubeError {
    /// A vector was built from a sequence that does not have 3 components.
    #[error("expected 3 vector components, got {found}")]
    WrongArity { found: usize },
    /// A coordinate or rotation angle was NaN or infinite.
    #[error("coordinates and angles must be finite")]
    NonFinite,
    /// A rotation axis or basis vector had zero length.
    #[error("axis has zero length")]
    ZeroAxis,
    /// A face label other than U, D, L, R, F, or B.
    #[error("unknown face {0:?}, expected one of U D L R F B")]
    UnknownFace(String),
    /// A color label other than W, Y, G, B, R, or O.
    #[error("unknown color {0:?}, expected one of W Y G B R O")]
    UnknownColor(String),
    /// A move token that is not a face letter with an optional `'`.
    #[error("invalid move {0:?}")]
    InvalidMove(String),
    /// A slot index outside of -1..=1 on some axis.
    #[error("slot ({x}, {y}, {z}) is outside the cube")]
    SlotOutOfRange { x: i32, y: i32, z: i32 },
    /// Two pieces of a turning layer landed in the same slot.
    #[error("two pieces landed in slot ({x}, {y}, {z})")]
    SlotConflict { x: i32, y: i32, z: i32 },
}
