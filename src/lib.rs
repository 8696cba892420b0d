//! Rubik's Cube Library
//!
//! Models a 3x3x3 cube as 27 individually tracked pieces in continuous 3D
//! space. Face turns rotate the nine pieces of a layer about the face axis
//! and re-seat them by their rounded positions; the cube is solved when no
//! piece has moved or (where it matters) twisted from where it started.

pub mod cube;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod notation;
pub mod pieces;
pub mod search;

pub use cube::{Cube, Face};
pub use error::CubeError;
pub use notation::Move;
