//! 3D vectors, rotation, and orientation frames.
//!
//! Every rotation in the crate goes through [`rotation_matrix`], which builds
//! the Rodrigues matrix for a normalized axis and an angle. Vectors remember
//! the coordinates they were built with, so "has this moved?" is a comparison
//! against that snapshot rather than against some external reference.

use crate::error::CubeError;
use crate::pieces::Coord;

/// Total per-axis drift below which a vector counts as unchanged.
pub const EPSILON: f64 = 1e-6;

/// Row-major 3x3 matrix.
pub type Matrix3 = [[f64; 3]; 3];

/// Builds the rotation matrix for `angle` radians about `axis`.
///
/// The axis is normalized first; a zero-length axis or a non-finite angle is
/// rejected. Positive
/// angles rotate counter-clockwise when looking down the axis toward the
/// origin (right-hand rule).
pub fn rotation_matrix(axis: [f64; 3], angle: f64) -> Result<Matrix3, CubeError> {
    if !angle.is_finite() {
        return Err(CubeError::NonFinite);
    }
    let [rx, ry, rz] = normalize(axis)?;
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;

    Ok([
        [c + rx * rx * t, rx * ry * t - rz * s, rx * rz * t + ry * s],
        [ry * rx * t + rz * s, c + ry * ry * t, ry * rz * t - rx * s],
        [rz * rx * t - ry * s, rz * ry * t + rx * s, c + rz * rz * t],
    ])
}

/// Multiplies a matrix by a column vector.
#[inline]
pub fn apply(matrix: &Matrix3, v: [f64; 3]) -> [f64; 3] {
    matrix.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}

/// Scales `v` to unit length.
pub fn normalize(v: [f64; 3]) -> Result<[f64; 3], CubeError> {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if !length.is_finite() {
        return Err(CubeError::NonFinite);
    }
    if length == 0.0 {
        return Err(CubeError::ZeroAxis);
    }
    Ok(v.map(|c| c / length))
}

/// A point or direction in 3D, with the coordinates it was created with.
///
/// The original coordinates are captured once by every constructor and never
/// touched again; [`Vector::rotate`] only moves the current ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    current: [f64; 3],
    original: [f64; 3],
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from([x, y, z])
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.current[0]
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.current[1]
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.current[2]
    }

    /// Current coordinates.
    pub fn components(&self) -> [f64; 3] {
        self.current
    }

    /// Coordinates at construction time.
    pub fn original(&self) -> [f64; 3] {
        self.original
    }

    /// Rotates this vector in place by `angle` radians about `axis`.
    pub fn rotate(&mut self, axis: impl Into<[f64; 3]>, angle: f64) -> Result<(), CubeError> {
        let matrix = rotation_matrix(axis.into(), angle)?;
        self.current = apply(&matrix, self.current);
        Ok(())
    }

    /// Whether the vector has drifted from its original coordinates.
    ///
    /// Non-finite coordinates always count as drift.
    pub fn changed(&self) -> bool {
        let drift: f64 = self
            .current
            .iter()
            .zip(&self.original)
            .map(|(current, original)| (current - original).abs())
            .sum();
        drift.is_nan() || drift > EPSILON
    }

    /// Returns a new vector with every component multiplied by `scalar`.
    ///
    /// The result is a fresh vector: its original coordinates are the scaled
    /// current ones.
    pub fn scale(&self, scalar: f64) -> Vector {
        Vector::from(self.current.map(|c| c * scalar))
    }

    /// Returns a new unit-length vector pointing the same way.
    pub fn normalized(&self) -> Result<Vector, CubeError> {
        normalize(self.current).map(Vector::from)
    }

    /// Rounds each component to the nearest integer.
    pub fn rounded(&self) -> Coord {
        let [x, y, z] = self.current.map(|c| c.round() as i32);
        (x, y, z)
    }
}

impl From<[f64; 3]> for Vector {
    fn from(components: [f64; 3]) -> Self {
        Self {
            current: components,
            original: components,
        }
    }
}

impl From<Coord> for Vector {
    fn from((x, y, z): Coord) -> Self {
        Self::new(x as f64, y as f64, z as f64)
    }
}

/// Starts a new vector at another vector's current coordinates.
impl From<&Vector> for Vector {
    fn from(vector: &Vector) -> Self {
        Self::from(vector.current)
    }
}

impl From<&Vector> for [f64; 3] {
    fn from(vector: &Vector) -> Self {
        vector.current
    }
}

impl TryFrom<&[f64]> for Vector {
    type Error = CubeError;

    fn try_from(components: &[f64]) -> Result<Self, Self::Error> {
        let components: [f64; 3] = components
            .try_into()
            .map_err(|_| CubeError::WrongArity {
                found: components.len(),
            })?;
        if components.iter().any(|c| !c.is_finite()) {
            return Err(CubeError::NonFinite);
        }
        Ok(Self::from(components))
    }
}

/// Angular frame of a piece or of the whole cube.
///
/// Three basis vectors that start out orthonormal and are always rotated
/// together, so they stay orthonormal up to floating-point drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Orientation {
    ax: Vector,
    ay: Vector,
    az: Vector,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            ax: Vector::new(1.0, 0.0, 0.0),
            ay: Vector::new(0.0, 1.0, 0.0),
            az: Vector::new(0.0, 0.0, 1.0),
        }
    }
}

impl Orientation {
    /// Builds a frame from three axes, normalizing each one.
    pub fn new(
        ax: impl Into<[f64; 3]>,
        ay: impl Into<[f64; 3]>,
        az: impl Into<[f64; 3]>,
    ) -> Result<Self, CubeError> {
        Ok(Self {
            ax: Vector::from(normalize(ax.into())?),
            ay: Vector::from(normalize(ay.into())?),
            az: Vector::from(normalize(az.into())?),
        })
    }

    pub fn ax(&self) -> &Vector {
        &self.ax
    }

    pub fn ay(&self) -> &Vector {
        &self.ay
    }

    pub fn az(&self) -> &Vector {
        &self.az
    }

    /// The three basis vectors, in x, y, z order.
    pub fn axes(&self) -> [&Vector; 3] {
        [&self.ax, &self.ay, &self.az]
    }

    /// Rotates all three basis vectors by the same axis and angle.
    pub fn rotate(&mut self, axis: impl Into<[f64; 3]>, angle: f64) -> Result<(), CubeError> {
        let axis = axis.into();
        self.ax.rotate(axis, angle)?;
        self.ay.rotate(axis, angle)?;
        self.az.rotate(axis, angle)?;
        Ok(())
    }

    pub fn changed(&self) -> bool {
        self.ax.changed() || self.ay.changed() || self.az.changed()
    }

    /// Small integer identifying the frame among the 24 axis-aligned ones.
    ///
    /// Two frames with the same code have the same rounded `ax` and `ay`,
    /// which determines `az` as well. Never returns 0.
    pub fn quantized(&self) -> u8 {
        signed_axis(self.ax.rounded()) * 7 + signed_axis(self.ay.rounded()) + 1
    }
}

/// Maps a rounded unit direction to 0..=5, or 6 if it is not axis-aligned.
fn signed_axis(direction: Coord) -> u8 {
    match direction {
        (1, 0, 0) => 0,
        (-1, 0, 0) => 1,
        (0, 1, 0) => 2,
        (0, -1, 0) => 3,
        (0, 0, 1) => 4,
        (0, 0, -1) => 5,
        _ => 6,
    }
}
