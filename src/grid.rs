//! Slot indexing for the 3x3x3 cube and the text diagram renderer.
//!
//! The 27 slots are stored in a flat array. Slot coordinates are centered
//! (-1..=1 per axis) and are shifted by one to get array offsets.

use crate::cube::Cube;
use crate::error::CubeError;
use crate::pieces::Coord;

/// Number of slots in the cube.
pub const GRID_SIZE: usize = 27;

/// Width of one cell in the diagram; fits a corner with both markers.
const CELL_WIDTH: usize = 5;

/// Converts centered (x, y, z) coordinates to a linear slot index.
///
/// Index order is x-major: `idx = (x + 1) * 9 + (y + 1) * 3 + (z + 1)`.
/// The caller must pass coordinates in -1..=1; see [`checked_slot`].
#[inline(always)]
pub const fn coord_to_idx(x: i32, y: i32, z: i32) -> usize {
    ((x + 1) as usize) * 9 + ((y + 1) as usize) * 3 + ((z + 1) as usize)
}

/// Converts a linear slot index to centered (x, y, z) coordinates.
#[inline(always)]
pub const fn idx_to_coord(slot_index: usize) -> Coord {
    (
        (slot_index / 9) as i32 - 1,
        ((slot_index / 3) % 3) as i32 - 1,
        (slot_index % 3) as i32 - 1,
    )
}

/// Converts coordinates to a slot index, rejecting anything off the cube.
pub fn checked_slot((x, y, z): Coord) -> Result<usize, CubeError> {
    let in_range = |c: i32| (-1..=1).contains(&c);
    if in_range(x) && in_range(y) && in_range(z) {
        Ok(coord_to_idx(x, y, z))
    } else {
        Err(CubeError::SlotOutOfRange { x, y, z })
    }
}

/// Slot indices of the layer selected by a rounded face axis.
///
/// The single non-zero component of `selector` fixes that coordinate; the
/// other two range over -1..=1. Returns `None` unless exactly one component
/// is -1 or 1 and the rest are 0.
pub fn layer_slots(selector: Coord) -> Option<[usize; 9]> {
    let (sx, sy, sz) = selector;
    let nonzero = [sx, sy, sz].iter().filter(|&&c| c != 0).count();
    if nonzero != 1 || [sx, sy, sz].iter().any(|c| c.abs() > 1) {
        return None;
    }

    let mut slots = [0; 9];
    let mut count = 0;
    for slot_index in 0..GRID_SIZE {
        let (x, y, z) = idx_to_coord(slot_index);
        let in_layer = (sx != 0 && x == sx) || (sy != 0 && y == sy) || (sz != 0 && z == sz);
        if in_layer {
            slots[count] = slot_index;
            count += 1;
        }
    }
    Some(slots)
}

/// Formats a cube as a human-readable diagram.
///
/// Displays the three z-slices (back to front) side by side. Within a slice,
/// rows run from the top layer (y=1) down and columns from left (x=-1) to
/// right. Each cell is the piece summary from its `Display` impl.
pub fn format_cube(cube: &Cube) -> String {
    let slice_width = 3 * CELL_WIDTH + 2;

    let mut output = String::new();
    let mut header = String::new();
    for z in -1..=1 {
        if z > -1 {
            header.push_str("   ");
        }
        header.push_str(&format!("{:<width$}", format!("z={z}"), width = slice_width));
    }
    output.push_str(header.trim_end());
    output.push('\n');

    for y in (-1..=1).rev() {
        let mut line = String::new();
        for z in -1..=1 {
            if z > -1 {
                line.push_str("   ");
            }
            for x in -1..=1 {
                if x > -1 {
                    line.push(' ');
                }
                let cell = cube
                    .piece_at(coord_to_idx(x, y, z))
                    .map(ToString::to_string)
                    .unwrap_or_default();
                line.push_str(&format!("{:<width$}", cell, width = CELL_WIDTH));
            }
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}
