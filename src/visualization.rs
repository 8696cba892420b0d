//! 3D visualization of a cube using kiss3d.

use kiss3d::prelude::*;

use rubik::pieces::{Colors, Piece};
use rubik::{Cube, Face};

/// Returns the display color for a single sticker color.
fn sticker_color(color: Colors) -> Color {
    match color.letter() {
        Some('W') => Color::new(1.0, 1.0, 1.0, 1.0),
        Some('Y') => Color::new(1.0, 0.85, 0.1, 1.0),
        Some('G') => Color::new(0.1, 0.7, 0.2, 1.0),
        Some('B') => Color::new(0.1, 0.3, 0.9, 1.0),
        Some('R') => Color::new(0.85, 0.1, 0.1, 1.0),
        Some('O') => Color::new(1.0, 0.5, 0.0, 1.0),
        _ => Color::new(0.5, 0.5, 0.5, 1.0),
    }
}

/// Converts piece-space coordinates to a scene vector.
fn to_scene([x, y, z]: [f64; 3]) -> Vec3 {
    Vec3::new(x as f32, y as f32, z as f32)
}

/// Current outward direction of a sticker, given its solved-state normal.
///
/// The solved normal is a signed basis vector, so the current direction is
/// the matching axis of the piece's frame with the same sign.
fn sticker_direction(piece: &Piece, (nx, ny, nz): (i32, i32, i32)) -> [f64; 3] {
    let frame = piece.orientation();
    let mut direction = [0.0; 3];
    for (weight, axis) in [nx, ny, nz].into_iter().zip(frame.axes()) {
        for (component, value) in direction.iter_mut().zip(axis.components()) {
            *component += weight as f64 * value;
        }
    }
    direction
}

/// Builds the 3D scene for a cube.
///
/// Coordinate conventions:
/// - Piece positions are centered, each axis in -1..=1, and map x->X, y->Y,
///   z->Z in world units.
/// - Each piece is a dark cube with one thin colored box per sticker, pushed
///   out along the sticker's current direction.
///
/// Returns every node added so the scene can be rebuilt after a turn.
fn build_scene(scene: &mut SceneNode3d, cube: &Cube) -> Vec<SceneNode3d> {
    /// Size of each rendered piece (slightly smaller than 1.0 for visible gaps).
    const CUBE_SIZE: f32 = 0.9;
    /// Edge length of a sticker.
    const STICKER_SIZE: f32 = 0.8;
    /// Depth of a sticker along its direction.
    const STICKER_THICKNESS: f32 = 0.04;
    /// Distance from a piece's center to its stickers' centers.
    const STICKER_OFFSET: f64 = 0.46;

    let body_color = Color::new(0.08, 0.08, 0.08, 1.0);
    let mut nodes = Vec::new();

    for (_, piece) in cube.pieces() {
        if piece.colors().is_empty() {
            continue;
        }

        let center = piece.position().components();
        let node = scene
            .add_cube(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)
            .set_color(body_color)
            .set_position(to_scene(center));
        nodes.push(node);

        for color in piece.colors().iter() {
            let Some(normal) = color.home_normal() else {
                continue;
            };
            let direction = sticker_direction(piece, normal);
            let sticker_center = [0, 1, 2].map(|i| center[i] + direction[i] * STICKER_OFFSET);
            let [w, h, d] = direction.map(|c| {
                if c.abs() > 0.5 {
                    STICKER_THICKNESS
                } else {
                    STICKER_SIZE
                }
            });
            let node = scene
                .add_cube(w, h, d)
                .set_color(sticker_color(color))
                .set_position(to_scene(sticker_center));
            nodes.push(node);
        }
    }

    nodes
}

fn window_title(cube: &Cube, clockwise: bool) -> String {
    format!(
        "{} - turning {} - [U/D/L/R/F/B] turn, [Space] direction, [N] reset",
        if cube.solved() { "Solved" } else { "Scrambled" },
        if clockwise {
            "clockwise"
        } else {
            "counter-clockwise"
        }
    )
}

/// Displays a cube in an interactive 3D viewer.
pub fn display(cube: Cube) {
    pollster::block_on(display_async(cube));
}

async fn display_async(mut cube: Cube) {
    let mut clockwise = true;

    let mut window = Window::new(&window_title(&cube, clockwise)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(8.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let mut nodes = build_scene(&mut scene, &cube);
    // whether the scene needs to be rebuilt (after a turn or reset)
    let mut needs_rebuild = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action != Action::Press {
                    continue;
                }
                let face = match key {
                    Key::U => Some(Face::Up),
                    Key::D => Some(Face::Down),
                    Key::L => Some(Face::Left),
                    Key::R => Some(Face::Right),
                    Key::F => Some(Face::Front),
                    Key::B => Some(Face::Back),
                    Key::Space => {
                        clockwise = !clockwise;
                        needs_rebuild = true;
                        None
                    }
                    Key::N => {
                        cube = Cube::new();
                        needs_rebuild = true;
                        None
                    }
                    _ => None,
                };
                if let Some(face) = face {
                    match cube.rotate_face(face, clockwise) {
                        Ok(()) => needs_rebuild = true,
                        Err(e) => eprintln!("Failed to turn {face}: {e}"),
                    }
                }
            }
        }

        if needs_rebuild {
            for mut node in nodes.drain(..) {
                node.remove();
            }
            nodes = build_scene(&mut scene, &cube);
            window.set_title(&window_title(&cube, clockwise));
            needs_rebuild = false;
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
