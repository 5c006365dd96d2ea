//! Scene assembly
//!
//! Turns a [`GameState`] into one triangle list drawn back to front: star
//! field, then obstacles, then the craft. Built in pixel coordinates and
//! mapped to clip space just before upload.

use std::ops::Range;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shapes;
use super::vertex::{Vertex, colors, with_alpha};
use crate::settings::Settings;
use crate::sim::{Craft, GameState, Obstacle, Starfield, Viewport};

const STAR_SEGMENTS: u32 = 6;
const CAP_HEIGHT: f32 = 15.0;
const CAP_INSET: f32 = 10.0;
const STEADY_FLAME: (f32, f32) = (17.5, 0.6);

/// Presentation switches that do not touch the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneOptions {
    pub starfield: bool,
    pub flame_flicker: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            starfield: true,
            flame_flicker: true,
        }
    }
}

impl SceneOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            starfield: settings.quality.starfield_enabled(),
            flame_flicker: settings.flame_flicker(),
        }
    }
}

/// Built vertex list plus where each layer sits in it
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub vertices: Vec<Vertex>,
    pub background: Range<usize>,
    pub obstacles: Range<usize>,
    pub craft: Range<usize>,
}

/// Builds scenes frame after frame
///
/// Owns its own generator for the flame flicker so drawing never consumes
/// simulation randomness.
pub struct SceneBuilder {
    rng: Pcg32,
}

impl SceneBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn build(&mut self, state: &GameState, options: &SceneOptions) -> Scene {
        let mut vertices = Vec::new();

        let start = vertices.len();
        if options.starfield {
            starfield(&state.starfield, &mut vertices);
        }
        let background = start..vertices.len();

        let start = vertices.len();
        for obstacle in state.obstacles.iter() {
            obstacle_art(obstacle, &mut vertices);
        }
        let obstacles = start..vertices.len();

        let start = vertices.len();
        let flame = state.craft.thrusting.then(|| {
            if options.flame_flicker {
                (
                    self.rng.random::<f32>() * 15.0 + 10.0,
                    self.rng.random::<f32>() * 0.8 + 0.2,
                )
            } else {
                STEADY_FLAME
            }
        });
        craft_art(&state.craft, flame, &mut vertices);
        let craft = start..vertices.len();

        Scene {
            vertices,
            background,
            obstacles,
            craft,
        }
    }
}

fn starfield(field: &Starfield, out: &mut Vec<Vertex>) {
    for layer in &field.layers {
        for star in &layer.stars {
            out.extend(shapes::circle(
                star.pos,
                star.radius,
                with_alpha(colors::STAR, star.opacity),
                STAR_SEGMENTS,
            ));
        }
    }
}

/// Dark body, neon centre strip and a trapezoid cap on the edge facing the gap
fn obstacle_art(obstacle: &Obstacle, out: &mut Vec<Vertex>) {
    let Vec2 { x, y } = obstacle.pos;
    let Vec2 { x: w, y: h } = obstacle.size;

    out.extend(shapes::rect(obstacle.pos, obstacle.size, colors::OBSTACLE_BODY));
    out.extend(shapes::rect(
        Vec2::new(x + w / 4.0, y),
        Vec2::new(w / 2.0, h),
        colors::OBSTACLE_NEON,
    ));

    let cap = CAP_HEIGHT.min(h);
    let (edge, inner) = if obstacle.primary {
        (y + h, y + h - cap)
    } else {
        (y, y + cap)
    };
    out.extend(shapes::polygon(
        &[
            Vec2::new(x, edge),
            Vec2::new(x + w, edge),
            Vec2::new(x + w - CAP_INSET, inner),
            Vec2::new(x + CAP_INSET, inner),
        ],
        colors::OBSTACLE_NEON,
    ));
}

/// Hull spanning the collision box, cockpit at the nose, running lights, and
/// an exhaust flame behind the tail when `flame` is `(length, alpha)`
fn craft_art(craft: &Craft, flame: Option<(f32, f32)>, out: &mut Vec<Vertex>) {
    let nose = craft.pos;
    let tail = nose.x - craft.size.x;
    let y = nose.y;
    let half = craft.half_height();

    if let Some((length, alpha)) = flame {
        out.extend(shapes::triangle(
            Vec2::new(tail, y - 8.0),
            Vec2::new(tail - 5.0 - length, y),
            Vec2::new(tail, y + 8.0),
            with_alpha(colors::FLAME, alpha),
        ));
    }

    out.extend(shapes::polygon(
        &[
            nose,
            Vec2::new(tail + 15.0, y - half),
            Vec2::new(tail, y - half + 10.0),
            Vec2::new(tail, y + half - 10.0),
            Vec2::new(tail + 15.0, y + half),
        ],
        colors::HULL,
    ));
    out.extend(shapes::triangle(
        nose,
        Vec2::new(nose.x - 10.0, y - 10.0),
        Vec2::new(nose.x - 10.0, y + 10.0),
        colors::COCKPIT,
    ));

    let light = Vec2::new(5.0, 4.0);
    out.extend(shapes::rect(
        Vec2::new(tail + 25.0, y - half + 2.0),
        light,
        colors::HULL_LIGHT,
    ));
    out.extend(shapes::rect(
        Vec2::new(tail + 25.0, y + half - 6.0),
        light,
        colors::HULL_LIGHT,
    ));
}

/// Map pixel coordinates (origin top-left, y down) to clip space
pub fn to_clip_space(vertices: &mut [Vertex], viewport: Viewport) {
    for v in vertices {
        v.position = [
            v.position[0] / viewport.width * 2.0 - 1.0,
            1.0 - v.position[1] / viewport.height * 2.0,
        ];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};

    fn busy_state() -> GameState {
        let mut state = GameState::new(4);
        state.start();
        for _ in 0..130 {
            tick(&mut state, &TickInput { thrust: true });
        }
        state
    }

    fn xs(vertices: &[Vertex]) -> (f32, f32) {
        vertices.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            (lo.min(v.position[0]), hi.max(v.position[0]))
        })
    }

    #[test]
    fn test_layers_drawn_back_to_front() {
        let state = busy_state();
        let scene = SceneBuilder::new(1).build(&state, &SceneOptions::default());

        assert_eq!(scene.background.start, 0);
        assert_eq!(scene.background.end, scene.obstacles.start);
        assert_eq!(scene.obstacles.end, scene.craft.start);
        assert_eq!(scene.craft.end, scene.vertices.len());
        assert!(!scene.background.is_empty());
        assert!(!scene.obstacles.is_empty());
        assert!(!scene.craft.is_empty());
    }

    #[test]
    fn test_starfield_can_be_hidden() {
        let state = busy_state();
        let options = SceneOptions {
            starfield: false,
            ..SceneOptions::default()
        };
        let scene = SceneBuilder::new(1).build(&state, &options);
        assert!(scene.background.is_empty());
        assert!(!scene.obstacles.is_empty());
    }

    #[test]
    fn test_hull_matches_collision_box() {
        let mut state = GameState::new(1);
        state.craft.thrusting = false;
        let scene = SceneBuilder::new(1).build(&state, &SceneOptions::default());
        let (lo, hi) = xs(&scene.vertices[scene.craft.clone()]);
        let bounds = state.craft.bounds();
        assert_eq!(lo, bounds.left);
        assert_eq!(hi, bounds.right);
    }

    #[test]
    fn test_flame_only_while_thrusting() {
        let mut state = GameState::new(1);
        let mut builder = SceneBuilder::new(1);
        let idle = builder.build(&state, &SceneOptions::default());

        state.craft.thrusting = true;
        let thrusting = builder.build(&state, &SceneOptions::default());
        assert_eq!(thrusting.craft.len(), idle.craft.len() + 3);

        // Flame reaches past the tail
        let (lo, _) = xs(&thrusting.vertices[thrusting.craft.clone()]);
        assert!(lo < state.craft.bounds().left - 5.0);
    }

    #[test]
    fn test_steady_flame_without_flicker() {
        let mut state = GameState::new(1);
        state.craft.thrusting = true;
        let options = SceneOptions {
            flame_flicker: false,
            ..SceneOptions::default()
        };
        let mut builder = SceneBuilder::new(1);
        let a = builder.build(&state, &options);
        let b = builder.build(&state, &options);
        assert_eq!(a.vertices, b.vertices);
    }

    #[test]
    fn test_clip_space_corners() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut v = vec![
            Vertex::new(0.0, 0.0, colors::STAR),
            Vertex::new(800.0, 600.0, colors::STAR),
            Vertex::new(400.0, 300.0, colors::STAR),
        ];
        to_clip_space(&mut v, viewport);
        assert_eq!(v[0].position, [-1.0, 1.0]);
        assert_eq!(v[1].position, [1.0, -1.0]);
        assert_eq!(v[2].position, [0.0, 0.0]);
    }
}
