//! Obstacle stream
//!
//! Obstacles always come in top/bottom pairs that share one gap. Each member
//! carries its pair id and whether it is the pair's primary (top) member, so
//! scoring never depends on where an obstacle sits in the live list.

use glam::Vec2;
use rand::Rng;

use super::collision::{Aabb, collides};
use super::state::Viewport;
use crate::tuning::Tuning;

/// One half of an obstacle pair
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub pair_id: u32,
    /// True for the top member; only the primary scores when passed
    pub primary: bool,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Set once the craft's nose has cleared this obstacle's trailing edge
    pub passed: bool,
}

impl Obstacle {
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_min_size(self.pos, self.size)
    }

    /// Fully past the left edge of the viewport
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Outcome of a single spawn, useful for checking pair geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnedPair {
    pub pair_id: u32,
    pub top_height: f32,
    pub gap: f32,
    pub bottom_height: f32,
}

/// Live obstacles, oldest first
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    next_pair_id: u32,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Spawn a pair if `frame_index` lands on the spawn cadence
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        frame_index: u64,
        rng: &mut R,
        tuning: &Tuning,
        viewport: Viewport,
    ) -> Option<SpawnedPair> {
        let interval = tuning.spawn_interval.max(1);
        if frame_index % interval != 0 {
            return None;
        }
        Some(self.spawn_pair(rng, tuning, viewport))
    }

    /// Push a new pair at the right edge of the viewport
    ///
    /// The gap is drawn from `[min_gap, max_gap)` and placed so that at least
    /// `obstacle_margin` pixels of obstacle remain above and below it.
    pub fn spawn_pair<R: Rng>(
        &mut self,
        rng: &mut R,
        tuning: &Tuning,
        viewport: Viewport,
    ) -> SpawnedPair {
        let gap = tuning.min_gap + rng.random::<f32>() * (tuning.max_gap - tuning.min_gap);
        let free = viewport.height - gap - 2.0 * tuning.obstacle_margin;
        let top_height = rng.random::<f32>() * free + tuning.obstacle_margin;
        let bottom_y = top_height + gap;
        let bottom_height = viewport.height - bottom_y;

        let pair_id = self.next_pair_id;
        self.next_pair_id = self.next_pair_id.wrapping_add(1);

        let width = tuning.obstacle_width;
        self.obstacles.push(Obstacle {
            pair_id,
            primary: true,
            pos: Vec2::new(viewport.width, 0.0),
            size: Vec2::new(width, top_height),
            passed: false,
        });
        self.obstacles.push(Obstacle {
            pair_id,
            primary: false,
            pos: Vec2::new(viewport.width, bottom_y),
            size: Vec2::new(width, bottom_height),
            passed: false,
        });

        log::debug!("Spawned pair {} (gap {:.0} at y {:.0})", pair_id, gap, top_height);

        SpawnedPair {
            pair_id,
            top_height,
            gap,
            bottom_height,
        }
    }

    /// Scroll every obstacle left by `speed`
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= speed;
        }
    }

    /// Drop obstacles that have fully left the viewport, keeping order
    pub fn retire_offscreen(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_offscreen());
        before - self.obstacles.len()
    }

    /// Mark obstacles whose trailing edge is behind `nose_x`
    ///
    /// Returns how many pairs were newly passed. Each obstacle is marked at
    /// most once and only primaries count.
    pub fn record_passes(&mut self, nose_x: f32) -> u32 {
        let mut pairs = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.passed && obstacle.right() < nose_x {
                obstacle.passed = true;
                if obstacle.primary {
                    pairs += 1;
                }
            }
        }
        pairs
    }

    /// First live obstacle whose box overlaps `bounds`
    pub fn first_hit(&self, bounds: &Aabb) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|o| collides(bounds, &o.bounds()))
    }

    /// Top member of the nearest pair whose trailing edge is at or beyond `x`
    pub fn next_ahead(&self, x: f32) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.primary && o.right() >= x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
    }

    /// Open span `(top, bottom)` of a pair's gap
    pub fn gap_of(&self, pair_id: u32) -> Option<(f32, f32)> {
        let mut top = None;
        let mut bottom = None;
        for o in self.obstacles.iter().filter(|o| o.pair_id == pair_id) {
            if o.primary {
                top = Some(o.pos.y + o.size.y);
            } else {
                bottom = Some(o.pos.y);
            }
        }
        Some((top?, bottom?))
    }
}
