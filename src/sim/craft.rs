//! The player's craft
//!
//! The craft only moves vertically. Its x coordinate is the nose; the hull
//! extends `width` to the left of it, which is also the collision box.

use glam::Vec2;

use super::collision::Aabb;
use crate::tuning::Tuning;

/// The player-controlled craft
#[derive(Debug, Clone, PartialEq)]
pub struct Craft {
    /// Nose position (x fixed, y is the vertical centre)
    pub pos: Vec2,
    /// Vertical velocity in pixels per tick (positive is down)
    pub vel: f32,
    /// Hull size (width, height)
    pub size: Vec2,
    /// Whether thrust is currently applied
    pub thrusting: bool,
}

impl Craft {
    /// Create a craft resting at the vertical centre of the viewport
    pub fn new(tuning: &Tuning, viewport_height: f32) -> Self {
        Self {
            pos: Vec2::new(tuning.craft_x, viewport_height / 2.0),
            vel: 0.0,
            size: Vec2::new(tuning.craft_width, tuning.craft_height),
            thrusting: false,
        }
    }

    pub fn half_height(&self) -> f32 {
        self.size.y / 2.0
    }

    /// Set or clear the thrust flag
    pub fn apply_thrust(&mut self, active: bool) {
        self.thrusting = active;
    }

    /// Advance one tick: gravity, thrust, velocity clamp, then position clamp
    pub fn step(&mut self, tuning: &Tuning, viewport_height: f32) {
        self.vel += tuning.gravity;
        if self.thrusting {
            self.vel -= tuning.thrust_power;
        }
        let max = tuning.max_vertical_velocity;
        self.vel = self.vel.clamp(-max, max);

        self.pos.y += self.vel;

        // Both bounds stop the craft dead; touching them is not a crash
        let top = self.half_height();
        let bottom = viewport_height - self.half_height();
        if self.pos.y < top {
            self.pos.y = top;
            self.vel = 0.0;
        }
        if self.pos.y > bottom {
            self.pos.y = bottom;
            self.vel = 0.0;
        }
    }

    /// Back to the starting position for a new run
    pub fn reset(&mut self, viewport_height: f32) {
        self.pos.y = viewport_height / 2.0;
        self.vel = 0.0;
        self.thrusting = false;
    }

    /// Collision box: `[x - width, x]` by `[y - h/2, y + h/2]`
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.pos.x - self.size.x,
            self.pos.x,
            self.pos.y - self.half_height(),
            self.pos.y + self.half_height(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const H: f32 = 600.0;

    #[test]
    fn test_gravity_pulls_down() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning, H);
        craft.step(&tuning, H);
        assert!((craft.vel - 0.1).abs() < 1e-6);
        assert!((craft.pos.y - 300.1).abs() < 1e-4);
    }

    #[test]
    fn test_thrust_outweighs_gravity() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning, H);
        craft.apply_thrust(true);
        craft.step(&tuning, H);
        assert!((craft.vel + 0.1).abs() < 1e-6);
        assert!(craft.pos.y < 300.0);
    }

    #[test]
    fn test_apply_thrust_is_idempotent() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning, H);
        craft.apply_thrust(true);
        craft.apply_thrust(true);
        assert!(craft.thrusting);
        assert_eq!(craft.vel, 0.0);
        craft.apply_thrust(false);
        assert!(!craft.thrusting);
    }

    #[test]
    fn test_velocity_is_clamped() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning, 100_000.0);
        for _ in 0..500 {
            craft.step(&tuning, 100_000.0);
        }
        assert_eq!(craft.vel, tuning.max_vertical_velocity);
    }

    #[test]
    fn test_floor_stops_craft() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning, H);
        craft.pos.y = H - craft.half_height() - 1.0;
        craft.vel = 5.0;
        craft.step(&tuning, H);
        assert_eq!(craft.pos.y, H - craft.half_height());
        assert_eq!(craft.vel, 0.0);
    }

    #[test]
    fn test_ceiling_stops_craft() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning, H);
        craft.pos.y = craft.half_height() + 1.0;
        craft.vel = -6.0;
        craft.apply_thrust(true);
        craft.step(&tuning, H);
        assert_eq!(craft.pos.y, craft.half_height());
        assert_eq!(craft.vel, 0.0);
    }

    #[test]
    fn test_reset() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning, H);
        craft.pos.y = 42.0;
        craft.vel = -3.0;
        craft.apply_thrust(true);
        craft.reset(H);
        assert_eq!(craft, Craft::new(&tuning, H));
    }

    #[test]
    fn test_bounds_extend_left_of_nose() {
        let tuning = Tuning::default();
        let craft = Craft::new(&tuning, H);
        let b = craft.bounds();
        assert_eq!(b.right, 100.0);
        assert_eq!(b.left, 40.0);
        assert_eq!(b.top, 280.0);
        assert_eq!(b.bottom, 320.0);
    }

    proptest! {
        #[test]
        fn prop_velocity_and_position_stay_bounded(
            thrust in proptest::collection::vec(any::<bool>(), 1..400)
        ) {
            let tuning = Tuning::default();
            let mut craft = Craft::new(&tuning, H);
            let max = tuning.max_vertical_velocity;
            for t in thrust {
                craft.apply_thrust(t);
                craft.step(&tuning, H);
                prop_assert!(craft.vel.abs() <= max);
                prop_assert!(craft.pos.y >= craft.half_height());
                prop_assert!(craft.pos.y <= H - craft.half_height());
            }
        }
    }
}
