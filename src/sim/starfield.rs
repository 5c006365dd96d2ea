//! Parallax star field
//!
//! Purely cosmetic. Layers scroll at their own speed and stars that leave the
//! left edge re-enter on the right at a fresh height. Nothing in gameplay
//! reads this state.

use glam::Vec2;
use rand::Rng;

use super::state::Viewport;
use crate::consts::{STAR_MAX_OPACITY, STAR_MAX_RADIUS, STAR_MIN_OPACITY, STAR_MIN_RADIUS};
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StarLayer {
    /// Pixels per tick
    pub speed: f32,
    pub stars: Vec<Star>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Starfield {
    /// Back to front
    pub layers: Vec<StarLayer>,
}

impl Starfield {
    /// Scatter stars uniformly over the viewport
    ///
    /// `density_scale` multiplies each layer's star count (quality presets).
    pub fn generate<R: Rng>(
        rng: &mut R,
        tuning: &Tuning,
        viewport: Viewport,
        density_scale: f32,
    ) -> Self {
        let layers = tuning
            .star_layers()
            .map(|(speed, density)| {
                let count = (density as f32 * density_scale).round() as usize;
                let stars = (0..count)
                    .map(|_| Star {
                        pos: Vec2::new(
                            rng.random::<f32>() * viewport.width,
                            rng.random::<f32>() * viewport.height,
                        ),
                        radius: rng.random_range(STAR_MIN_RADIUS..STAR_MAX_RADIUS),
                        opacity: rng.random_range(STAR_MIN_OPACITY..STAR_MAX_OPACITY),
                    })
                    .collect();
                StarLayer { speed, stars }
            })
            .collect();
        Self { layers }
    }

    pub fn star_count(&self) -> usize {
        self.layers.iter().map(|l| l.stars.len()).sum()
    }

    /// Scroll one tick
    pub fn step<R: Rng>(&mut self, rng: &mut R, viewport: Viewport) {
        for layer in &mut self.layers {
            for star in &mut layer.stars {
                star.pos.x -= layer.speed;
                if star.pos.x < 0.0 {
                    star.pos.x = viewport.width;
                    star.pos.y = rng.random::<f32>() * viewport.height;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_generate_layer_densities() {
        let mut rng = Pcg32::seed_from_u64(11);
        let field = Starfield::generate(&mut rng, &Tuning::default(), VIEW, 1.0);
        let counts: Vec<usize> = field.layers.iter().map(|l| l.stars.len()).collect();
        assert_eq!(counts, vec![50, 40, 30, 20]);
        for star in field.layers.iter().flat_map(|l| &l.stars) {
            assert!(star.pos.x >= 0.0 && star.pos.x < VIEW.width);
            assert!(star.pos.y >= 0.0 && star.pos.y < VIEW.height);
            assert!(star.radius >= STAR_MIN_RADIUS && star.radius < STAR_MAX_RADIUS);
            assert!(star.opacity >= STAR_MIN_OPACITY && star.opacity < STAR_MAX_OPACITY);
        }
    }

    #[test]
    fn test_density_scale() {
        let mut rng = Pcg32::seed_from_u64(12);
        let field = Starfield::generate(&mut rng, &Tuning::default(), VIEW, 0.5);
        assert_eq!(field.star_count(), 70);
    }

    #[test]
    fn test_step_scrolls_by_layer_speed() {
        let mut rng = Pcg32::seed_from_u64(13);
        let mut field = Starfield::generate(&mut rng, &Tuning::default(), VIEW, 1.0);
        for layer in &mut field.layers {
            for star in &mut layer.stars {
                star.pos.x = 400.0;
            }
        }
        field.step(&mut rng, VIEW);
        for layer in &field.layers {
            for star in &layer.stars {
                assert!((star.pos.x - (400.0 - layer.speed)).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_star_wraps_to_right_edge() {
        let mut rng = Pcg32::seed_from_u64(14);
        let mut field = Starfield {
            layers: vec![StarLayer {
                speed: 2.0,
                stars: vec![Star {
                    pos: Vec2::new(1.0, 10.0),
                    radius: 1.0,
                    opacity: 0.5,
                }],
            }],
        };
        field.step(&mut rng, VIEW);
        let star = &field.layers[0].stars[0];
        assert_eq!(star.pos.x, VIEW.width);
        assert!(star.pos.y >= 0.0 && star.pos.y < VIEW.height);
    }

    #[test]
    fn test_stars_stay_within_viewport() {
        let mut rng = Pcg32::seed_from_u64(15);
        let mut field = Starfield::generate(&mut rng, &Tuning::default(), VIEW, 1.0);
        for _ in 0..2_000 {
            field.step(&mut rng, VIEW);
        }
        for star in field.layers.iter().flat_map(|l| &l.stars) {
            assert!(star.pos.x >= 0.0 && star.pos.x <= VIEW.width);
            assert!(star.pos.y >= 0.0 && star.pos.y < VIEW.height);
        }
    }
}
