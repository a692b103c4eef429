/*
 * Follower Module
 *
 * Soft glows that trail the pointer. Each frame a follower closes a fixed
 * fraction of the gap to the pointer, so a smaller smoothing factor lags
 * further behind.
 */

use nannou::prelude::*;

use crate::config::{FollowerConfig, RgbaColor};
use crate::surface::Surface;

// Concentric discs used to approximate the radial gradient
const GLOW_LAYERS: usize = 12;

#[derive(Debug, Clone)]
pub struct Follower {
    pub position: Vec2,
    pub config: FollowerConfig,
}

impl Follower {
    pub fn new(config: FollowerConfig) -> Self {
        Self {
            position: Vec2::ZERO,
            config,
        }
    }

    pub fn step(&mut self, target: Vec2) {
        self.position += (target - self.position) * self.config.smoothing;
    }

    /// Gradient colour at `offset` (0 centre, 1 rim), linearly interpolated
    /// between stops. Past the last stop the glow is transparent.
    pub fn sample(&self, offset: f32) -> RgbaColor {
        let stops = &self.config.gradient;
        let transparent = RgbaColor::new(0, 0, 0, 0.0);

        let Some(first) = stops.first() else {
            return transparent;
        };
        if offset <= first.offset {
            return first.color;
        }

        for pair in stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if offset <= to.offset {
                let span = (to.offset - from.offset).max(f32::EPSILON);
                let t = (offset - from.offset) / span;
                let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
                return RgbaColor::new(
                    mix(from.color.r, to.color.r),
                    mix(from.color.g, to.color.g),
                    mix(from.color.b, to.color.b),
                    from.color.a + (to.color.a - from.color.a) * t,
                );
            }
        }

        transparent
    }

    // Outermost layer first so the bright core ends up on top
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for layer in (0..GLOW_LAYERS).rev() {
            let offset = (layer + 1) as f32 / GLOW_LAYERS as f32;
            let color = self.sample(offset);
            if color.a <= 0.0 {
                continue;
            }

            let color = color.fade(self.config.opacity / GLOW_LAYERS as f32);
            surface.fill_circle(self.position, self.config.radius * offset, color);
        }
    }
}
