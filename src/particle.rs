/*
 * Particle Module
 *
 * This module defines the Particle struct and its per-frame behaviour:
 * 1. Attraction: drift toward the pointer while inside the interaction radius
 * 2. Integration: move by velocity, then damp the velocity
 * 3. Wrapping: leave one edge, re-enter from the opposite one
 */

use nannou::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::{FieldConfig, RgbaColor};
use crate::field::Viewport;
use crate::shape::{self, Shape};
use crate::surface::Surface;

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub opacity: f32,
    pub shape: Shape,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub color: RgbaColor,
}

/// Number of particles for a viewport: one per `area_per_particle` square
/// units, capped at `max_particles` to bound the pairwise connection pass.
pub fn particle_count(viewport: Viewport, config: &FieldConfig) -> usize {
    let by_area = (viewport.area() / config.area_per_particle as f64).floor();
    if by_area <= 0.0 {
        return 0;
    }
    (by_area as usize).min(config.max_particles)
}

/// Velocity change applied to a particle at `position` by a pointer at
/// `pointer`. Zero at and beyond `radius`, approaching `strength` as the
/// distance approaches zero. A particle exactly under the pointer has no
/// direction to move in and receives nothing.
pub fn attraction_impulse(position: Vec2, pointer: Vec2, radius: f32, strength: f32) -> Vec2 {
    let offset = pointer - position;
    let distance = offset.length();

    if distance < radius && distance > 0.0 {
        let force = (radius - distance) / radius;
        offset / distance * force * strength
    } else {
        Vec2::ZERO
    }
}

/// Alpha of the line joining two particles `distance` apart, or `None` when
/// they are too far apart to be connected.
pub fn connection_alpha(distance: f32, threshold: f32, max_opacity: f32) -> Option<f32> {
    if distance < threshold {
        Some((1.0 - distance / threshold) * max_opacity)
    } else {
        None
    }
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, palette: &[RgbaColor]) -> Self {
        let fallback = RgbaColor::new(20, 184, 166, 0.6);

        Self {
            position: vec2(
                rng.gen::<f32>() * viewport.width,
                rng.gen::<f32>() * viewport.height,
            ),
            velocity: vec2(rng.gen_range(-0.25..0.25), rng.gen_range(-0.25..0.25)),
            size: rng.gen_range(2.0..6.0),
            opacity: rng.gen_range(0.2..0.7),
            shape: *Shape::ALL.choose(rng).unwrap_or(&Shape::Circle),
            rotation: rng.gen_range(0.0..TAU),
            rotation_speed: rng.gen_range(-0.01..0.01),
            color: palette.choose(rng).copied().unwrap_or(fallback),
        }
    }

    pub fn attract(&mut self, pointer: Vec2, config: &FieldConfig) {
        self.velocity += attraction_impulse(
            self.position,
            pointer,
            config.attraction_radius,
            config.attraction_strength,
        );
    }

    // Integrate position, then apply drag; rotation is unaffected by either
    pub fn advance(&mut self, damping: f32) {
        self.position += self.velocity;
        self.velocity *= damping;
        self.rotation += self.rotation_speed;
    }

    /// Teleport to the opposite edge once more than `margin` outside the
    /// viewport. The perpendicular coordinate is kept.
    pub fn wrap_edges(&mut self, viewport: Viewport, margin: f32) {
        let right = viewport.width + margin;
        let bottom = viewport.height + margin;

        if self.position.x < -margin {
            self.position.x = right;
        }
        if self.position.x > right {
            self.position.x = -margin;
        }
        if self.position.y < -margin {
            self.position.y = bottom;
        }
        if self.position.y > bottom {
            self.position.y = -margin;
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, stroke_width: f32) {
        let color = self.color.fade(self.opacity);

        match self.shape {
            Shape::Circle => surface.fill_circle(self.position, self.size, color),
            Shape::Triangle => {
                let points = shape::triangle(self.position, self.size, self.rotation);
                surface.stroke_polygon(&points, stroke_width, color);
            }
            Shape::Hexagon => {
                let points = shape::hexagon(self.position, self.size, self.rotation);
                surface.stroke_polygon(&points, stroke_width, color);
            }
        }
    }
}
