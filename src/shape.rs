/*
 * Shape Module
 *
 * Geometry for the three particle shapes. Outlines are produced already
 * rotated and translated, so the surface only needs to stroke the points.
 */

use nannou::prelude::*;
use std::f32::consts::PI;

// sin(60°), the half-width factor of an equilateral triangle
const TRIANGLE_HALF_WIDTH: f32 = 0.866;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Triangle,
    Hexagon,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Circle, Shape::Triangle, Shape::Hexagon];
}

// Rotate a local-space point and move it to `center`
#[inline]
fn place(local: Vec2, center: Vec2, rotation: f32) -> Vec2 {
    let (sin, cos) = rotation.sin_cos();
    center + vec2(local.x * cos - local.y * sin, local.x * sin + local.y * cos)
}

/// Triangle pointing up (negative y) before rotation.
pub fn triangle(center: Vec2, size: f32, rotation: f32) -> [Vec2; 3] {
    [
        vec2(0.0, -size),
        vec2(-size * TRIANGLE_HALF_WIDTH, size * 0.5),
        vec2(size * TRIANGLE_HALF_WIDTH, size * 0.5),
    ]
    .map(|local| place(local, center, rotation))
}

/// Hexagon with its first vertex on the positive x axis before rotation.
pub fn hexagon(center: Vec2, size: f32, rotation: f32) -> [Vec2; 6] {
    let mut points = [Vec2::ZERO; 6];
    for (i, point) in points.iter_mut().enumerate() {
        let angle = (PI / 3.0) * i as f32;
        *point = place(vec2(size * angle.cos(), size * angle.sin()), center, rotation);
    }
    points
}
