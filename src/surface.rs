/*
 * Surface Module
 *
 * The drawing surface the field renders onto. Coordinates follow the canvas
 * convention: origin at the top-left corner, y growing downward.
 *
 * The nannou implementation lives in the renderer module; RecordingSurface
 * keeps every call in memory for tests and benchmarks.
 */

use nannou::prelude::*;

use crate::config::RgbaColor;

pub trait Surface {
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: RgbaColor);
    fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: RgbaColor);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: RgbaColor);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Circle { center: Vec2, radius: f32, color: RgbaColor },
    Polygon { points: Vec<Vec2>, width: f32, color: RgbaColor },
    Line { from: Vec2, to: Vec2, width: f32, color: RgbaColor },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(|call| matches!(call, DrawCall::Line { .. }))
    }

    pub fn shapes(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Circle { .. } | DrawCall::Polygon { .. }))
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: RgbaColor) {
        self.calls.push(DrawCall::Circle { center, radius, color });
    }

    fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: RgbaColor) {
        self.calls.push(DrawCall::Polygon { points: points.to_vec(), width, color });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: RgbaColor) {
        self.calls.push(DrawCall::Line { from, to, width, color });
    }
}
