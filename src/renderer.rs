/*
 * Renderer Module
 *
 * This module presents the field on screen. NannouSurface adapts nannou's
 * Draw to the Surface trait, converting from canvas coordinates (top-left
 * origin, y down) to nannou's centred, y-up window coordinates.
 */

use nannou::color::{rgba, Rgba};
use nannou::prelude::*;

use crate::app::Model;
use crate::config::RgbaColor;
use crate::surface::Surface;
use crate::ui;

fn to_rgba(color: RgbaColor) -> Rgba {
    rgba(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        color.a.clamp(0.0, 1.0),
    )
}

pub struct NannouSurface<'a> {
    draw: &'a Draw,
    rect: Rect,
    background: RgbaColor,
}

impl<'a> NannouSurface<'a> {
    pub fn new(draw: &'a Draw, rect: Rect, background: RgbaColor) -> Self {
        Self { draw, rect, background }
    }

    #[inline]
    fn to_screen(&self, point: Vec2) -> Point2 {
        pt2(self.rect.left() + point.x, self.rect.top() - point.y)
    }
}

impl Surface for NannouSurface<'_> {
    fn clear(&mut self) {
        self.draw.background().color(to_rgba(self.background));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: RgbaColor) {
        self.draw
            .ellipse()
            .xy(self.to_screen(center))
            .radius(radius)
            .color(to_rgba(color));
    }

    fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: RgbaColor) {
        let screen: Vec<Point2> = points.iter().map(|&point| self.to_screen(point)).collect();
        self.draw
            .polyline()
            .weight(width)
            .color(to_rgba(color))
            .points_closed(screen);
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: RgbaColor) {
        self.draw
            .line()
            .start(self.to_screen(from))
            .end(self.to_screen(to))
            .weight(width)
            .color(to_rgba(color));
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // The field's retained picture, redrawn by update only while it runs
    if let Err(err) = model.draw.to_frame(app, &frame) {
        log::error!("Failed to render particle field: {:?}", err);
    }

    if model.debug_info.show {
        let draw = app.draw();
        ui::draw_debug_info(&draw, &model.debug_info, app.window_rect());
        if let Err(err) = draw.to_frame(app, &frame) {
            log::error!("Failed to render debug overlay: {:?}", err);
        }
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::error!("Failed to render control panel: {:?}", err);
    }
}
