/*
 * Input Module
 *
 * This module handles window events for the particle field:
 * - Resizing regenerates the field for the new window size
 * - Cursor movement updates the pointer the particles are drawn to
 * - Keyboard shortcuts for theme, debug overlay, pause and quit
 */

use nannou::prelude::*;

use crate::app::{self, Model};
use crate::field::Viewport;

// Window resized event handler
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.field.on_resize(Viewport::new(size.x, size.y));
}

// Mouse moved event handler; nannou reports centred y-up coordinates
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    let Some(window) = app.window(model.window_id) else {
        return;
    };
    let rect = window.rect();
    model.field.on_pointer_move(pos.x - rect.left(), rect.top() - pos.y);
}

// Key pressed event handler
pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    // Typing into a panel widget shouldn't trigger shortcuts
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        Key::T => app::toggle_theme(app, model),
        Key::D => model.debug_info.show = !model.debug_info.show,
        Key::Space => app::toggle_pause(app, model),
        Key::Escape => app.quit(),
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
