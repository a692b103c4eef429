/*
 * UI Module
 *
 * This module contains the egui control panel for tuning the field at
 * runtime, and the on-canvas debug overlay. Panel buttons are reported back
 * as UiActions so the app applies them outside the egui frame.
 */

use nannou::geom::Rect;
use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::field::ParticleField;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, Default)]
pub struct UiActions {
    pub regenerate: bool,
    pub toggle_theme: bool,
    pub toggle_pause: bool,
}

pub fn update_ui(
    egui: &mut Egui,
    field: &mut ParticleField,
    theme: Theme,
    debug_info: &mut DebugInfo,
) -> UiActions {
    let mut actions = UiActions::default();
    let running = field.is_running();
    let particle_count = field.particles().len();

    let ctx = egui.begin_frame();

    egui::Window::new("Particle Field")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Pointer", |ui| {
                let config = field.config_mut();
                ui.add(egui::Slider::new(&mut config.attraction_radius, 10.0..=400.0).text("Attraction Radius"));
                ui.add(egui::Slider::new(&mut config.attraction_strength, 0.0..=0.1).text("Attraction Strength"));
                ui.add(egui::Slider::new(&mut config.damping, 0.9..=1.0).text("Damping"));
            });

            ui.collapsing("Connections", |ui| {
                let config = field.config_mut();
                ui.add(egui::Slider::new(&mut config.connection_distance, 10.0..=300.0).text("Connection Distance"));
                ui.add(egui::Slider::new(&mut config.connection_opacity, 0.0..=1.0).text("Line Opacity"));
            });

            ui.collapsing("Field", |ui| {
                let config = field.config_mut();
                ui.add(egui::Slider::new(&mut config.max_particles, 0..=400).text("Max Particles"));
                ui.label(format!("Particles: {}", particle_count));
                if ui.button("Regenerate").clicked() {
                    actions.regenerate = true;
                }
            });

            ui.checkbox(&mut field.followers_visible, "Pointer Followers");
            ui.checkbox(&mut debug_info.show, "Show Debug Info");

            ui.horizontal(|ui| {
                let theme_label = match theme {
                    Theme::Dark => "Light Theme",
                    Theme::Light => "Dark Theme",
                };
                if ui.button(theme_label).clicked() {
                    actions.toggle_theme = true;
                }
                if ui.button(if running { "Pause" } else { "Resume" }).clicked() {
                    actions.toggle_pause = true;
                }
            });
        });

    actions
}

const DEBUG_MARGIN: f32 = 20.0;
const DEBUG_LINE_HEIGHT: f32 = 20.0;
const DEBUG_PANEL_WIDTH: f32 = 260.0;

// Panel in the top-right corner, clear of the control panel, with one text box per line inside it
fn debug_panel_layout(window_rect: Rect, line_count: usize) -> (Rect, Vec<Rect>) {
    let panel_height = DEBUG_LINE_HEIGHT * line_count as f32 + DEBUG_MARGIN;
    let panel = Rect::from_x_y_w_h(
        window_rect.right() - DEBUG_PANEL_WIDTH / 2.0,
        window_rect.top() - panel_height / 2.0,
        DEBUG_PANEL_WIDTH,
        panel_height,
    );

    let text_width = DEBUG_PANEL_WIDTH - 2.0 * DEBUG_MARGIN;
    let first_y = panel.top() - DEBUG_MARGIN / 2.0 - DEBUG_LINE_HEIGHT / 2.0;
    let boxes = (0..line_count)
        .map(|i| {
            Rect::from_x_y_w_h(
                panel.x(),
                first_y - i as f32 * DEBUG_LINE_HEIGHT,
                text_width,
                DEBUG_LINE_HEIGHT,
            )
        })
        .collect();

    (panel, boxes)
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: Rect) {
    let lines = debug_info.lines();
    let (panel, boxes) = debug_panel_layout(window_rect, lines.len());

    draw.rect()
        .xy(panel.xy())
        .wh(panel.wh())
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    for (text, text_box) in lines.iter().zip(boxes) {
        draw.text(text)
            .xy(text_box.xy())
            .wh(text_box.wh())
            .left_justify()
            .align_text_middle_y()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
