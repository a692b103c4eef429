/*
 * Application Module
 *
 * This module defines the nannou model for the desktop particle field and
 * wires the window to the simulator:
 * - the window's resize and cursor events feed the field
 * - update advances the field once per frame into a retained Draw
 * - view presents that Draw, then the debug overlay and the egui panel
 *
 * Pausing unmounts the field; the retained Draw keeps showing the last frame.
 */

use nannou::prelude::*;
use nannou::window::Id as WindowId;
use nannou_egui::Egui;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::config::FieldConfig;
use crate::debug::DebugInfo;
use crate::field::{ParticleField, Viewport};
use crate::host::FrameHost;
use crate::input;
use crate::renderer::{self, NannouSurface};
use crate::theme::{JsonFileStore, ThemeState};
use crate::ui;

const FALLBACK_WINDOW_SIZE: (u32, u32) = (1280, 800);

// Everything the binary decides before the event loop starts
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub config: FieldConfig,
    pub theme_file: PathBuf,
}

// nannou's model constructor is a plain fn, so launch options are parked here
static LAUNCH: OnceLock<LaunchOptions> = OnceLock::new();

/// Open the window and run the event loop. Does not return.
pub fn launch(options: LaunchOptions) {
    if LAUNCH.set(options).is_err() {
        log::warn!("Launch options were already set; keeping the first ones");
    }
    nannou::app(model).update(update).run();
}

// Main model for the application
pub struct Model {
    pub field: ParticleField,
    pub host: FrameHost,
    pub theme: ThemeState<JsonFileStore>,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub window_id: WindowId,
    // Retained between frames so a paused field keeps its last picture
    pub draw: Draw,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let options = LAUNCH.get().cloned().unwrap_or_else(|| LaunchOptions {
        config: FieldConfig::default(),
        theme_file: PathBuf::from("theme.json"),
    });

    // 80% of the primary monitor, like a browser window that isn't maximised
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            ((size.width as f32 * 0.8) as u32, (size.height as f32 * 0.8) as u32)
        })
        .unwrap_or(FALLBACK_WINDOW_SIZE);

    let window_id = app
        .new_window()
        .title("Particle Field")
        .size(window_width, window_height)
        .view(renderer::view)
        .resized(input::resized)
        .mouse_moved(input::mouse_moved)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to create the main window");

    let window = app.window(window_id).expect("main window vanished after creation");
    let egui = Egui::from_window(&window);

    let theme = ThemeState::load(JsonFileStore::new(options.theme_file));
    log::info!("Starting with {:?} theme", theme.theme());

    let host = FrameHost::new();
    let mut field = ParticleField::new(options.config);
    field.mount(&host, window_viewport(app, window_id));

    Model {
        field,
        host,
        theme,
        egui,
        debug_info: DebugInfo::default(),
        window_id,
        draw: Draw::new(),
    }
}

/// The drawing surface size, or `None` while the window is unavailable.
pub fn window_viewport(app: &App, window_id: WindowId) -> Option<Viewport> {
    app.window(window_id).map(|window| {
        let rect = window.rect();
        Viewport::new(rect.w(), rect.h())
    })
}

// Pausing releases the frame loop and listeners; resuming re-mounts with a fresh field
pub fn toggle_pause(app: &App, model: &mut Model) {
    if model.field.is_running() {
        model.field.unmount();
    } else {
        model.field.mount(&model.host, window_viewport(app, model.window_id));
    }
}

pub fn toggle_theme(app: &App, model: &mut Model) {
    match model.theme.toggle() {
        Ok(theme) => log::info!("Switched to {:?} theme", theme),
        Err(err) => log::warn!("Theme changed but could not be saved: {}", err),
    }

    // A running field picks up the new background next frame; a paused one is repainted now
    if !model.field.is_running() {
        if let Some(window) = app.window(model.window_id) {
            model.draw.reset();
            let mut surface =
                NannouSurface::new(&model.draw, window.rect(), model.theme.theme().background());
            model.field.redraw(&mut surface);
        }
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    model.egui.set_elapsed_time(update.since_start);
    let actions = ui::update_ui(
        &mut model.egui,
        &mut model.field,
        model.theme.theme(),
        &mut model.debug_info,
    );

    if actions.toggle_theme {
        toggle_theme(app, model);
    }
    if actions.toggle_pause {
        toggle_pause(app, model);
    }
    if actions.regenerate {
        model.field.regenerate();
    }

    // Only a running field redraws; otherwise the retained Draw is presented as is
    if model.field.is_running() {
        if let Some(window) = app.window(model.window_id) {
            model.draw.reset();
            let mut surface =
                NannouSurface::new(&model.draw, window.rect(), model.theme.theme().background());
            model.field.frame(&mut surface);
        }
    }

    model.debug_info.record(&model.field, &model.host);
}
