/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct shown by the overlay and the
 * control panel: frame timing, particle and connection counts, and how many
 * host subscriptions are live (zero while the field is paused).
 */

use std::time::Duration;

use crate::field::ParticleField;
use crate::host::FrameHost;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub show: bool,
    pub fps: f32,
    pub frame_time: Duration,
    pub particles: usize,
    pub connections: usize,
    pub frames: u64,
    pub live_subscriptions: usize,
    pub running: bool,
}

impl DebugInfo {
    pub fn record(&mut self, field: &ParticleField, host: &FrameHost) {
        let stats = field.stats();
        self.particles = field.particles().len();
        self.connections = stats.connections;
        self.frames = stats.frames;
        self.live_subscriptions = host.live_total();
        self.running = field.is_running();
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Particles: {}", self.particles),
            format!("Connections: {}", self.connections),
            format!("Frames: {}", self.frames),
            format!(
                "Subscriptions: {}{}",
                self.live_subscriptions,
                if self.running { "" } else { " (paused)" }
            ),
        ]
    }
}
