/*
 * Particle Field - Module Definitions
 *
 * A full-window field of drifting geometric particles that are drawn toward
 * the pointer and joined by faint lines when close together. The simulator
 * core (field, particle, shape, follower) draws through the Surface trait;
 * the remaining modules host it in a nannou window.
 */

// Re-export key components for easier access
pub use config::{ConfigError, FieldConfig, FollowerConfig, RgbaColor};
pub use field::{ParticleField, Viewport};
pub use host::{FrameHost, Subscription, SubscriptionKind};
pub use particle::Particle;
pub use shape::Shape;
pub use surface::{DrawCall, RecordingSurface, Surface};
pub use theme::{JsonFileStore, KeyValueStore, MemoryStore, StoreError, Theme, ThemeState};

// Simulation core
pub mod config;
pub mod field;
pub mod follower;
pub mod host;
pub mod particle;
pub mod shape;
pub mod surface;
pub mod theme;

// Desktop host
pub mod app;
pub mod debug;
pub mod input;
pub mod renderer;
pub mod ui;
