/*
 * Field Module
 *
 * ParticleField is the simulator: it owns the particles, the pointer and the
 * followers, and advances and draws all of them once per display frame.
 *
 * It has two modes. Mounted, it holds a frame-loop subscription plus resize
 * and pointer listeners from the host and reacts to all three. Unmounted, it
 * holds nothing and every entry point is a no-op, so a frame tick that
 * arrives after unmount neither mutates particles nor touches the surface.
 */

use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::FieldConfig;
use crate::follower::Follower;
use crate::host::{FrameHost, Subscription, SubscriptionKind};
use crate::particle::{self, Particle};
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    // Negative or NaN dimensions collapse to an empty viewport
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    // Widened so large displays don't lose precision in the count formula
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
}

// Counters for the debug overlay
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    pub frames: u64,
    pub connections: usize,
}

// Held only while mounted; dropping it releases everything it subscribed to
struct Mounted {
    _frame_loop: Subscription,
    _on_resize: Subscription,
    _on_pointer: Subscription,
}

pub struct ParticleField {
    config: FieldConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    followers: Vec<Follower>,
    pub followers_visible: bool,
    pointer: Vec2,
    rng: StdRng,
    mounted: Option<Mounted>,
    stats: FrameStats,
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let followers = config.followers.iter().cloned().map(Follower::new).collect();

        Self {
            config,
            viewport: Viewport::default(),
            particles: Vec::new(),
            followers,
            followers_visible: true,
            pointer: Vec2::ZERO,
            rng,
            mounted: None,
            stats: FrameStats::default(),
        }
    }

    /// Start the field on a surface of the given size. When the surface is
    /// not available yet (`None`) nothing happens and `false` is returned;
    /// the caller mounts again once it exists.
    pub fn mount(&mut self, host: &FrameHost, viewport: Option<Viewport>) -> bool {
        let Some(viewport) = viewport else {
            log::debug!("Drawing surface unavailable, particle field not started");
            return false;
        };

        // Release any previous subscriptions before taking new ones
        self.mounted = None;

        self.viewport = viewport;
        self.regenerate_particles();
        self.mounted = Some(Mounted {
            _frame_loop: host.subscribe(SubscriptionKind::FrameLoop),
            _on_resize: host.subscribe(SubscriptionKind::Resize),
            _on_pointer: host.subscribe(SubscriptionKind::PointerMove),
        });

        log::info!(
            "Particle field mounted at {}x{} with {} particles",
            viewport.width,
            viewport.height,
            self.particles.len()
        );
        true
    }

    pub fn unmount(&mut self) {
        if self.mounted.take().is_some() {
            log::info!("Particle field unmounted after {} frames", self.stats.frames);
        }
    }

    pub fn is_running(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        if !self.is_running() {
            return;
        }

        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.regenerate_particles();
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if self.is_running() {
            self.pointer = vec2(x, y);
        }
    }

    /// Discard every particle and spawn a fresh set sized to the viewport.
    pub fn regenerate(&mut self) {
        if self.is_running() {
            self.regenerate_particles();
        }
    }

    fn regenerate_particles(&mut self) {
        let count = particle::particle_count(self.viewport, &self.config);
        let viewport = self.viewport;
        let palette = &self.config.palette;
        let rng = &mut self.rng;

        self.particles = (0..count)
            .map(|_| Particle::spawn(rng, viewport, palette))
            .collect();
        log::debug!("Generated {} particles", count);
    }

    /// Advance and draw one display frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if !self.is_running() {
            return;
        }

        surface.clear();

        let config = &self.config;
        let pointer = self.pointer;
        let viewport = self.viewport;

        // Update and draw particles in array order
        for particle in &mut self.particles {
            particle.attract(pointer, config);
            particle.advance(config.damping);
            particle.wrap_edges(viewport, config.wrap_margin);
            particle.draw(surface, config.stroke_width);
        }

        self.stats.connections = draw_connections(surface, &self.particles, config);

        // Hidden followers keep trailing so they reappear where the pointer is
        for follower in &mut self.followers {
            follower.step(pointer);
            if self.followers_visible {
                follower.draw(surface);
            }
        }

        self.stats.frames += 1;
        log::trace!(
            "Frame {}: {} particles, {} connections",
            self.stats.frames,
            self.particles.len(),
            self.stats.connections
        );
    }

    /// Draw the current state again without advancing it. Works while
    /// stopped, so a paused field can be repainted after a theme change.
    pub fn redraw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        for particle in &self.particles {
            particle.draw(surface, self.config.stroke_width);
        }
        draw_connections(surface, &self.particles, &self.config);
        if self.followers_visible {
            for follower in &self.followers {
                follower.draw(surface);
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn followers(&self) -> &[Follower] {
        &self.followers
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    // Physics tuning from the control panel; count and palette apply on the next regeneration
    pub fn config_mut(&mut self) -> &mut FieldConfig {
        &mut self.config
    }
}

// Join every unordered pair closer than the connection distance
fn draw_connections<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    config: &FieldConfig,
) -> usize {
    let mut drawn = 0;

    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let distance = a.position.distance(b.position);

            if let Some(alpha) =
                particle::connection_alpha(distance, config.connection_distance, config.connection_opacity)
            {
                let color = config.connection_color.with_alpha(alpha);
                surface.line(a.position, b.position, config.connection_width, color);
                drawn += 1;
            }
        }
    }

    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use crate::surface::{DrawCall, RecordingSurface};

    fn quiet_config(seed: u64) -> FieldConfig {
        FieldConfig {
            followers: Vec::new(),
            seed: Some(seed),
            ..FieldConfig::default()
        }
    }

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle {
            position: vec2(x, y),
            velocity: Vec2::ZERO,
            size: 2.0,
            opacity: 1.0,
            shape: Shape::Circle,
            rotation: 0.0,
            rotation_speed: 0.0,
            color: crate::config::RgbaColor::new(255, 255, 255, 1.0),
        }
    }

    #[test]
    fn test_mount_without_surface_is_noop() {
        let host = FrameHost::new();
        let mut field = ParticleField::new(quiet_config(1));

        assert!(!field.mount(&host, None));
        assert!(!field.is_running());
        assert!(field.particles().is_empty());
        assert_eq!(host.live_total(), 0);

        let mut surface = RecordingSurface::new();
        field.frame(&mut surface);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_mount_sizes_particle_set() {
        let host = FrameHost::new();
        let mut field = ParticleField::new(quiet_config(1));

        assert!(field.mount(&host, Some(Viewport::new(1920.0, 1080.0))));
        assert_eq!(field.particles().len(), 80);
        assert_eq!(host.live(SubscriptionKind::FrameLoop), 1);
        assert_eq!(host.live(SubscriptionKind::Resize), 1);
        assert_eq!(host.live(SubscriptionKind::PointerMove), 1);

        field.on_resize(Viewport::new(600.0, 500.0));
        assert_eq!(field.viewport(), Viewport::new(600.0, 500.0));
        assert_eq!(field.particles().len(), 20);
        assert!(field
            .particles()
            .iter()
            .all(|p| p.position.x < 600.0 && p.position.y < 500.0));
    }

    #[test]
    fn test_remount_does_not_leak_subscriptions() {
        let host = FrameHost::new();
        let mut field = ParticleField::new(quiet_config(3));

        field.mount(&host, Some(Viewport::new(800.0, 600.0)));
        field.mount(&host, Some(Viewport::new(800.0, 600.0)));
        assert_eq!(host.live_total(), 3);

        field.unmount();
        assert_eq!(host.live_total(), 0);
    }

    #[test]
    fn test_unmount_stops_all_drawing_and_mutation() {
        let host = FrameHost::new();
        let mut field = ParticleField::new(quiet_config(5));
        field.mount(&host, Some(Viewport::new(1024.0, 768.0)));

        let mut surface = RecordingSurface::new();
        field.frame(&mut surface);
        assert!(!surface.calls.is_empty());

        field.unmount();
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();

        surface.reset();
        field.on_pointer_move(10.0, 10.0);
        field.on_resize(Viewport::new(300.0, 300.0));
        field.frame(&mut surface);

        assert!(surface.calls.is_empty());
        assert_eq!(host.live_total(), 0);
        assert_eq!(field.pointer(), Vec2::ZERO);
        let after: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_frame_order_clear_shapes_lines() {
        let host = FrameHost::new();
        let mut field = ParticleField::new(quiet_config(9));
        field.mount(&host, Some(Viewport::new(1200.0, 900.0)));

        let mut surface = RecordingSurface::new();
        field.frame(&mut surface);

        assert_eq!(surface.calls[0], DrawCall::Clear);
        let count = field.particles().len();
        assert_eq!(surface.shapes().count(), count);
        assert!(surface.calls[1..=count]
            .iter()
            .all(|call| !matches!(call, DrawCall::Line { .. } | DrawCall::Clear)));
        assert_eq!(surface.lines().count(), field.stats().connections);
    }

    #[test]
    fn test_connections_follow_threshold() {
        let config = quiet_config(0);
        let particles = vec![
            particle_at(0.0, 0.0),
            particle_at(60.0, 0.0),
            particle_at(0.0, 200.0),
            particle_at(119.9, 200.0),
        ];

        let mut surface = RecordingSurface::new();
        let drawn = draw_connections(&mut surface, &particles, &config);

        // (0,1) at 60 and (2,3) at 119.9; every other pair is 120 or more apart
        assert_eq!(drawn, 2);
        match &surface.calls[0] {
            DrawCall::Line { color, width, .. } => {
                assert!((color.a - 0.075).abs() < 1e-6);
                assert_eq!(*width, 0.5);
                assert_eq!((color.r, color.g, color.b), (20, 184, 166));
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn test_positions_stay_within_margin() {
        let host = FrameHost::new();
        let mut field = ParticleField::new(quiet_config(11));
        let viewport = Viewport::new(800.0, 600.0);
        field.mount(&host, Some(viewport));

        let mut surface = RecordingSurface::new();
        for frame in 0..2000 {
            // Sweep the pointer around to keep particles moving
            let t = frame as f32 * 0.05;
            field.on_pointer_move(400.0 + 350.0 * t.cos(), 300.0 + 250.0 * t.sin());
            field.frame(&mut surface);
            surface.reset();

            for particle in field.particles() {
                assert!(particle.position.x >= -20.0 && particle.position.x <= 820.0);
                assert!(particle.position.y >= -20.0 && particle.position.y <= 620.0);
            }
        }
    }

    #[test]
    fn test_velocity_decays_without_pointer() {
        let host = FrameHost::new();
        let mut field = ParticleField::new(quiet_config(13));
        field.mount(&host, Some(Viewport::new(1000.0, 800.0)));
        // Park the pointer far outside the attraction radius of everything
        field.on_pointer_move(-10_000.0, -10_000.0);

        let mut surface = RecordingSurface::new();
        for _ in 0..1000 {
            field.frame(&mut surface);
            surface.reset();
        }

        // 0.99^1000 leaves well under a thousandth of the initial speed
        for particle in field.particles() {
            assert!(particle.velocity.length() < 0.36 * 1e-3);
        }
    }

    #[test]
    fn test_velocity_bounded_under_pointer() {
        let host = FrameHost::new();
        let mut field = ParticleField::new(quiet_config(17));
        field.mount(&host, Some(Viewport::new(800.0, 600.0)));
        field.on_pointer_move(400.0, 300.0);

        let mut surface = RecordingSurface::new();
        let mut fastest: f32 = 0.0;
        for _ in 0..5000 {
            field.frame(&mut surface);
            surface.reset();
            for particle in field.particles() {
                fastest = fastest.max(particle.velocity.length());
            }
        }

        // The impulse never exceeds the strength, so damping caps speed at
        // strength / (1 - damping) plus the initial drift
        assert!(fastest <= 0.02 / 0.01 + 0.36);
    }

    #[test]
    fn test_hidden_followers_keep_trailing() {
        let host = FrameHost::new();
        let mut field = ParticleField::new(FieldConfig {
            seed: Some(21),
            ..FieldConfig::default()
        });
        field.mount(&host, Some(Viewport::new(800.0, 600.0)));
        field.on_pointer_move(400.0, 300.0);

        let mut surface = RecordingSurface::new();
        field.frame(&mut surface);
        let with_followers = surface.calls.len();

        field.followers_visible = false;
        for _ in 0..200 {
            surface.reset();
            field.frame(&mut surface);
        }

        // Hiding only skips the glow; both followers still close in on the pointer
        assert!(surface.calls.len() < with_followers);
        assert!(surface
            .calls
            .iter()
            .all(|call| !matches!(call, DrawCall::Circle { radius, .. } if *radius > 6.0)));
        for follower in field.followers() {
            assert!(follower.position.distance(vec2(400.0, 300.0)) < 1.0);
        }
    }

    #[test]
    fn test_redraw_repaints_without_advancing() {
        let host = FrameHost::new();
        let mut field = ParticleField::new(quiet_config(23));
        field.mount(&host, Some(Viewport::new(800.0, 600.0)));

        let mut surface = RecordingSurface::new();
        field.frame(&mut surface);
        let frame_calls = surface.calls.clone();

        field.unmount();
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();
        let frames = field.stats().frames;

        surface.reset();
        field.redraw(&mut surface);

        assert_eq!(surface.calls, frame_calls);
        let after: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        assert_eq!(field.stats().frames, frames);
    }

    #[test]
    fn test_seeded_fields_match() {
        let host = FrameHost::new();
        let mut a = ParticleField::new(quiet_config(99));
        let mut b = ParticleField::new(quiet_config(99));
        a.mount(&host, Some(Viewport::new(900.0, 700.0)));
        b.mount(&host, Some(Viewport::new(900.0, 700.0)));

        let positions = |field: &ParticleField| -> Vec<Vec2> {
            field.particles().iter().map(|p| p.position).collect()
        };
        assert_eq!(positions(&a), positions(&b));
    }
}
