//! Impulse Flow - bouncing ball overlay with sparks, links and shockwaves
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (balls, particles, shockwaves)
//! - `renderer`: Draw sequence over a pluggable `Surface`
//! - `platform`: Browser overlay canvas and Canvas 2D surface
//! - `tuning`: Data-driven effect parameters
//! - `pacer`: Fixed-rate stepping from animation-frame timestamps

pub mod pacer;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use pacer::FramePacer;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Effect configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation step (one display frame at 60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Number of balls on screen
    pub const BALL_COUNT: usize = 10;
    /// Speed every ball always keeps (pixels/frame)
    pub const MIN_SPEED: f32 = 5.0;
    /// Speed after a ball-ball or cursor hit
    pub const MAX_BOOST_SPEED: f32 = 15.0;
    /// Cursor push speed when the ball is pinned near a wall
    pub const EMERGENCY_SPEED: f32 = 25.0;
    /// Per-frame velocity decay above the minimum speed
    pub const FRICTION: f32 = 0.97;
    /// Multiplier on summed radii for collision distance
    pub const HITBOX_SCALE: f32 = 1.3;

    pub const BALL_SIZE_MIN: f32 = 8.0;
    pub const BALL_SIZE_MAX: f32 = 25.0;

    /// Ball colour (hue is random)
    pub const BALL_SATURATION: f32 = 80.0;
    pub const BALL_LIGHTNESS: f32 = 60.0;
    pub const BALL_ALPHA: f32 = 0.8;

    /// Effect timer set by a collision (frames); drives the radius bump
    pub const EFFECT_FRAMES: u32 = 10;
    pub const EMERGENCY_EFFECT_FRAMES: u32 = 20;

    /// Opacity of the fade-out fill (smaller = longer trails)
    pub const TRAIL_ALPHA: f32 = 0.2;

    /// Sparks per collision (doubled for emergency hits)
    pub const PARTICLE_COUNT: usize = 8;
    /// Per-frame alpha multiplier
    pub const PARTICLE_DECAY: f32 = 0.94;
    /// Particles below this alpha are dropped
    pub const PARTICLE_MIN_ALPHA: f32 = 0.01;
    pub const PARTICLE_RADIUS_MIN: f32 = 1.0;
    pub const PARTICLE_RADIUS_MAX: f32 = 3.0;
    pub const PARTICLE_SPEED_MIN: f32 = 2.0;
    pub const PARTICLE_SPEED_MAX: f32 = 10.0;

    /// Max distance at which two balls are linked
    pub const LINK_DISTANCE: f32 = 180.0;
    pub const LINK_WIDTH: f32 = 1.0;
    /// Link opacity at zero distance
    pub const LINK_ALPHA: f32 = 0.4;

    /// Cursor hit radius
    pub const MOUSE_RADIUS: f32 = 50.0;
    /// Cursor position before the first pointer event (off-screen)
    pub const MOUSE_START: (f32, f32) = (-1000.0, -1000.0);
    /// Distance from an edge that escalates a cursor push to emergency speed
    pub const WALL_MARGIN: f32 = 60.0;
    /// Extra separation applied on emergency pushes
    pub const EMERGENCY_CLEARANCE: f32 = 20.0;

    pub const SHOCKWAVE_MAX_RADIUS: f32 = 250.0;
    /// Radius growth per frame
    pub const SHOCKWAVE_SPEED: f32 = 12.0;
    /// Speed given to a ball hit by the ring
    pub const SHOCKWAVE_FORCE: f32 = 35.0;
    /// Half-width of the ring's hit band
    pub const SHOCKWAVE_THICKNESS: f32 = 20.0;
    /// Alpha lost per frame
    pub const SHOCKWAVE_FADE: f32 = 0.02;
    pub const SHOCKWAVE_LINE_WIDTH: f32 = 4.0;
}

/// Unit vector pointing along `delta`.
///
/// A zero delta has no heading; it resolves to +X, the direction `atan2(0, 0)`
/// yields, so coincident points still separate.
#[inline]
pub fn outward_normal(delta: Vec2) -> Vec2 {
    delta.try_normalize().unwrap_or(Vec2::X)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
