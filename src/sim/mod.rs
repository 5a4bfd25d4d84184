//! Deterministic simulation module
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (balls in creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod shockwave;
pub mod state;
pub mod tick;

pub use collision::{
    PointerHit, WallBounce, bounce_walls, near_wall, regulate_speed, repel_from_pointer,
    resolve_pair,
};
pub use state::{Ball, BallId, Impact, Particle, Scene, Shockwave};
pub use tick::{FrameInput, tick};
