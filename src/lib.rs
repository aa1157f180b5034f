//! Polyroids - an Asteroids-style arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, game state)
//! - `scoreboard`: Score and in-memory high score
//! - `settings`: Runtime-tunable configuration
//! - `frame`: Shape snapshot handed to the host renderer
//!
//! Rendering, input polling and the window/canvas live in the host. The core
//! is driven by a sampled [`sim::TickInput`] and a millisecond clock, and is
//! sampled once per frame through [`frame::FrameSnapshot`].

pub mod frame;
pub mod scoreboard;
pub mod settings;
pub mod sim;

pub use frame::{FrameSnapshot, Shape};
pub use scoreboard::ScoreBoard;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame period used by the headless driver (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const PLAYER_THRUST: f32 = 0.02;
    /// Speed cap while thrusting (pixels/frame)
    pub const PLAYER_MAX_SPEED: f32 = 2.0;
    /// Velocity fraction lost per frame while coasting
    pub const PLAYER_FRICTION: f32 = 0.01;
    /// Rotation per frame is 0.01 * this (radians)
    pub const ROTATIONAL_SPEED: f32 = 3.0;

    /// Projectiles
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 5.0;

    /// Asteroids
    pub const ASTEROID_VERTICES: usize = 16;
    /// Size per rank (size = rank * this)
    pub const ASTEROID_SIZE_PER_RANK: f32 = 30.0;
    pub const MAX_RANK: u8 = 4;
    pub const ASTEROID_MIN_SPEED: f32 = 0.5;
    pub const ASTEROID_MAX_SPEED: f32 = 2.0;

    /// Asteroid spawner cadence
    pub const SPAWN_INTERVAL_MS: f64 = 2000.0;

    /// Base for the per-kill score formula `(SCORE_BASE - rank) * SCORE_STEP`
    pub const SCORE_BASE: u32 = 5;
    pub const SCORE_STEP: u32 = 25;
}

/// Wrap a coordinate onto `[0, extent)`
#[inline]
pub fn wrap_coord(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Unit vector for a heading angle (radians)
#[inline]
pub fn heading(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_coord() {
        assert_eq!(wrap_coord(810.0, 800.0), 10.0);
        assert_eq!(wrap_coord(-10.0, 800.0), 790.0);
        assert_eq!(wrap_coord(800.0, 800.0), 0.0);
        assert!(wrap_coord(-1e-9, 800.0) < 800.0);
    }

    #[test]
    fn test_heading() {
        let h = heading(std::f32::consts::FRAC_PI_2);
        assert!(h.x.abs() < 1e-6);
        assert!((h.y - 1.0).abs() < 1e-6);
    }
}
