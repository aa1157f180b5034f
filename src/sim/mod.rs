//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped kinematics only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{deflect, player_hits_asteroid, projectile_hits_asteroid};
pub use geometry::{dist_to_segment, distance, point_in_polygon, polygons_overlap};
pub use pool::Pool;
pub use spawn::{AsteroidSpawn, Edge, SpawnTimer, spawn_asteroid};
pub use state::{Asteroid, AsteroidId, ContactPairs, GameState, Player, Projectile};
pub use tick::{TickInput, TickOutcome, advance_frame, tick};
