//! Asteroid spawn parameters and the periodic spawner
//!
//! Ambient asteroids enter from a random canvas edge, starting far enough out
//! that the whole jittered outline is off-screen, and drift toward the center.
//! Split children start at the parent's death position with a random drift.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Asteroid, GameState};
use crate::consts::MAX_RANK;
use crate::heading;
use crate::settings::Settings;

/// Canvas edge an ambient asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    /// Uniformly random edge
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Parameters for one asteroid, before its outline is generated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidSpawn {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rank: u8,
}

/// Distance outside the edge that hides a fully jittered outline of `size`
#[inline]
pub fn spawn_buffer(size: f32) -> f32 {
    size + size * (1.0 - (PI / 16.0).cos()).sqrt()
}

/// Spawn parameters for an ambient asteroid entering from a random edge
pub fn edge_spawn(rng: &mut impl Rng, settings: &Settings) -> AsteroidSpawn {
    let edge = Edge::random(rng);
    edge_spawn_from(edge, rng, settings)
}

/// Spawn parameters for an ambient asteroid entering from `edge`
///
/// Rank is uniform in 1..=4. The velocity aims at the canvas center with a
/// uniform speed in `[min, max]`, then each axis gets independent noise of
/// up to `±max/4`.
pub fn edge_spawn_from(edge: Edge, rng: &mut impl Rng, settings: &Settings) -> AsteroidSpawn {
    let (width, height) = (settings.canvas_width, settings.canvas_height);
    let (min_speed, max_speed) = (settings.asteroid_min_speed, settings.asteroid_max_speed);

    let rank = rng.random_range(1..=MAX_RANK);
    let buffer = spawn_buffer(Asteroid::size_for_rank(rank));

    let pos = match edge {
        Edge::Left => Vec2::new(-buffer, rng.random::<f32>() * height),
        Edge::Top => Vec2::new(rng.random::<f32>() * width, -buffer),
        Edge::Right => Vec2::new(width + buffer, rng.random::<f32>() * height),
        Edge::Bottom => Vec2::new(rng.random::<f32>() * width, height + buffer),
    };

    let center = Vec2::new(width / 2.0, height / 2.0);
    let to_center = center - pos;
    let speed = rng.random::<f32>() * (max_speed - min_speed) + min_speed;
    let mut vel = heading(to_center.y.atan2(to_center.x)) * speed;
    vel.x += (rng.random::<f32>() - 0.5) * (max_speed / 2.0);
    vel.y += (rng.random::<f32>() - 0.5) * (max_speed / 2.0);

    AsteroidSpawn { pos, vel, rank }
}

/// Spawn parameters for one child of a split at `pos`
///
/// Each velocity axis is `(r - 0.5) * 2 * (max - min) + min` for uniform `r`.
pub fn split_spawn(rng: &mut impl Rng, settings: &Settings, pos: Vec2, rank: u8) -> AsteroidSpawn {
    let spread = settings.asteroid_max_speed - settings.asteroid_min_speed;
    let mut axis = || (rng.random::<f32>() - 0.5) * 2.0 * spread + settings.asteroid_min_speed;
    let vel = Vec2::new(axis(), axis());
    AsteroidSpawn { pos, vel, rank }
}

/// Spawner callback: add one ambient asteroid. Returns its slot.
pub fn spawn_asteroid(state: &mut GameState) -> usize {
    let spawn = edge_spawn(&mut state.rng, &state.settings);
    let idx = state.insert_asteroid(&spawn);
    log::debug!(
        "Spawned rank {} asteroid at ({:.1}, {:.1}) in slot {}",
        spawn.rank,
        spawn.pos.x,
        spawn.pos.y,
        idx
    );
    idx
}

/// Spawn the two children of a destroyed asteroid of `parent_rank`
///
/// Returns `None` for rank 1, which does not split. The siblings start out
/// overlapping, so they are registered as each other's resolved contact.
pub fn spawn_split(state: &mut GameState, pos: Vec2, parent_rank: u8) -> Option<[usize; 2]> {
    if parent_rank <= 1 {
        return None;
    }
    let rank = parent_rank - 1;

    let first = split_spawn(&mut state.rng, &state.settings, pos, rank);
    let second = split_spawn(&mut state.rng, &state.settings, pos, rank);
    let a = state.insert_asteroid(&first);
    let b = state.insert_asteroid(&second);

    if let (Some(x), Some(y)) = (state.asteroids.get(a), state.asteroids.get(b)) {
        let (id_a, id_b) = (x.id, y.id);
        state.contacts.insert(id_a, id_b);
    }
    log::debug!(
        "Split rank {} asteroid into slots {} and {}",
        parent_rank,
        a,
        b
    );
    Some([a, b])
}

/// Millisecond accumulator driving the periodic spawner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    interval_ms: f64,
    elapsed_ms: f64,
}

impl SpawnTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Add elapsed time; returns how many spawns are due
    ///
    /// A non-positive interval never fires.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if self.interval_ms.is_nan() || self.interval_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        let mut due = 0;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            due += 1;
        }
        due
    }

    /// Restart the cadence from zero
    pub fn restart(&mut self) {
        self.elapsed_ms = 0.0;
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}
