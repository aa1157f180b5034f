//! Game state and entity kinematics
//!
//! Velocities are in pixels per frame; one [`super::tick`] advances every
//! entity by exactly one frame.

use std::collections::HashSet;
use std::f32::consts::PI;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::Pool;
use super::spawn::{AsteroidSpawn, SpawnTimer};
use super::tick::TickInput;
use crate::consts::*;
use crate::scoreboard::ScoreBoard;
use crate::settings::{Settings, SettingsError};
use crate::{heading, wrap_coord};

/// Stable identity of one asteroid spawn
///
/// Recycled slots get a fresh id, so an id never refers to two asteroids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AsteroidId(pub u64);

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians (0 = +x)
    pub rotation: f32,
    pub size: f32,
    pub thrust: f32,
    vertices: [Vec2; 3],
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        let mut player = Self {
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            size: PLAYER_SIZE,
            thrust: PLAYER_THRUST,
            vertices: [Vec2::ZERO; 3],
        };
        player.update_vertices();
        player
    }

    /// Fresh ship at the canvas center, at rest
    pub fn spawn(settings: &Settings) -> Self {
        let mut player = Self::new(Vec2::new(
            settings.canvas_width / 2.0,
            settings.canvas_height / 2.0,
        ));
        player.thrust = settings.player_thrust;
        player
    }

    /// Triangle outline: nose first, then the two base corners
    pub fn vertices(&self) -> &[Vec2; 3] {
        &self.vertices
    }

    /// Point projectiles are launched from
    pub fn nose(&self) -> Vec2 {
        self.pos + heading(self.rotation) * self.size
    }

    /// Integrate position, wrap onto the torus, rebuild the outline
    pub fn update(&mut self, width: f32, height: f32) {
        self.pos += self.vel;
        self.pos.x = wrap_coord(self.pos.x, width);
        self.pos.y = wrap_coord(self.pos.y, height);
        self.update_vertices();
    }

    fn update_vertices(&mut self) {
        let dir = heading(self.rotation);
        let perp = Vec2::new(dir.y, -dir.x) * (self.size / 2.0);
        let back = self.pos - dir * self.size;
        self.vertices = [self.pos + dir * self.size, back + perp, back - perp];
    }

    /// Apply held controls: thrust with a speed cap, friction while coasting, rotation
    pub fn steer(&mut self, input: &TickInput, settings: &Settings) {
        if input.thrust {
            self.vel += heading(self.rotation) * self.thrust;
            let speed = self.vel.length();
            if speed > settings.player_max_speed {
                self.vel *= settings.player_max_speed / speed;
            }
        } else {
            self.vel *= 1.0 - settings.player_friction;
        }

        let turn = 0.01 * settings.rotational_speed;
        if input.rotate_left {
            self.rotation -= turn;
        } else if input.rotate_right {
            self.rotation += turn;
        }
    }
}

/// A projectile (circle, no wrapping)
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// True once the whole circle has left the canvas on any side
    pub fn is_off_screen(&self, width: f32, height: f32) -> bool {
        self.pos.x - self.radius > width
            || self.pos.x + self.radius < 0.0
            || self.pos.y - self.radius > height
            || self.pos.y + self.radius < 0.0
    }
}

/// An irregular 16-gon asteroid
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: AsteroidId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 1 (smallest) ..= 4 (largest)
    pub rank: u8,
    pub vertices: [Vec2; ASTEROID_VERTICES],
    /// Set once the asteroid has been seen on the canvas
    pub despawnable: bool,
}

impl Asteroid {
    /// Build an asteroid with a freshly jittered outline
    ///
    /// Panics if the rank is outside 1..=4; that can only come from a bug in
    /// split spawning.
    pub fn new(id: AsteroidId, spawn: &AsteroidSpawn, rng: &mut impl Rng) -> Self {
        assert!(
            (1..=MAX_RANK).contains(&spawn.rank),
            "asteroid rank {} out of range",
            spawn.rank
        );
        let size = Self::size_for_rank(spawn.rank);
        Self {
            id,
            pos: spawn.pos,
            vel: spawn.vel,
            size,
            rank: spawn.rank,
            vertices: generate_vertices(spawn.pos, size, rng),
            despawnable: false,
        }
    }

    #[inline]
    pub fn size_for_rank(rank: u8) -> f32 {
        f32::from(rank) * ASTEROID_SIZE_PER_RANK
    }

    /// Move the center and translate the outline by the same delta
    pub fn update(&mut self) {
        self.pos += self.vel;
        for v in &mut self.vertices {
            *v += self.vel;
        }
    }

    /// True only when every vertex lies outside the canvas
    pub fn is_off_screen(&self, width: f32, height: f32) -> bool {
        self.vertices
            .iter()
            .all(|v| v.x < 0.0 || v.x > width || v.y < 0.0 || v.y > height)
    }
}

/// Chord length of one 1/32 turn sector at radius `size`; bounds vertex jitter
#[inline]
pub fn jitter_span(size: f32) -> f32 {
    2.0 * size * (1.0 - (PI / 16.0).cos()).sqrt()
}

/// Evenly spaced outline points with independent per-axis jitter in
/// `[-span/2, span/2)`
pub fn generate_vertices(
    center: Vec2,
    size: f32,
    rng: &mut impl Rng,
) -> [Vec2; ASTEROID_VERTICES] {
    let span = jitter_span(size);
    std::array::from_fn(|i| {
        let angle = i as f32 * PI / 8.0;
        let jitter = Vec2::new(
            span * rng.random::<f32>() - span / 2.0,
            span * rng.random::<f32>() - span / 2.0,
        );
        center + heading(angle) * size + jitter
    })
}

/// Unordered asteroid pairs whose contact has already been resolved
///
/// An asteroid remembers at most one partner at a time: entering a new
/// contact forgets its previous ones.
#[derive(Debug, Clone, Default)]
pub struct ContactPairs {
    pairs: HashSet<(AsteroidId, AsteroidId)>,
}

impl ContactPairs {
    #[inline]
    fn key(a: AsteroidId, b: AsteroidId) -> (AsteroidId, AsteroidId) {
        if a <= b { (a, b) } else { (b, a) }
    }

    pub fn contains(&self, a: AsteroidId, b: AsteroidId) -> bool {
        self.pairs.contains(&Self::key(a, b))
    }

    /// Mark `a` and `b` as each other's current contact
    pub fn insert(&mut self, a: AsteroidId, b: AsteroidId) {
        self.forget(a);
        self.forget(b);
        self.pairs.insert(Self::key(a, b));
    }

    /// Drop every pair involving `id`
    pub fn forget(&mut self, id: AsteroidId) {
        self.pairs.retain(|&(x, y)| x != id && y != id);
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Complete simulation state
///
/// Owned by the host and passed by reference into [`super::tick`] and the
/// spawn callback; there is no global state.
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub player: Player,
    pub projectiles: Pool<Projectile>,
    pub asteroids: Pool<Asteroid>,
    /// Already-resolved asteroid contacts
    pub contacts: ContactPairs,
    pub scoreboard: ScoreBoard,
    pub spawn_timer: SpawnTimer,
    /// Frames simulated since start
    pub frame_count: u64,
    /// Number of death resets
    pub deaths: u32,
    pub(crate) rng: Pcg32,
    next_id: u64,
}

impl GameState {
    /// Create a new game, rejecting settings the simulation cannot run with
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        log::info!(
            "New game on {}x{} canvas (seed {})",
            settings.canvas_width,
            settings.canvas_height,
            settings.seed
        );
        Ok(Self {
            player: Player::spawn(&settings),
            projectiles: Pool::new(),
            asteroids: Pool::new(),
            contacts: ContactPairs::default(),
            scoreboard: ScoreBoard::new(),
            spawn_timer: SpawnTimer::new(settings.spawn_interval_ms),
            frame_count: 0,
            deaths: 0,
            rng: Pcg32::seed_from_u64(settings.seed),
            next_id: 1,
            settings,
        })
    }

    #[inline]
    pub fn canvas_size(&self) -> (f32, f32) {
        (self.settings.canvas_width, self.settings.canvas_height)
    }

    /// Allocate a new asteroid id
    pub fn next_asteroid_id(&mut self) -> AsteroidId {
        let id = AsteroidId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Launch a projectile from the ship's nose, recycling a free slot if possible
    pub fn fire_projectile(&mut self) -> usize {
        let dir = heading(self.player.rotation);
        let projectile = Projectile::new(self.player.nose(), dir * self.settings.projectile_speed);
        self.projectiles.spawn(projectile)
    }

    /// Materialize a spawn into the asteroid pool, recycling a free slot if possible
    pub fn insert_asteroid(&mut self, spawn: &AsteroidSpawn) -> usize {
        // Slots freed through `release_asteroid` are already clean; this covers
        // slots released directly on the pool
        let stale_id = self
            .asteroids
            .next_free()
            .and_then(|idx| self.asteroids.stale(idx))
            .map(|a| a.id);
        if let Some(stale_id) = stale_id {
            self.contacts.forget(stale_id);
        }
        let id = self.next_asteroid_id();
        let asteroid = Asteroid::new(id, spawn, &mut self.rng);
        self.asteroids.spawn(asteroid)
    }

    /// Free an asteroid slot and forget its contacts
    pub fn release_asteroid(&mut self, idx: usize) -> bool {
        let Some(id) = self.asteroids.get(idx).map(|a| a.id) else {
            return false;
        };
        self.contacts.forget(id);
        self.asteroids.release(idx)
    }

    /// Player death: wipe the run and start over in the same frame
    pub fn reset_after_death(&mut self) {
        self.deaths += 1;
        log::info!(
            "Player destroyed at score {} (high score {}), resetting",
            self.scoreboard.score,
            self.scoreboard.high_score
        );
        self.scoreboard.reset_run();
        self.projectiles.clear();
        self.asteroids.clear();
        self.contacts.clear();
        self.spawn_timer.restart();
        self.player = Player::spawn(&self.settings);
    }
}
