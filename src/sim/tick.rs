//! Per-frame simulation tick
//!
//! Update order within one frame:
//! 1. fire (edge-triggered) spawns a projectile at the ship's nose
//! 2. ship, projectiles and asteroids move; off-screen entities retire
//! 3. ship vs asteroid: first hit resets the game and ends the tick
//! 4. projectile vs asteroid, then asteroid vs asteroid
//! 5. held controls steer the ship for the next frame

use super::collision::{player_collision, resolve_asteroid_contacts, resolve_projectile_hits};
use super::spawn::spawn_asteroid;
use super::state::GameState;

/// Input snapshot sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Forward thrust held
    pub thrust: bool,
    /// Rotate counter-clockwise held (wins over `rotate_right`)
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Fire pressed since the previous frame
    pub fire: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Normal frame
    Playing {
        /// Asteroids destroyed by projectiles
        kills: u32,
        /// New asteroid-asteroid contacts resolved
        bounces: u32,
    },
    /// The ship was hit; all transient state was reset this frame
    Reset,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    state.frame_count += 1;
    let (width, height) = state.canvas_size();

    if input.fire {
        state.fire_projectile();
    }

    state.player.update(width, height);

    let mut live_projectiles = Vec::with_capacity(state.projectiles.active_len());
    let mut expired = Vec::new();
    for (idx, projectile) in state.projectiles.iter_mut() {
        projectile.update();
        if projectile.is_off_screen(width, height) {
            expired.push(idx);
        } else {
            live_projectiles.push(idx);
        }
    }
    for idx in expired {
        state.projectiles.release(idx);
    }

    let mut on_screen = Vec::with_capacity(state.asteroids.active_len());
    let mut despawned = Vec::new();
    for (idx, asteroid) in state.asteroids.iter_mut() {
        asteroid.update();
        if asteroid.is_off_screen(width, height) {
            if asteroid.despawnable {
                despawned.push(idx);
            }
        } else {
            asteroid.despawnable = true;
            on_screen.push(idx);
        }
    }
    for idx in despawned {
        state.release_asteroid(idx);
    }

    if player_collision(state, &on_screen).is_some() {
        state.reset_after_death();
        return TickOutcome::Reset;
    }

    let kills = resolve_projectile_hits(state, &live_projectiles, &mut on_screen);
    let bounces = resolve_asteroid_contacts(state, &on_screen);

    state.player.steer(input, &state.settings);

    log::trace!(
        "frame {}: {} projectiles, {} asteroids ({} on screen), score {}",
        state.frame_count,
        state.projectiles.active_len(),
        state.asteroids.active_len(),
        on_screen.len(),
        state.scoreboard.score
    );

    TickOutcome::Playing { kills, bounces }
}

/// Host convenience: run due spawner firings for `elapsed_ms`, then one tick
///
/// The spawner always completes before the tick starts, so the two never
/// interleave.
pub fn advance_frame(state: &mut GameState, input: &TickInput, elapsed_ms: f64) -> TickOutcome {
    let due = state.spawn_timer.advance(elapsed_ms);
    for _ in 0..due {
        spawn_asteroid(state);
    }
    tick(state, input)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::settings::Settings;
    use crate::sim::spawn::AsteroidSpawn;

    fn still(state: &mut GameState, pos: Vec2, rank: u8) -> usize {
        state.insert_asteroid(&AsteroidSpawn {
            pos,
            vel: Vec2::ZERO,
            rank,
        })
    }

    #[test]
    fn test_fire_spawns_projectile_ahead() {
        let mut state = GameState::new(Settings::default()).unwrap();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.projectiles.active_len(), 1);
        let (_, p) = state.projectiles.iter().next().unwrap();
        // Nose at x = 420, then one frame of travel at speed 5
        assert!((p.pos - Vec2::new(425.0, 300.0)).length() < 1e-4);
    }

    #[test]
    fn test_projectile_retires_off_screen() {
        let mut state = GameState::new(Settings::default()).unwrap();
        state.fire_projectile();
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.projectiles.active_len(), 0);
        assert_eq!(state.projectiles.capacity(), 1);
    }

    #[test]
    fn test_player_hit_resets() {
        let mut state = GameState::new(Settings::default()).unwrap();
        state.scoreboard.award(1);
        still(&mut state, Vec2::new(420.0, 300.0), 2);
        state.fire_projectile();

        let outcome = tick(&mut state, &TickInput::default());
        assert_eq!(outcome, TickOutcome::Reset);
        assert_eq!(state.scoreboard.score, 0);
        assert_eq!(state.scoreboard.high_score, 100);
        assert!(state.asteroids.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.deaths, 1);
    }

    #[test]
    fn test_shot_scores_and_splits() {
        let mut state = GameState::new(Settings::default()).unwrap();
        still(&mut state, Vec2::new(600.0, 300.0), 4);
        state.fire_projectile();

        let mut kills = 0;
        for _ in 0..60 {
            if let TickOutcome::Playing { kills: k, .. } = tick(&mut state, &TickInput::default()) {
                kills += k;
            }
            if kills > 0 {
                break;
            }
        }
        assert_eq!(kills, 1);
        assert_eq!(state.scoreboard.score, 25);
        let children: Vec<_> = state.asteroids.iter().map(|(_, a)| a).collect();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|a| a.rank == 3));
    }

    #[test]
    fn test_steering_applies_after_motion() {
        let mut state = GameState::new(Settings::default()).unwrap();
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        // Velocity changed this frame, position only moves next frame
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert!((state.player.vel.x - 0.02).abs() < 1e-6);
        tick(&mut state, &input);
        assert!(state.player.pos.x > 400.0);
    }

    #[test]
    fn test_advance_frame_runs_spawner() {
        let mut state = GameState::new(Settings::default()).unwrap();
        advance_frame(&mut state, &TickInput::default(), 1999.0);
        assert!(state.asteroids.is_empty());
        advance_frame(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.asteroids.active_len(), 1);
        // Despawnable only once some vertex has crossed onto the canvas
        let (_, a) = state.asteroids.iter().next().unwrap();
        assert_eq!(a.despawnable, !a.is_off_screen(800.0, 600.0));
    }
}
