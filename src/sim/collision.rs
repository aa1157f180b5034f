//! Collision detection and response
//!
//! Three passes run each tick, in order:
//! 1. ship vs asteroid (SAT), which ends the run on the first hit
//! 2. projectile vs asteroid (point-in-polygon, then edge distance)
//! 3. asteroid vs asteroid (SAT), answered with a size-weighted velocity swap
//!
//! Only asteroids that are active and on screen this tick take part.

use glam::Vec2;

use super::geometry::{dist_to_segment, edges, point_in_polygon, polygons_overlap};
use super::spawn::spawn_split;
use super::state::{Asteroid, GameState, Player};

/// Does a projectile circle touch an asteroid outline?
///
/// The center-inside test catches deep hits; the edge-distance test catches
/// grazing ones where only the rim of the circle reaches the outline.
pub fn projectile_hits_asteroid(center: Vec2, radius: f32, outline: &[Vec2]) -> bool {
    point_in_polygon(center, outline)
        || edges(outline).any(|(a, b)| dist_to_segment(center, a, b) <= radius)
}

#[inline]
pub fn player_hits_asteroid(player: &Player, asteroid: &Asteroid) -> bool {
    polygons_overlap(player.vertices(), &asteroid.vertices)
}

/// Swap velocities scaled by the inverse size ratio
///
/// `a' = b / (sa/sb)`, `b' = a * (sa/sb)`. A gameplay heuristic, not a
/// momentum-conserving collision.
pub fn deflect(a: &mut Asteroid, b: &mut Asteroid) {
    let ratio = a.size / b.size;
    let a_vel = a.vel;
    a.vel = b.vel / ratio;
    b.vel = a_vel * ratio;
}

/// Slot of the first on-screen asteroid touching the ship, if any
pub fn player_collision(state: &GameState, on_screen: &[usize]) -> Option<usize> {
    on_screen.iter().copied().find(|&idx| {
        state
            .asteroids
            .get(idx)
            .is_some_and(|a| player_hits_asteroid(&state.player, a))
    })
}

/// Resolve projectile hits. Returns the number of asteroids destroyed.
///
/// Each projectile is consumed by at most one asteroid. Children of a split
/// are appended to `on_screen` so later projectiles and the asteroid contact
/// pass see them this same tick.
pub fn resolve_projectile_hits(
    state: &mut GameState,
    projectiles: &[usize],
    on_screen: &mut Vec<usize>,
) -> u32 {
    let mut kills = 0;

    for &p_idx in projectiles {
        let Some(projectile) = state.projectiles.get(p_idx) else {
            continue;
        };
        let (center, radius) = (projectile.pos, projectile.radius);

        let hit = on_screen.iter().copied().find(|&a_idx| {
            state
                .asteroids
                .get(a_idx)
                .is_some_and(|a| projectile_hits_asteroid(center, radius, &a.vertices))
        });
        let Some(a_idx) = hit else {
            continue;
        };
        let Some((pos, rank)) = state.asteroids.get(a_idx).map(|a| (a.pos, a.rank)) else {
            continue;
        };

        state.projectiles.release(p_idx);
        state.release_asteroid(a_idx);
        let points = state.scoreboard.award(rank);
        log::debug!(
            "Destroyed rank {} asteroid in slot {} (+{} -> {})",
            rank,
            a_idx,
            points,
            state.scoreboard.score
        );
        kills += 1;

        if let Some(children) = spawn_split(state, pos, rank) {
            for child in children {
                // A child may reuse a slot already listed this tick
                if !on_screen.contains(&child) {
                    on_screen.push(child);
                }
            }
        }
    }

    kills
}

/// Deflect overlapping asteroid pairs. Returns the number of new contacts.
///
/// Pairs already recorded in `state.contacts` are skipped, so a contact that
/// spans several ticks is only answered once.
pub fn resolve_asteroid_contacts(state: &mut GameState, on_screen: &[usize]) -> u32 {
    let mut bounces = 0;

    for (n, &i) in on_screen.iter().enumerate() {
        for &j in &on_screen[n + 1..] {
            let Some((a, b)) = state.asteroids.get_pair_mut(i, j) else {
                continue;
            };
            if state.contacts.contains(a.id, b.id) {
                continue;
            }
            if !polygons_overlap(&a.vertices, &b.vertices) {
                continue;
            }

            deflect(a, b);
            let (id_a, id_b) = (a.id, b.id);
            state.contacts.insert(id_a, id_b);
            log::debug!("Asteroids {} and {} collided", id_a.0, id_b.0);
            bounces += 1;
        }
    }

    bounces
}
