//! Render-facing frame snapshot
//!
//! The host samples one [`FrameSnapshot`] per tick and draws it however it
//! likes. Only active entities are included.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// A single draw request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Closed outline (ship triangle, asteroid 16-gon)
    Polygon { points: Vec<Vec2> },
    /// Filled circle (projectile)
    Circle { center: Vec2, radius: f32 },
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    /// Ship first, then projectiles, then asteroids
    pub shapes: Vec<Shape>,
    pub score: u64,
    pub high_score: u64,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let mut shapes =
            Vec::with_capacity(1 + state.projectiles.active_len() + state.asteroids.active_len());

        shapes.push(Shape::Polygon {
            points: state.player.vertices().to_vec(),
        });
        shapes.extend(state.projectiles.iter().map(|(_, p)| Shape::Circle {
            center: p.pos,
            radius: p.radius,
        }));
        shapes.extend(state.asteroids.iter().map(|(_, a)| Shape::Polygon {
            points: a.vertices.to_vec(),
        }));

        Self {
            frame: state.frame_count,
            shapes,
            score: state.scoreboard.score,
            high_score: state.scoreboard.high_score,
        }
    }

    /// HUD lines in draw order
    pub fn hud_lines(&self) -> [String; 2] {
        [
            format!("Score: {}", self.score),
            format!("High Score: {}", self.high_score),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ASTEROID_VERTICES;
    use crate::settings::Settings;
    use crate::sim::AsteroidSpawn;

    #[test]
    fn test_capture_orders_and_filters() {
        let mut state = GameState::new(Settings::default()).unwrap();
        let p = state.fire_projectile();
        state.fire_projectile();
        state.projectiles.release(p);
        state.insert_asteroid(&AsteroidSpawn {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            rank: 1,
        });

        let snapshot = FrameSnapshot::capture(&state);
        assert_eq!(snapshot.shapes.len(), 3);
        assert!(matches!(&snapshot.shapes[0], Shape::Polygon { points } if points.len() == 3));
        assert!(matches!(snapshot.shapes[1], Shape::Circle { radius, .. } if radius == 5.0));
        assert!(
            matches!(&snapshot.shapes[2], Shape::Polygon { points } if points.len() == ASTEROID_VERTICES)
        );
    }

    #[test]
    fn test_hud_and_json() {
        let mut state = GameState::new(Settings::default()).unwrap();
        state.scoreboard.award(2);
        let snapshot = FrameSnapshot::capture(&state);
        assert_eq!(snapshot.hud_lines(), ["Score: 75".to_string(), "High Score: 75".to_string()]);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"kind\":\"polygon\""));
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
