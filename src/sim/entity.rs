//! Entity records: player, patrolling enemies, and the goal
//!
//! Positions are anchor points (sprite centers). Bounding boxes are cached
//! projections, re-centered on the position after every move and before any
//! collision test in the same frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Visual state the renderer should play for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayState {
    /// Player standing still
    Idle,
    /// Player advancing toward the goal
    Running,
    /// Enemy flight loop
    Flying,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Horizontal speed in px/sec while input is held
    pub speed: f32,
    /// Whether the move input was held last frame (drives the animation)
    pub moving: bool,
    pub bbox: Rect,
}

impl Player {
    pub fn new(pos: Vec2, box_size: Vec2, speed: f32) -> Self {
        Self {
            pos,
            speed,
            moving: false,
            bbox: Rect::from_center(pos, box_size),
        }
    }

    /// Advance one frame: step rightward while the input is held.
    /// No vertical motion and no clamping to the screen.
    pub fn advance(&mut self, input_held: bool, dt: f32) {
        if input_held {
            self.pos.x += self.speed * dt;
            self.moving = true;
        } else {
            self.moving = false;
        }
        self.sync_bbox();
    }

    /// Re-center the cached bounding box on the current position
    pub fn sync_bbox(&mut self) {
        self.bbox.recenter(self.pos);
    }

    pub fn display_state(&self) -> DisplayState {
        if self.moving {
            DisplayState::Running
        } else {
            DisplayState::Idle
        }
    }
}

/// A vertically patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Signed vertical speed in px/sec; the sign flips at the patrol bounds
    pub vertical_speed: f32,
    pub patrol_min_y: f32,
    pub patrol_max_y: f32,
    pub bbox: Rect,
}

impl Enemy {
    pub fn new(
        pos: Vec2,
        box_size: Vec2,
        vertical_speed: f32,
        patrol_min_y: f32,
        patrol_max_y: f32,
    ) -> Self {
        Self {
            pos,
            vertical_speed,
            patrol_min_y,
            patrol_max_y,
            bbox: Rect::from_center(pos, box_size),
        }
    }

    /// Advance one frame of patrol. The speed reflects at the bounds without
    /// clamping, so a single frame of overshoot past a bound is expected.
    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.vertical_speed * dt;
        if self.pos.y > self.patrol_max_y || self.pos.y < self.patrol_min_y {
            self.vertical_speed = -self.vertical_speed;
        }
        self.sync_bbox();
    }

    pub fn sync_bbox(&mut self) {
        self.bbox.recenter(self.pos);
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState::Flying
    }
}

/// The static goal marker at the right edge of the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub pos: Vec2,
    pub bbox: Rect,
}

impl Goal {
    pub fn new(pos: Vec2, box_size: Vec2) -> Self {
        Self {
            pos,
            bbox: Rect::from_center(pos, box_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    #[test]
    fn test_player_steps_while_held() {
        let mut player = Player::new(Vec2::new(32.0, 225.0), Vec2::splat(16.0), 120.0);
        player.advance(true, SIM_DT);
        assert!((player.pos.x - 34.0).abs() < 1e-3);
        assert!(player.moving);
        assert_eq!(player.display_state(), DisplayState::Running);
        assert_eq!(player.bbox.center(), player.pos);

        player.advance(false, SIM_DT);
        assert!((player.pos.x - 34.0).abs() < 1e-3);
        assert!(!player.moving);
        assert_eq!(player.display_state(), DisplayState::Idle);
    }

    #[test]
    fn test_player_never_moves_vertically() {
        let mut player = Player::new(Vec2::new(32.0, 225.0), Vec2::splat(16.0), 120.0);
        for _ in 0..100 {
            player.advance(true, SIM_DT);
        }
        assert_eq!(player.pos.y, 225.0);
    }

    #[test]
    fn test_enemy_reflects_at_lower_bound() {
        // 1.5 px/frame downward-to-up scenario: speed -90 px/sec, min bound 30
        let mut enemy = Enemy::new(
            Vec2::new(80.0, 50.0),
            Vec2::new(36.8, 30.0),
            -90.0,
            30.0,
            225.0,
        );
        let mut flipped_at = None;
        for frame in 0..60 {
            enemy.advance(SIM_DT);
            if enemy.vertical_speed > 0.0 {
                flipped_at = Some(frame);
                break;
            }
        }
        let frame = flipped_at.expect("speed should flip at the lower bound");
        // 20 px to cover at 1.5 px/frame
        assert!((12..16).contains(&frame), "flipped at frame {frame}");
        assert!((enemy.vertical_speed - 90.0).abs() < 1e-3);
        // Overshoot is bounded by one frame of travel
        assert!(enemy.pos.y >= 30.0 - 90.0 * SIM_DT);
    }

    proptest! {
        #[test]
        fn prop_patrol_stays_within_overshoot_band(
            start_y in 30.0f32..225.0,
            speed in 60.0f32..120.0,
            downward in any::<bool>(),
        ) {
            let signed = if downward { speed } else { -speed };
            let mut enemy = Enemy::new(
                Vec2::new(80.0, start_y),
                Vec2::new(36.8, 30.0),
                signed,
                30.0,
                225.0,
            );
            let step = speed * SIM_DT;
            for _ in 0..2000 {
                enemy.advance(SIM_DT);
                prop_assert!(enemy.pos.y >= 30.0 - step - 1e-3);
                prop_assert!(enemy.pos.y <= 225.0 + step + 1e-3);
            }
        }

        #[test]
        fn prop_sign_flips_once_per_crossing(
            start_y in 40.0f32..215.0,
            speed in 60.0f32..120.0,
        ) {
            let mut enemy = Enemy::new(
                Vec2::new(80.0, start_y),
                Vec2::new(36.8, 30.0),
                speed,
                30.0,
                225.0,
            );
            let mut last_sign = enemy.vertical_speed.is_sign_positive();
            let mut re_entered_since_flip = true;
            for _ in 0..2000 {
                enemy.advance(SIM_DT);
                let outside = enemy.pos.y > 225.0 || enemy.pos.y < 30.0;
                let sign = enemy.vertical_speed.is_sign_positive();
                if sign != last_sign {
                    // A flip only happens outside the band, and never twice
                    // for the same excursion
                    prop_assert!(outside);
                    prop_assert!(re_entered_since_flip);
                    re_entered_since_flip = false;
                }
                if !outside {
                    re_entered_since_flip = true;
                }
                last_sign = sign;
            }
        }
    }
}
