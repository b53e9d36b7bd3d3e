//! Game state and core simulation types
//!
//! The session owns everything mutable: the score, the seeded RNG, and the
//! current level instance. Levels are discarded and respawned wholesale on
//! restart/reset, which also drops any pending timed transition.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{DisplayState, Enemy, Goal, Player};
use super::rect::Rect;
use crate::consts::*;

/// Current phase of the level lifecycle.
///
/// Strictly forward-progressing within one level instance: a restart or
/// reset always constructs a fresh instance back in `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Goal reached; waiting out the celebration before the level restarts
    ScoringPause,
    /// Enemy hit; camera shake runs before the fade begins
    GameOver,
    /// Fade-to-black before the session-wide reset
    Fading,
}

/// Sound effect identifiers for the host audio runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundId {
    /// Goal reached
    Pick,
    /// Enemy collision
    Hit,
    /// Background music, requested once per process
    Bgm,
}

/// Side effects produced by a tick, consumed fire-and-forget by the host
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PlaySound(SoundId),
    EmitParticles { pos: Vec2, count: u32 },
    ScoreChanged(u32),
    /// Goal celebration finished; a fresh level was spawned, score kept
    LevelRestarted,
    /// Enemy hit registered; shake timer started
    GameOverStarted,
    /// Shake finished; fade timer started
    FadeStarted,
    /// Fade finished; score zeroed and a fresh level spawned
    SessionReset,
}

/// Construction-time invariant violations. These are programmer errors in
/// the level layout and reject construction outright.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("patrol_min_y ({min}) must be below patrol_max_y ({max})")]
    InvalidPatrolBounds { min: f32, max: f32 },
    #[error("a level needs at least one enemy")]
    NoEnemies,
    #[error("player speed must be positive, got {0}")]
    NonPositiveSpeed(f32),
    #[error("patrol speed range [{min}, {max}] is empty or non-positive")]
    EmptySpeedRange { min: f32, max: f32 },
}

/// Level layout and timing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    pub width: f32,
    pub height: f32,

    pub player_start: Vec2,
    pub player_box: Vec2,
    /// px/sec while the move input is held
    pub player_speed: f32,

    pub goal_center: Vec2,
    pub goal_box: Vec2,

    pub enemy_count: usize,
    /// First enemy spawn anchor; the rest step by `enemy_step`
    pub enemy_start: Vec2,
    pub enemy_step: Vec2,
    pub enemy_box: Vec2,
    pub patrol_min_y: f32,
    pub patrol_max_y: f32,
    /// Patrol speed magnitude range, px/sec; sign is rolled per enemy
    pub patrol_speed_min: f32,
    pub patrol_speed_max: f32,

    pub restart_delay_ms: f64,
    pub shake_duration_ms: f64,
    pub fade_duration_ms: f64,
}

impl Default for LevelConfig {
    /// The reference layout: 480x320 screen, four bats, goal on the right
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_box: Vec2::splat(PLAYER_BOX_SIZE),
            player_speed: PLAYER_SPEED,
            goal_center: Vec2::new(GOAL_CENTER_X, GOAL_CENTER_Y),
            goal_box: Vec2::new(GOAL_WIDTH, GOAL_HEIGHT),
            enemy_count: ENEMY_COUNT,
            enemy_start: Vec2::new(ENEMY_START_X, ENEMY_START_Y),
            enemy_step: Vec2::new(ENEMY_STEP_X, ENEMY_STEP_Y),
            enemy_box: Vec2::new(ENEMY_BOX_WIDTH, ENEMY_BOX_HEIGHT),
            patrol_min_y: PATROL_MIN_Y,
            patrol_max_y: PATROL_MAX_Y,
            patrol_speed_min: PATROL_SPEED_MIN,
            patrol_speed_max: PATROL_SPEED_MAX,
            restart_delay_ms: RESTART_DELAY_MS,
            shake_duration_ms: SHAKE_DURATION_MS,
            fade_duration_ms: FADE_DURATION_MS,
        }
    }
}

impl LevelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.patrol_min_y >= self.patrol_max_y {
            return Err(ConfigError::InvalidPatrolBounds {
                min: self.patrol_min_y,
                max: self.patrol_max_y,
            });
        }
        if self.enemy_count == 0 {
            return Err(ConfigError::NoEnemies);
        }
        if self.player_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(self.player_speed));
        }
        if self.patrol_speed_min <= 0.0 || self.patrol_speed_max < self.patrol_speed_min {
            return Err(ConfigError::EmptySpeedRange {
                min: self.patrol_speed_min,
                max: self.patrol_speed_max,
            });
        }
        Ok(())
    }
}

/// Which delayed transition a pending timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingKind {
    /// ScoringPause -> fresh level
    Restart,
    /// GameOver -> Fading
    Fade,
    /// Fading -> session reset
    Reset,
}

/// A one-shot scheduled transition, keyed to the host's monotonic clock.
/// Firing consumes it; spawning a fresh level drops it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingTransition {
    pub kind: PendingKind,
    pub deadline_ms: f64,
}

/// One level instance: one player, one goal, a fixed set of enemies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub player: Player,
    pub goal: Goal,
    pub enemies: Vec<Enemy>,
    pub phase: GamePhase,
    pub pending: Option<PendingTransition>,
}

impl Level {
    /// Spawn a fresh level from a validated config. Each enemy rolls its
    /// initial patrol velocity here, once; it is never re-rolled per frame.
    pub fn spawn(config: &LevelConfig, rng: &mut Pcg32) -> Self {
        let enemies = (0..config.enemy_count)
            .map(|i| {
                let pos = config.enemy_start + config.enemy_step * i as f32;
                let magnitude =
                    rng.random_range(config.patrol_speed_min..=config.patrol_speed_max);
                let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                Enemy::new(
                    pos,
                    config.enemy_box,
                    dir * magnitude,
                    config.patrol_min_y,
                    config.patrol_max_y,
                )
            })
            .collect();

        Self {
            player: Player::new(config.player_start, config.player_box, config.player_speed),
            goal: Goal::new(config.goal_center, config.goal_box),
            enemies,
            phase: GamePhase::Playing,
            pending: None,
        }
    }
}

/// Process-wide game state: score, RNG stream, and the live level.
///
/// The score survives scoring restarts and is zeroed only on the
/// game-over reset. The background music request happens once per
/// session, on the first tick.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: LevelConfig,
    pub seed: u64,
    pub rng: Pcg32,
    pub score: u32,
    pub level: Level,
    pub bgm_started: bool,
}

impl GameSession {
    /// Validate the config and spawn the first level
    pub fn new(config: LevelConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = Level::spawn(&config, &mut rng);
        log::info!(
            "session started: seed={seed}, {} enemies",
            level.enemies.len()
        );
        Ok(Self {
            config,
            seed,
            rng,
            score: 0,
            level,
            bgm_started: false,
        })
    }

    /// Discard the current level and spawn a fresh one (score untouched)
    pub fn respawn_level(&mut self) {
        self.level = Level::spawn(&self.config, &mut self.rng);
    }

    /// Frozen read-only view for the renderer
    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            phase: self.level.phase,
            score: self.score,
            player: SpriteView {
                pos: self.level.player.pos,
                bbox: self.level.player.bbox,
                display: self.level.player.display_state(),
            },
            goal: GoalView {
                pos: self.level.goal.pos,
                bbox: self.level.goal.bbox,
            },
            enemies: self
                .level
                .enemies
                .iter()
                .map(|e| SpriteView {
                    pos: e.pos,
                    bbox: e.bbox,
                    display: e.display_state(),
                })
                .collect(),
        }
    }
}

/// An animated entity as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteView {
    pub pos: Vec2,
    pub bbox: Rect,
    pub display: DisplayState,
}

/// The static goal marker as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalView {
    pub pos: Vec2,
    pub bbox: Rect,
}

/// Everything the renderer reads after a tick; never written by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub player: SpriteView,
    pub goal: GoalView,
    pub enemies: Vec<SpriteView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(LevelConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_patrol_bounds_rejected() {
        let config = LevelConfig {
            patrol_min_y: 225.0,
            patrol_max_y: 30.0,
            ..Default::default()
        };
        assert!(matches!(
            GameSession::new(config, 1),
            Err(ConfigError::InvalidPatrolBounds { .. })
        ));
    }

    #[test]
    fn test_zero_enemies_rejected() {
        let config = LevelConfig {
            enemy_count: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoEnemies));
    }

    #[test]
    fn test_empty_speed_range_rejected() {
        let config = LevelConfig {
            patrol_speed_min: 120.0,
            patrol_speed_max: 60.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptySpeedRange { .. })
        ));
    }

    #[test]
    fn test_spawn_reference_layout() {
        let config = LevelConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let level = Level::spawn(&config, &mut rng);

        assert_eq!(level.enemies.len(), 4);
        assert_eq!(level.phase, GamePhase::Playing);
        assert!(level.pending.is_none());

        for (i, enemy) in level.enemies.iter().enumerate() {
            let expected = config.enemy_start + config.enemy_step * i as f32;
            assert_eq!(enemy.pos, expected);
            let magnitude = enemy.vertical_speed.abs();
            assert!(magnitude >= config.patrol_speed_min);
            assert!(magnitude <= config.patrol_speed_max);
            assert!(enemy.patrol_min_y < enemy.patrol_max_y);
        }

        // Bounding boxes start centered on the anchors
        assert_eq!(level.player.bbox.center(), level.player.pos);
        assert_eq!(level.goal.bbox.center(), level.goal.pos);
    }

    #[test]
    fn test_same_seed_spawns_identical_levels() {
        let config = LevelConfig::default();
        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);
        let a = Level::spawn(&config, &mut rng_a);
        let b = Level::spawn(&config, &mut rng_b);
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.vertical_speed, eb.vertical_speed);
        }
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = GameSession::new(LevelConfig::default(), 3).unwrap();
        let snapshot = session.render_snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: RenderSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.enemies.len(), 4);
        assert_eq!(back.player.display, DisplayState::Idle);
    }
}
