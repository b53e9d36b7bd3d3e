//! Goal Dash - a run-to-the-goal arcade game, simulation core
//!
//! The crate owns the deterministic game loop: per-frame entity updates,
//! AABB collision detection, and the level lifecycle state machine.
//! Rendering, animation playback, audio mixing and input polling belong to
//! the host runtime, which feeds input/clock into [`sim::tick`] and reads
//! back events and a frozen [`sim::RenderSnapshot`] each frame.
//!
//! Coordinates are screen space: x grows rightward, y grows downward.

pub mod sim;

pub use sim::{FrameInput, GameSession, LevelConfig, tick};

/// Game configuration constants (the reference layout)
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the original frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 480.0;
    pub const SCREEN_HEIGHT: f32 = 320.0;

    /// Player spawn and movement
    pub const PLAYER_START_X: f32 = 32.0;
    pub const PLAYER_START_Y: f32 = SCREEN_HEIGHT / 2.0 + 65.0;
    /// Sprite is 32x32, drawn and collided at half scale
    pub const PLAYER_BOX_SIZE: f32 = 16.0;
    /// 2 px per frame at 60 Hz
    pub const PLAYER_SPEED: f32 = 120.0;

    /// Goal placement (centered box near the right edge)
    pub const GOAL_CENTER_X: f32 = SCREEN_WIDTH - 35.0;
    pub const GOAL_CENTER_Y: f32 = SCREEN_HEIGHT / 2.0 + 50.0;
    pub const GOAL_WIDTH: f32 = 30.0;
    pub const GOAL_HEIGHT: f32 = 60.0;

    /// Enemy spawn grid: 4 bats fanned out across the upper half
    pub const ENEMY_COUNT: usize = 4;
    pub const ENEMY_START_X: f32 = 80.0;
    pub const ENEMY_START_Y: f32 = 50.0;
    pub const ENEMY_STEP_X: f32 = 100.0;
    pub const ENEMY_STEP_Y: f32 = 20.0;
    /// Bat sprite is 46x30; collision box is narrowed horizontally
    pub const ENEMY_BOX_WIDTH: f32 = 46.0 * 0.8;
    pub const ENEMY_BOX_HEIGHT: f32 = 30.0;

    /// Vertical patrol band for enemies
    pub const PATROL_MIN_Y: f32 = 30.0;
    pub const PATROL_MAX_Y: f32 = SCREEN_HEIGHT / 2.0 + 65.0;
    /// Patrol speed range, 1-2 px per frame at 60 Hz
    pub const PATROL_SPEED_MIN: f32 = 60.0;
    pub const PATROL_SPEED_MAX: f32 = 120.0;

    /// Delay between scoring and the level restart
    pub const RESTART_DELAY_MS: f64 = 1000.0;
    /// Camera shake duration after an enemy hit, before the fade begins
    pub const SHAKE_DURATION_MS: f64 = 300.0;
    /// Fade-to-black duration, after which the session resets
    pub const FADE_DURATION_MS: f64 = 2000.0;
}
