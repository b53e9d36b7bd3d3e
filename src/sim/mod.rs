//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Host clock passed in, never read ambiently
//! - No rendering or platform dependencies

pub mod entity;
pub mod rect;
pub mod state;
pub mod tick;

pub use entity::{DisplayState, Enemy, Goal, Player};
pub use rect::Rect;
pub use state::{
    ConfigError, GameEvent, GamePhase, GameSession, GoalView, Level, LevelConfig, PendingKind,
    PendingTransition, RenderSnapshot, SoundId, SpriteView,
};
pub use tick::{FrameInput, tick};
