//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. Per
//! frame: fire a due timed transition, then (while `Playing`) advance
//! enemies and the player, recenter bounding boxes, and resolve goal and
//! enemy collisions. The goal check runs first, so a frame where both
//! would hit resolves as a score.

use glam::Vec2;
use rand::Rng;

use super::state::{
    GameEvent, GamePhase, GameSession, PendingKind, PendingTransition, SoundId,
};

/// Celebration burst: number of emitters, each scattering this many particles
const SCORE_BURST_EMITTERS_MIN: u32 = 5;
const SCORE_BURST_EMITTERS_MAX: u32 = 10;
const SCORE_BURST_PARTICLES: u32 = 100;
/// Impact burst at the enemy position on a fatal hit
const HIT_BURST_PARTICLES: u32 = 50;

/// Host-polled input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Move key / pointer held this frame
    pub move_held: bool,
}

/// Advance the session by one frame.
///
/// `now_ms` is the host's monotonic clock; delayed transitions are
/// deadlines against it and fire at most once, at a frame boundary.
/// Returns the side effects the host should act on (sounds, particle
/// bursts, lifecycle notifications).
pub fn tick(
    session: &mut GameSession,
    input: &FrameInput,
    now_ms: f64,
    dt: f32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Background music is requested exactly once per session
    if !session.bgm_started {
        session.bgm_started = true;
        events.push(GameEvent::PlaySound(SoundId::Bgm));
    }

    // Fire a due one-shot transition. `take` consumes it, so a re-entered
    // frame cannot fire it twice; a respawned level starts with none.
    if let Some(pending) = session.level.pending.take() {
        if now_ms >= pending.deadline_ms {
            fire_transition(session, pending.kind, now_ms, &mut events);
            return events;
        }
        session.level.pending = Some(pending);
    }

    // Collision and movement are suppressed outside active play; the
    // level sits frozen until its pending transition fires.
    if session.level.phase != GamePhase::Playing {
        return events;
    }

    for enemy in &mut session.level.enemies {
        enemy.advance(dt);
    }
    session.level.player.advance(input.move_held, dt);

    resolve_collisions(session, now_ms, &mut events);
    events
}

fn fire_transition(
    session: &mut GameSession,
    kind: PendingKind,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    match kind {
        PendingKind::Restart => {
            log::info!("level restart, score carried: {}", session.score);
            session.respawn_level();
            events.push(GameEvent::LevelRestarted);
        }
        PendingKind::Fade => {
            session.level.phase = GamePhase::Fading;
            session.level.pending = Some(PendingTransition {
                kind: PendingKind::Reset,
                deadline_ms: now_ms + session.config.fade_duration_ms,
            });
            events.push(GameEvent::FadeStarted);
        }
        PendingKind::Reset => {
            log::info!("session reset, final score: {}", session.score);
            session.score = 0;
            events.push(GameEvent::ScoreChanged(0));
            session.respawn_level();
            events.push(GameEvent::SessionReset);
        }
    }
}

/// Goal first, then enemies in spawn order; only while `Playing`
fn resolve_collisions(session: &mut GameSession, now_ms: f64, events: &mut Vec<GameEvent>) {
    let level = &mut session.level;

    if level.player.bbox.intersects(&level.goal.bbox) {
        level.player.moving = false;
        level.phase = GamePhase::ScoringPause;
        level.pending = Some(PendingTransition {
            kind: PendingKind::Restart,
            deadline_ms: now_ms + session.config.restart_delay_ms,
        });
        session.score += 1;
        log::info!("goal reached, score: {}", session.score);

        events.push(GameEvent::ScoreChanged(session.score));
        events.push(GameEvent::PlaySound(SoundId::Pick));

        // Celebratory bursts scattered over the upper-center of the screen
        let emitters =
            session.rng.random_range(SCORE_BURST_EMITTERS_MIN..=SCORE_BURST_EMITTERS_MAX);
        for _ in 0..emitters {
            let x = session.config.width * session.rng.random_range(0.25..0.75);
            let y = session.config.height * session.rng.random_range(0.0..0.5);
            events.push(GameEvent::EmitParticles {
                pos: Vec2::new(x, y),
                count: SCORE_BURST_PARTICLES,
            });
        }
        return;
    }

    let hit_pos = level
        .enemies
        .iter()
        .find(|enemy| enemy.bbox.intersects(&level.player.bbox))
        .map(|enemy| enemy.pos);

    if let Some(pos) = hit_pos {
        level.phase = GamePhase::GameOver;
        level.pending = Some(PendingTransition {
            kind: PendingKind::Fade,
            deadline_ms: now_ms + session.config.shake_duration_ms,
        });
        log::info!("enemy hit at ({:.0}, {:.0}), game over", pos.x, pos.y);

        events.push(GameEvent::EmitParticles {
            pos,
            count: HIT_BURST_PARTICLES,
        });
        events.push(GameEvent::PlaySound(SoundId::Hit));
        events.push(GameEvent::GameOverStarted);
    }
}
