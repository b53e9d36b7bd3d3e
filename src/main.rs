//! Headless demo host
//!
//! Stands in for the engine runtime: drives the simulation with a
//! synthetic monotonic clock and a scripted input, and logs the events a
//! real host would turn into sounds and particle bursts. Run with
//! `RUST_LOG=debug` to watch the lifecycle transitions.

use goal_dash::consts::SIM_DT;
use goal_dash::sim::{FrameInput, GameEvent, GameSession, LevelConfig, tick};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xD1CE);

    let mut session = match GameSession::new(LevelConfig::default(), seed) {
        Ok(session) => session,
        Err(err) => {
            log::error!("invalid level config: {err}");
            std::process::exit(1);
        }
    };

    let mut now_ms = 0.0;
    // Hold the move input the whole run; the bats decide how it ends.
    let input = FrameInput { move_held: true };

    // Enough frames for a few scoring runs or a full game-over cycle
    for _ in 0..3600 {
        now_ms += FRAME_MS;
        for event in tick(&mut session, &input, now_ms, SIM_DT) {
            match event {
                GameEvent::PlaySound(id) => log::debug!("play sound {id:?}"),
                GameEvent::EmitParticles { pos, count } => {
                    log::debug!("burst of {count} particles at ({:.0}, {:.0})", pos.x, pos.y);
                }
                GameEvent::ScoreChanged(score) => log::info!("score: {score}"),
                other => log::info!("{other:?}"),
            }
        }
    }

    let snapshot = session.render_snapshot();
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).expect("snapshot serializes")
    );
}
