//! Skyguard headless runner
//!
//! Plays one game with the autopilot at the fixed tick rate and prints the
//! final score.
//!
//! Usage: `skyguard [settings.json] [waves.json] [seed]`

use skyguard::Settings;
use skyguard::consts::*;
use skyguard::sim::{GameEvent, GameState, LevelManager, TickInput, autopilot_target, seeded, tick};

/// Give up after an hour of simulated play
const MAX_TICKS: u64 = 60 * 60 * SIM_HZ as u64;

fn main() {
    env_logger::init();
    log::info!("Skyguard (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| "settings.json".to_string());
    let waves_path = args.next().unwrap_or_else(|| "waves.json".to_string());
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);

    let settings = Settings::load(&settings_path);
    let levels = LevelManager::load_or_default(&waves_path, settings.start_wave_index);
    let mut state = GameState::new(settings, levels);
    let mut rng = seeded(seed);

    let mut final_score = None;
    while final_score.is_none() && state.time_ticks < MAX_TICKS {
        let input = TickInput {
            fire_at: autopilot_target(&state),
            aim: None,
        };
        for event in tick(&mut state, &mut rng, &input) {
            match event {
                GameEvent::WaveStarted { level } => log::info!("Wave {} started", level),
                GameEvent::GameFinished { score } => final_score = Some(score),
                _ => {}
            }
        }
    }

    let seconds = state.time_ms / 1000;
    match final_score {
        Some(score) => println!(
            "Game over at level {} after {}s: score {}",
            state.levels.level_index(),
            seconds,
            score
        ),
        None => println!(
            "Still standing at level {} after {}s: score {}",
            state.levels.level_index(),
            seconds,
            state.score
        ),
    }
}
