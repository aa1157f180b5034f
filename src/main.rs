//! Polyroids headless entry point
//!
//! Runs the simulation without a window: a scripted autopilot flies the ship
//! at a fixed 60 Hz frame clock, and the final frame is printed as JSON.
//!
//! Usage: `polyroids [settings.json] [frames]`

use polyroids::consts::FRAME_MS;
use polyroids::sim::{GameState, TickInput, TickOutcome, advance_frame};
use polyroids::{FrameSnapshot, Settings};

const DEFAULT_FRAMES: u64 = 60 * 60;

/// Spin, fire every 15 frames, and give a short burst of thrust every 2 seconds
fn autopilot(frame: u64) -> TickInput {
    TickInput {
        thrust: frame % 120 < 20,
        rotate_left: false,
        rotate_right: true,
        fire: frame % 15 == 0,
    }
}

fn load_settings(path: Option<&str>) -> Settings {
    match path {
        Some(path) => Settings::load_from_path(path).unwrap_or_else(|err| {
            log::warn!("Ignoring settings file {path}: {err}");
            Settings::default()
        }),
        None => Settings::default(),
    }
}

fn main() {
    env_logger::init();
    log::info!("Polyroids (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let settings = load_settings(args.get(1).map(String::as_str));
    let frames = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut state = match GameState::new(settings) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Cannot start: {err}");
            std::process::exit(1);
        }
    };
    let mut kills = 0;
    let mut bounces = 0;

    for frame in 0..frames {
        match advance_frame(&mut state, &autopilot(frame), FRAME_MS) {
            TickOutcome::Playing {
                kills: k,
                bounces: b,
            } => {
                kills += k;
                bounces += b;
            }
            TickOutcome::Reset => {}
        }
    }

    log::info!(
        "{} frames: {} kills, {} bounces, {} deaths, score {} (high {})",
        frames,
        kills,
        bounces,
        state.deaths,
        state.scoreboard.score,
        state.scoreboard.high_score
    );

    let snapshot = FrameSnapshot::capture(&state);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to encode final frame: {err}"),
    }
}
