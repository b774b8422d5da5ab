//! Headless demo: runs the game in idle mode and prints the board to the terminal.
//!
//! Usage: `cutline [settings.json] [seed]`. Set `RUST_LOG=debug` to see every
//! commit, kill and reclamation.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use cutline::sim::{Frame, GameState, autoplay};
use cutline::{Driver, Renderer, Settings};
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Simulated wall time per demo frame (~60 fps)
const FRAME_TIME: Duration = Duration::from_millis(16);
/// Demo length in frames
const DEMO_FRAMES: u32 = 60 * 120;
/// Print the board every this many ticks
const PRINT_EVERY: u64 = 120;

/// Prints the board periodically and on every phase change
struct TerminalRenderer {
    ticks: u64,
    last_overlay: Option<String>,
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, frame: &Frame) {
        self.ticks += 1;
        let overlay_changed = frame.overlay != self.last_overlay;
        if overlay_changed || self.ticks % PRINT_EVERY == 0 {
            println!("{}\n", frame.to_ascii());
        }
        self.last_overlay = frame.overlay.clone();
    }
}

fn main() {
    env_logger::init();
    log::info!("Cutline (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(PathBuf::from);
    let settings = match Settings::load(settings_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    log::info!("Game initialized with seed: {}", seed);

    let mut driver = Driver::new(GameState::with_settings(settings, seed));
    let mut player = Pcg32::seed_from_u64(seed ^ 0x5eed);
    let mut renderer = TerminalRenderer {
        ticks: 0,
        last_overlay: None,
    };

    for _ in 0..DEMO_FRAMES {
        if let Some(input) = autoplay::idle_input(&driver.state, &mut player) {
            driver.input = input;
        }
        driver.update(FRAME_TIME, &mut renderer);
    }

    let frame = Frame::capture(&driver.state);
    println!("{}", frame.to_ascii());
    match serde_json::to_string(&frame.scoreboard) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not serialize scoreboard: {e}"),
    }
    log::info!(
        "Demo finished after {} ticks on level {}",
        driver.state.time_ticks,
        driver.state.level
    );
}
