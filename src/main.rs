//! Brick Breaker entry point
//!
//! Headless runner: plays endless mode on autoplay for a fixed number of ticks
//! (five minutes at the configured tick rate by default) and logs how the run
//! went. A renderer and input layer drive `App` the same way.
//!
//! Usage: `brick-breaker [settings.json] [ticks]`

use brick_breaker::levels::MemoryLevels;
use brick_breaker::sim::{GameEvent, TickInput};
use brick_breaker::{App, MenuAction, Result, Screen, Settings};

/// Default run length in seconds of play
const DEFAULT_SECONDS: u64 = 5 * 60;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Breaker (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let max_ticks = args
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or(DEFAULT_SECONDS * u64::from(settings.tick_rate));

    let seed: u64 = rand::random();
    log::info!("Seed: {}", seed);

    let levels = MemoryLevels::builtin(&settings);
    let mut app = App::new(settings, levels, seed);
    app.handle(MenuAction::PlayEndless)?;

    let input = TickInput {
        autoplay: true,
        ..Default::default()
    };

    let mut bricks = 0u64;
    let mut powerups = 0u64;
    let mut ticks = 0u64;
    while app.screen() == Screen::Playing && ticks < max_ticks {
        for event in app.update(&input)? {
            match event {
                GameEvent::BrickHit { .. } => bricks += 1,
                GameEvent::Powerup(kind) => {
                    powerups += 1;
                    log::debug!("Powerup: {:?}", kind);
                }
                GameEvent::RoundCleared { round } => log::info!("Round {} cleared", round),
                _ => {}
            }
        }
        ticks += 1;
    }

    let round = app.session().map(|s| s.round).unwrap_or(0);
    let seconds = ticks as f64 / f64::from(app.settings.tick_rate);
    log::info!(
        "Finished on {:?} after {} ticks ({:.1}s of play): round {}, {} bricks, {} powerups",
        app.screen(),
        ticks,
        seconds,
        round,
        bricks,
        powerups
    );
    if let Some(best) = app.high_scores().top_score() {
        log::info!("Best endless score: {}", best);
    }

    Ok(())
}
