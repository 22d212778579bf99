//! Terminal blockfall runner (default binary).
//!
//! Reads keys with crossterm, advances the game by the measured frame time
//! and paints it through the framebuffer renderer.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{debug, info, trace, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use blockfall::config::load_config;
use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{map_key_event, should_quit, ReleaseEmulator, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about = "Falling-block puzzle game for the terminal")]
struct Cli {
    #[arg(long, help = "Seed for the piece sequence (random when omitted)")]
    seed: Option<u64>,

    #[arg(long, help = "JSON file overriding timing defaults")]
    config: Option<PathBuf>,

    #[arg(long, env = "BLOCKFALL_LOG_PATH", help = "Write logs to this file")]
    log_file: Option<PathBuf>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v = DEBUG, -vv = TRACE)")]
    verbose: u8,

    #[arg(
        long,
        default_value_t = DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        help = "Emulated key release timeout for terminals without release events"
    )]
    release_timeout_ms: u32,
}

fn init_logging(cli: &Cli) -> Result<()> {
    // stdout is the game screen; only log when there is a file to log to.
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(LevelFilter::from_level(level))
        .init();
    info!(path = %path.display(), %level, "logging initialized");
    Ok(())
}

fn random_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = load_config(cli.config.as_deref())?;
    let seed = cli.seed.unwrap_or_else(random_seed);
    info!(seed, ?config, "starting");

    let release_events = crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
    let release = (!release_events).then(|| ReleaseEmulator::with_timeout_ms(cli.release_timeout_ms));
    info!(release_events, "keyboard");

    let mut game = GameState::with_config(config, seed);
    let mut term = TerminalRenderer::new();
    term.enter(release_events)?;

    let result = run(&mut term, &mut game, release);

    // Always try to restore terminal state.
    let restored = term.exit();
    info!(
        score = game.score(),
        lines = game.lines(),
        games = game.game_over_count(),
        "exit"
    );
    result.and(restored)
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut GameState,
    mut release: Option<ReleaseEmulator>,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last_tick = Instant::now();

    loop {
        // Whole milliseconds only; the remainder carries into the next frame.
        let elapsed_ms = last_tick.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last_tick += Duration::from_millis(elapsed_ms as u64);

        if let Some(emu) = release.as_mut() {
            for command in emu.update(elapsed_ms) {
                game.apply(command);
            }
        }
        game.tick(elapsed_ms);
        if let Some(event) = game.take_last_event() {
            debug!(?event, "game event");
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Wait for input until the next frame is due, then drain the backlog.
        let mut timeout = FRAME.saturating_sub(last_tick.elapsed());
        while event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = map_key_event(key) {
                        trace!(command = command.as_str(), "key");
                        if release.as_mut().map_or(true, |emu| emu.observe(command)) {
                            game.apply(command);
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
            timeout = Duration::ZERO;
        }
    }
}
