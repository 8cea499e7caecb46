//! Terminal Block Blast runner (default binary).
//!
//! Reads `GameConfig` from the environment, persists the best score to a JSON
//! file and drives the session from crossterm key events. Placements that
//! complete lines show a short burst before the turn resolves.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `BLOCK_BLAST_BEST_PATH` | best-score file (default `~/.block-blast.json`) |
//! | `BLOCK_BLAST_LOG_PATH` | write logs to this file (off when unset) |
//! | `BLOCK_BLAST_LOG` | log filter, e.g. `debug` |

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use block_blast::core::{GameConfig, GameSession, JsonFileStore, KeyValueStore, RandomSource, SimpleRng};
use block_blast::engine::apply_intent;
use block_blast::input::{should_quit, InputHandler};
use block_blast::term::{terminal_viewport, BoardOverlay, FrameBuffer, GameView, TerminalRenderer, Viewport};
use block_blast::types::{GameIntent, CLEAR_BURST_MS, TICK_MS};

fn main() -> Result<()> {
    init_logging()?;

    let mut config = GameConfig::from_env();
    if env::var_os("BLOCK_BLAST_SEED").is_none() {
        config = config.with_seed(clock_seed());
    }
    let store = JsonFileStore::open_or_empty(best_score_path());
    let rng = SimpleRng::new(config.seed);
    let session = GameSession::with_parts(config, rng, store).context("invalid game configuration")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file only; the terminal belongs to the game.
fn init_logging() -> Result<()> {
    let Some(path) = env::var_os("BLOCK_BLAST_LOG_PATH") else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", PathBuf::from(&path).display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("BLOCK_BLAST_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn best_score_path() -> PathBuf {
    if let Some(path) = env::var_os("BLOCK_BLAST_BEST_PATH") {
        return PathBuf::from(path);
    }
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".block-blast.json"),
        None => PathBuf::from("block-blast.json"),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run<R: RandomSource, S: KeyValueStore>(
    term: &mut TerminalRenderer,
    mut session: GameSession<R, S>,
) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::with_board_size(session.board().size());
    let mut fb = FrameBuffer::new(0, 0);
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let burst_duration = Duration::from_millis(CLEAR_BURST_MS as u64);

    // Set while cleared lines are on screen before the turn resolves.
    let mut burst_until: Option<Instant> = None;
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let viewport = terminal_viewport().unwrap_or(Viewport::new(80, 24));
        let (cx, cy) = input.cursor();
        let overlay = BoardOverlay {
            cursor: Some((cx, cy)),
            preview: session.selected().and_then(|slot| session.preview(slot, cx, cy)),
        };
        view.render_into_with_overlay(&session.snapshot(), Some(&overlay), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if !input.handle_key(key) {
                        tracing::debug!("[Input] intent queue full, dropped {:?}", key.code);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() < tick_duration {
            continue;
        }
        last_tick = Instant::now();

        if let Some(deadline) = burst_until {
            if Instant::now() < deadline {
                // Locked; keys pressed during the burst are dropped.
                input.drain_intents();
                continue;
            }
            burst_until = None;
            session.finish_turn();
        }

        for intent in input.drain_intents() {
            if dispatch(&mut session, intent) {
                burst_until = Some(Instant::now() + burst_duration);
                break;
            }
        }
    }
}

/// Apply one intent; true when a placement left lines waiting to burst.
fn dispatch<R: RandomSource, S: KeyValueStore>(session: &mut GameSession<R, S>, intent: GameIntent) -> bool {
    if let GameIntent::PlaceSelected { x, y } = intent {
        let Some(slot) = session.selected() else {
            return false;
        };
        return match session.begin_placement(slot, x, y) {
            Ok(pending) if !pending.lines.is_empty() => true,
            Ok(_) => {
                session.finish_turn();
                false
            }
            Err(e) => {
                tracing::debug!("[Runner] placement rejected: {}", e.code());
                false
            }
        };
    }

    if let Err(e) = apply_intent(session, intent) {
        tracing::debug!("[Runner] {} rejected: {}", intent.as_str(), e.code());
    }
    false
}
