//! Terminal game runner (default binary).
//!
//! Owns everything the core engine deliberately does not: the wall-clock
//! fall schedule (with the initial grace delay), keyboard polling, rendering,
//! and the game-over handshake with the best-score store.

use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{Game, PieceSource};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::store::{record_game_over, BestScoreOutcome, FileScoreStore, ScoreStore};
use blockfall::term::{FrameBuffer, GameView, HudInfo, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, INITIAL_FALL_DELAY_MS};

#[derive(Debug, Clone, Copy, Default)]
struct Options {
    seed: Option<u64>,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                options.seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(options)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, options);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, options: Options) -> Result<()> {
    let source = match options.seed {
        Some(seed) => PieceSource::seeded(seed),
        None => PieceSource::from_entropy(),
    };
    let mut game = Game::new(source);
    let mut store = FileScoreStore::new(FileScoreStore::default_path());
    let mut hud = HudInfo {
        best: store.read_best(),
        new_best: false,
    };

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let initial_delay = Duration::from_millis(INITIAL_FALL_DELAY_MS as u64);

    game.start();
    let mut next_fall = Instant::now() + initial_delay;
    let mut game_over_settled = false;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), hud, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until the next fall tick. While paused or after
        // game over the schedule is suspended and we just poll for keys.
        let timeout = if game.paused() || !game.started() {
            Duration::from_millis(250)
        } else {
            next_fall.saturating_duration_since(Instant::now())
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        match action {
                            GameAction::Restart => {
                                if game.start() {
                                    next_fall = Instant::now() + initial_delay;
                                    game_over_settled = false;
                                    hud.new_best = false;
                                }
                            }
                            GameAction::Pause => {
                                if game.pause() && !game.paused() {
                                    // Resumed: rearm the fall deadline.
                                    next_fall = Instant::now()
                                        + Duration::from_millis(game.fall_interval_ms() as u64);
                                }
                            }
                            _ => {
                                game.apply_action(action);
                            }
                        }
                    }
                }
            }
        }

        // Fall tick.
        if game.started() && !game.paused() && Instant::now() >= next_fall {
            game.tick();
            next_fall = Instant::now() + Duration::from_millis(game.fall_interval_ms() as u64);
        }

        // Settle with the score store once per finished game.
        if game.game_over() && !game_over_settled {
            game_over_settled = true;
            match record_game_over(&mut store, game.score()) {
                BestScoreOutcome::NewBest { .. } => {
                    hud.best = Some(game.score());
                    hud.new_best = true;
                }
                BestScoreOutcome::NotBeaten { best } => {
                    hud.best = Some(best);
                    hud.new_best = false;
                }
            }
        }
    }
}
