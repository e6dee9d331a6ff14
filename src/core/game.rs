//! Game module - the engine state machine.
//!
//! Ties together board, piece geometry, and the piece source. Owns the board
//! and the active piece exclusively: all mutation flows through `tick()` and
//! the command API. The engine has no clock of its own; the host calls
//! `tick()` on a cadence derived from [`Game::fall_interval_ms`].

use crate::core::board::{Board, ClearedLines};
use crate::core::piece::Piece;
use crate::core::rng::PieceSource;
use crate::core::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    GameAction, BASE_FALL_INTERVAL_MS, BOARD_HEIGHT, BOARD_WIDTH, FALL_INTERVAL_FLOOR_MS,
    FALL_SPEEDUP_STEP_MS, SCORE_PER_SPEEDUP,
};

/// The falling piece with its pivot position in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub piece: Piece,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Absolute board cells covered by the piece (`(x + dx, y - dy)`).
    pub fn cells(&self) -> [(i8, i8); 4] {
        let mut cells = [(0i8, 0i8); 4];
        for (cell, &(dx, dy)) in cells.iter_mut().zip(self.piece.offsets()) {
            *cell = (self.x + dx, self.y - dy);
        }
        cells
    }
}

/// Engine phase.
///
/// `AwaitingSpawn` is the one-tick grace window after a line-clearing lock:
/// the next tick spawns instead of advancing. Pausing is orthogonal and
/// preserves whichever phase it interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Falling,
    AwaitingSpawn,
    GameOver,
}

/// Record of the most recent lock, consumed by observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Row indices as reported by the board compaction pass.
    pub rows: ClearedLines,
}

/// Complete game state.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Option<ActivePiece>,
    source: PieceSource,
    score: u32,
    phase: Phase,
    paused: bool,
    last_lock: Option<LockEvent>,
}

impl Game {
    pub fn new(source: PieceSource) -> Self {
        Self {
            board: Board::new(),
            active: None,
            source,
            score: 0,
            phase: Phase::NotStarted,
            paused: false,
            last_lock: None,
        }
    }

    /// Start (or restart) a session: clear the board, reset the score, spawn.
    ///
    /// No-op while paused - pausing cannot be escaped via start. Returns
    /// whether a new session actually started.
    pub fn start(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.board.clear();
        self.score = 0;
        self.active = None;
        self.last_lock = None;
        self.phase = Phase::Falling;
        self.spawn_piece();
        true
    }

    /// True while a session is live (spawning or falling).
    pub fn started(&self) -> bool {
        matches!(self.phase, Phase::Falling | Phase::AwaitingSpawn)
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Display level, increasing every ten points.
    pub fn level(&self) -> u32 {
        self.score / SCORE_PER_SPEEDUP + 1
    }

    /// Current fall cadence for the external scheduler.
    ///
    /// `370 - (score/10)*30` ms, floored at 100 ms.
    pub fn fall_interval_ms(&self) -> u32 {
        let steps = self.score / SCORE_PER_SPEEDUP;
        BASE_FALL_INTERVAL_MS
            .saturating_sub(steps.saturating_mul(FALL_SPEEDUP_STEP_MS))
            .max(FALL_INTERVAL_FLOOR_MS)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Take and clear the last lock event.
    pub fn take_last_lock(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    /// The single time-driven transition.
    ///
    /// While awaiting a spawn, spawns; otherwise advances the active piece
    /// one row down, locking it when it cannot move. Returns whether state
    /// advanced. Rejected while paused, not started, or game over.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }
        match self.phase {
            Phase::NotStarted | Phase::GameOver => false,
            Phase::AwaitingSpawn => {
                self.spawn_piece();
                true
            }
            Phase::Falling => self.advance_one_line(),
        }
    }

    /// Move the active piece one column left or right.
    pub fn move_piece(&mut self, dx: i8) -> bool {
        if !self.accepting_commands() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        self.try_move_to(active.piece, active.x + dx, active.y)
    }

    /// Rotate the active piece clockwise.
    pub fn rotate_cw(&mut self) -> bool {
        self.rotate_with(Piece::rotated_right)
    }

    /// Rotate the active piece counter-clockwise.
    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate_with(Piece::rotated_left)
    }

    fn rotate_with(&mut self, rotate: impl Fn(&Piece) -> Piece) -> bool {
        if !self.accepting_commands() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        self.try_move_to(rotate(&active.piece), active.x, active.y)
    }

    /// One immediate down-advance, without waiting for the tick.
    ///
    /// Like a tick advance this can lock the piece and clear lines.
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepting_commands() {
            return false;
        }
        self.advance_one_line()
    }

    /// Drop the active piece as far as it goes, then force the lock.
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepting_commands() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let mut y = active.y;
        while self.can_place(&active.piece, active.x, y - 1) {
            y -= 1;
        }
        self.active = Some(ActivePiece { y, ..active });
        self.lock_active();
        true
    }

    /// Toggle pause. No-op before the first start and after game over.
    ///
    /// The external scheduler observes `paused()` and suspends ticks.
    pub fn pause(&mut self) -> bool {
        if !self.started() {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Apply a game action.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1),
            GameAction::MoveRight => self.move_piece(1),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Pause => self.pause(),
            GameAction::Restart => self.start(),
        }
    }

    /// Non-committing legality test for the piece at pivot (x, y).
    pub fn can_place(&self, piece: &Piece, x: i8, y: i8) -> bool {
        piece
            .offsets()
            .iter()
            .all(|&(dx, dy)| self.board.is_free(x + dx, y - dy))
    }

    /// The row where the active piece would rest if hard-dropped now.
    ///
    /// Read-only; used for the drop-shadow preview.
    pub fn shadow_y(&self) -> Option<i8> {
        let active = self.active?;
        let mut y = active.y;
        while self.can_place(&active.piece, active.x, y - 1) {
            y -= 1;
        }
        Some(y)
    }

    /// Absolute cells of the drop shadow.
    pub fn shadow_cells(&self) -> Option<[(i8, i8); 4]> {
        let active = self.active?;
        let y = self.shadow_y()?;
        Some(ActivePiece { y, ..active }.cells())
    }

    /// Fill a reusable snapshot with the current render state.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                out.board[y as usize][x as usize] = self.board.get(x, y).unwrap_or(None);
            }
        }
        out.active = self.active.map(|a| ActiveSnapshot {
            shape: a.piece.shape(),
            cells: a.cells(),
        });
        out.shadow = self.shadow_cells();
        out.score = self.score;
        out.level = self.level();
        out.fall_interval_ms = self.fall_interval_ms();
        out.started = self.started();
        out.paused = self.paused;
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    fn accepting_commands(&self) -> bool {
        self.phase == Phase::Falling && !self.paused
    }

    /// Check-and-commit in one operation: the candidate is a value copy, so
    /// a failed check leaves the committed piece untouched.
    fn try_move_to(&mut self, piece: Piece, x: i8, y: i8) -> bool {
        if !self.can_place(&piece, x, y) {
            return false;
        }
        self.active = Some(ActivePiece { piece, x, y });
        true
    }

    /// Move the active piece down one row, locking it when it cannot move.
    fn advance_one_line(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if self.try_move_to(active.piece, active.x, active.y - 1) {
            return true;
        }
        self.lock_active();
        true
    }

    /// Commit the active piece into the board, clear full lines, score them.
    ///
    /// A clearing lock leaves one tick of grace before the next spawn; a
    /// non-clearing lock spawns immediately.
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        self.board.lock_piece(&active.piece, active.x, active.y);

        let rows = self.board.clear_full_lines();
        let lines_cleared = rows.len() as u32;
        self.score += lines_cleared;
        self.last_lock = Some(LockEvent {
            lines_cleared,
            rows,
        });

        if lines_cleared > 0 {
            self.phase = Phase::AwaitingSpawn;
        } else {
            self.spawn_piece();
        }
    }

    /// Place a fresh piece at the top of the board.
    ///
    /// The pivot row is chosen from the piece geometry so its highest cell
    /// sits exactly on the top row. A blocked spawn means the stack reached
    /// the top: the session ends.
    fn spawn_piece(&mut self) -> bool {
        let piece = Piece::new(self.source.next_shape());
        let x = (BOARD_WIDTH / 2) as i8 + 1;
        let y = BOARD_HEIGHT as i8 - 1 + piece.min_y();

        if self.can_place(&piece, x, y) {
            self.active = Some(ActivePiece { piece, x, y });
            self.phase = Phase::Falling;
            true
        } else {
            self.active = None;
            self.phase = Phase::GameOver;
            false
        }
    }
}
