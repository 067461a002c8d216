//! Game state module - the live session
//!
//! Ties together board, geometry, placement, piece source and scoring. The host
//! calls the command methods as input arrives and [`GameState::update`] once per
//! frame with the elapsed milliseconds; everything runs to completion inside the
//! call, so the engine never reads a clock itself.
//!
//! Commands are total: an illegal move is silently rejected (`false`), never an
//! error. Game over is reached only when a freshly spawned piece has no room.

use tracing::{debug, trace};

use crate::board::Board;
use crate::config::GameConfig;
use crate::pieces::{get_shape, next_rotation, PieceShape};
use crate::placement::{can_place, hard_drop_y};
use crate::rng::PieceSource;
use crate::scoring::{calculate_drop_score, calculate_level, calculate_line_score, fall_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, PieceKind, KICK_OFFSETS, SPAWN_X, SPAWN_Y};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Index into the kind's rotation states
    pub rotation: u8,
    pub x: i8,
    /// May be negative while the piece is still entering from above
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor, rotation 0
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Whether the piece fits on the board where it is
    pub fn fits(&self, board: &Board) -> bool {
        can_place(board, self.kind, self.rotation, self.x, self.y)
    }

    /// Whether the piece would fit after shifting by (dx, dy)
    pub fn fits_at(&self, board: &Board, dx: i8, dy: i8) -> bool {
        can_place(board, self.kind, self.rotation, self.x + dx, self.y + dy)
    }
}

/// Coarse session state as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Falling,
    Paused,
    GameOver,
}

/// Outcome of the most recent lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Cells written inside the visible board
    pub cells_written: u32,
    pub lines_cleared: u32,
    /// Line clear points only (drop bonuses are awarded separately)
    pub line_clear_score: u32,
    pub level_up: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Tetromino>,
    next: PieceKind,
    source: PieceSource,
    score: u32,
    lines: u32,
    level: u32,
    paused: bool,
    game_over: bool,
    /// Gravity accumulator; leftover time carries over between frames.
    fall_timer_ms: u32,
    /// Increments on every restart.
    episode: u32,
    pieces_locked: u32,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Start a session on an empty board
    pub fn new(config: GameConfig) -> Self {
        Self::with_board(config, Board::new())
    }

    /// Start a session on a prepared board (puzzles, tests).
    ///
    /// The first piece spawns immediately, so a board with no room at the spawn
    /// area produces a session that is already over.
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        let mut source = PieceSource::new(config.randomizer, config.seed);
        let next = source.draw();

        let mut state = Self {
            config,
            board,
            active: None,
            next,
            source,
            score: 0,
            lines: 0,
            level: 1,
            paused: false,
            game_over: false,
            fall_timer_ms: 0,
            episode: 0,
            pieces_locked: 0,
            last_event: None,
        };
        state.spawn_piece();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Falling
        }
    }

    fn playable(&self) -> bool {
        !self.paused && !self.game_over
    }

    /// Gravity interval at the current level
    pub fn fall_interval_ms(&self) -> u32 {
        fall_interval_ms(self.level)
    }

    /// Milliseconds accumulated toward the next gravity step
    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    /// Landing row of the active piece if hard-dropped now
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(hard_drop_y(
            &self.board,
            active.kind,
            active.rotation,
            active.x,
            active.y,
        ))
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Promote the held next kind to the active piece and draw a new next kind.
    ///
    /// The spawn is blocked when the piece cannot sit at its anchor or cannot
    /// advance one row into the visible board. Rotation-0 shapes all have their
    /// bottom minos at dy = 1, so that second probe is the piece's first visible
    /// footprint (row 0). A blocked spawn ends the game and leaves the board untouched.
    fn spawn_piece(&mut self) -> bool {
        let piece = Tetromino::new(self.next);
        self.next = self.source.draw();

        if !piece.fits(&self.board) || !piece.fits_at(&self.board, 0, 1) {
            debug!(
                kind = piece.kind.as_str(),
                score = self.score,
                lines = self.lines,
                "spawn blocked, game over"
            );
            self.active = None;
            self.game_over = true;
            return false;
        }

        trace!(kind = piece.kind.as_str(), next = self.next.as_str(), "spawned");
        self.active = Some(piece);
        true
    }

    /// Shift the active piece horizontally by `dx` if the target fits
    pub fn try_move(&mut self, dx: i8) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if active.fits_at(&self.board, dx, 0) {
            self.active = Some(Tetromino {
                x: active.x + dx,
                ..active
            });
            return true;
        }

        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1)
    }

    /// Rotate to the next state, trying horizontal kicks in [`KICK_OFFSETS`] order.
    /// Rotation and kick are applied together or not at all. A kind with a single
    /// rotation state (O) never changes, so it reports false.
    pub fn rotate(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotation = next_rotation(active.kind, active.rotation);
        let kick = KICK_OFFSETS
            .iter()
            .copied()
            .find(|&dx| can_place(&self.board, active.kind, rotation, active.x + dx, active.y));

        match kick {
            Some(0) if rotation == active.rotation => false,
            Some(dx) => {
                self.active = Some(Tetromino {
                    rotation,
                    x: active.x + dx,
                    ..active
                });
                true
            }
            None => false,
        }
    }

    /// Move down one row for the soft-drop bonus, or lock if resting
    pub fn soft_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if active.fits_at(&self.board, 0, 1) {
            self.active = Some(Tetromino {
                y: active.y + 1,
                ..active
            });
            self.add_score(calculate_drop_score(1, false, &self.config.scoring));
        } else {
            self.lock_piece();
        }
        true
    }

    /// Drop to the landing row, award the hard-drop bonus and lock.
    /// Returns the number of rows travelled.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.playable() {
            return None;
        }
        let active = self.active?;

        let landing = hard_drop_y(
            &self.board,
            active.kind,
            active.rotation,
            active.x,
            active.y,
        );
        let rows = (landing - active.y) as u32;
        self.active = Some(Tetromino {
            y: landing,
            ..active
        });
        self.add_score(calculate_drop_score(rows, true, &self.config.scoring));
        self.lock_piece();
        Some(rows)
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Write the active piece into the board, clear lines, score, and spawn the next piece.
    pub fn lock_piece(&mut self) {
        if !self.playable() {
            return;
        }
        let Some(active) = self.active.take() else {
            return;
        };

        let cells_written =
            self.board
                .lock_piece(&active.shape(), active.x, active.y, active.kind) as u32;
        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len() as u32;
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let mut line_clear_score = 0;
        let mut level_up = false;
        if lines_cleared > 0 {
            // Points use the level in effect before these lines count.
            line_clear_score = calculate_line_score(cleared_rows.len(), self.level);
            self.add_score(line_clear_score);
            self.lines += lines_cleared;

            let level = calculate_level(self.lines);
            level_up = level > self.level;
            self.level = level;

            debug!(
                rows = ?cleared_rows.as_slice(),
                points = line_clear_score,
                lines = self.lines,
                level = self.level,
                "lines cleared"
            );
            if level_up {
                debug!(
                    level = self.level,
                    fall_ms = self.fall_interval_ms(),
                    "level up"
                );
            }
        }

        trace!(
            kind = active.kind.as_str(),
            x = active.x,
            y = active.y,
            cells_written,
            "locked"
        );
        self.last_event = Some(LockEvent {
            kind: active.kind,
            cells_written,
            lines_cleared,
            line_clear_score,
            level_up,
        });

        self.spawn_piece();
    }

    /// Toggle pause. Ignored after game over.
    ///
    /// The gravity accumulator restarts from zero either way, so time spent
    /// paused never turns into a burst of falls on resume. Hosts measuring wall
    /// time should resynchronise their frame clock at the same moment.
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.paused = !self.paused;
        self.fall_timer_ms = 0;
        debug!(paused = self.paused, "pause toggled");
        true
    }

    /// Replace the finished session with a fresh one. Only honoured after game over.
    ///
    /// The new session is seeded from the current RNG state, so consecutive games
    /// differ while a whole run stays reproducible from the first seed.
    pub fn restart(&mut self) -> bool {
        if !self.game_over {
            return false;
        }
        let config = GameConfig {
            seed: self.source.seed(),
            ..self.config
        };
        let episode = self.episode.wrapping_add(1);
        *self = Self::new(config);
        self.episode = episode;
        debug!(episode, seed = config.seed, "restarted");
        true
    }

    /// Advance gravity by `elapsed_ms` of host time.
    ///
    /// Each full fall interval moves the piece down one row, or locks it when it
    /// rests. Leftover time stays in the accumulator. Returns true if the piece
    /// moved or locked.
    pub fn update(&mut self, elapsed_ms: u32) -> bool {
        if !self.playable() {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        let mut stepped = false;

        loop {
            let interval = self.fall_interval_ms();
            if self.fall_timer_ms < interval {
                break;
            }
            self.fall_timer_ms -= interval;
            stepped = true;
            self.gravity_step();

            if self.game_over {
                self.fall_timer_ms = 0;
                break;
            }
        }

        stepped
    }

    fn gravity_step(&mut self) {
        let Some(active) = self.active else {
            return;
        };
        if active.fits_at(&self.board, 0, 1) {
            self.active = Some(Tetromino {
                y: active.y + 1,
                ..active
            });
        } else {
            self.lock_piece();
        }
    }

    /// Apply a host action. Returns true if state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Rotate => self.rotate(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => self.restart(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.fall_interval_ms = self.fall_interval_ms();
        out.episode = self.episode;
        out.pieces_locked = self.pieces_locked;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
