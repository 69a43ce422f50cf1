//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, RNG, and scoring.
//! It is the only writer of game state: gravity advances through [`GameState::tick`]
//! and player input through [`GameState::apply_command`]. Every call either applies
//! fully or leaves the state untouched, so callers only ever observe consistent states.
//!
//! Time is supplied by the caller as a monotonic millisecond timestamp; the state never
//! schedules itself.

use crate::board::Board;
use crate::pieces::{get_shape, spawn_position, try_rotate, ShapeMatrix};
use crate::rng::PieceQueue;
use crate::scoring::{calculate_score, get_drop_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at its canonical spawn position
    pub fn new(kind: PieceKind) -> Self {
        let (x, y) = spawn_position(kind);
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Shape matrix for the current rotation
    pub fn shape(&self) -> &'static ShapeMatrix {
        get_shape(self.kind, self.rotation)
    }

    /// Check if the piece fits the board where it is
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid_position(self.shape(), self.x, self.y)
    }

    /// Check if the piece is resting on something (the next step down is invalid)
    pub fn is_grounded(&self, board: &Board) -> bool {
        !board.is_valid_position(self.shape(), self.x, self.y + 1)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    piece_queue: PieceQueue,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Pieces written into the board this episode.
    pieces_locked: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<StepEvent>,
    score: u32,
    high_score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    /// Timestamp of the last gravity step.
    last_drop_ms: u64,
    /// Latest timestamp seen by `tick` or `start`.
    last_tick_ms: u64,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            piece_queue: PieceQueue::new(seed),
            episode_id: 0,
            pieces_locked: 0,
            last_event: None,
            score: 0,
            high_score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: get_drop_interval_ms(1),
            last_drop_ms: 0,
            last_tick_ms: 0,
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self, now_ms: u64) {
        if self.started {
            return;
        }
        self.started = true;
        self.last_tick_ms = now_ms;
        self.last_drop_ms = now_ms;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Record the best score known to the host (never lowers it)
    pub fn set_high_score(&mut self, high_score: u32) {
        self.high_score = self.high_score.max(high_score);
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn last_drop_ms(&self) -> u64 {
        self.last_drop_ms
    }

    pub fn next_piece(&self) -> PieceKind {
        self.piece_queue.peek()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seed(&self) -> u32 {
        self.piece_queue.seed()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.piece_queue.peek();
        out.score = self.score;
        out.high_score = self.high_score.max(self.score);
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.seed = self.piece_queue.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the queued piece to active and queue a new one.
    ///
    /// If the spawn position is already blocked the game ends and no piece is active.
    fn spawn_piece(&mut self) -> bool {
        let piece = Tetromino::new(self.piece_queue.draw());

        if !piece.is_valid(&self.board) {
            self.active = None;
            self.game_over = true;
            return false;
        }

        self.active = Some(piece);
        true
    }

    fn can_control(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = Tetromino {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        };
        if !moved.is_valid(&self.board) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    /// Try to rotate the active piece clockwise, kicking one column left or right if needed
    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let result = try_rotate(active.kind, active.rotation, active.x, active.y, |shape, x, y| {
            self.board.is_valid_position(shape, x, y)
        });

        match result {
            Some((rotation, x)) => {
                self.active = Some(Tetromino {
                    rotation,
                    x,
                    ..active
                });
                true
            }
            None => false,
        }
    }

    /// Drop the active piece as far as it goes, then lock it
    pub(crate) fn hard_drop(&mut self) -> StepEvent {
        if self.active.is_none() {
            return StepEvent::default();
        }

        while self.try_move(0, 1) {}

        // The next piece gets a full gravity interval
        self.last_drop_ms = self.last_tick_ms;
        self.lock_piece()
    }

    /// Lock the active piece onto the board: clear lines, score, spawn the next piece
    fn lock_piece(&mut self) -> StepEvent {
        let Some(active) = self.active.take() else {
            return StepEvent::default();
        };

        self.board
            .place_piece(active.shape(), active.x, active.y, active.kind);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let full_rows = self.board.find_full_rows();
        let lines_cleared = self.board.clear_rows(&full_rows);

        let result = calculate_score(lines_cleared, self.level, self.lines);
        self.score = self.score.saturating_add(result.points);
        self.lines = result.lines;
        self.level = result.level;
        self.drop_interval_ms = result.drop_interval_ms;

        self.spawn_piece();
        if self.game_over {
            self.high_score = self.high_score.max(self.score);
        }

        let event = StepEvent {
            moved: true,
            locked: true,
            lines_cleared: lines_cleared as u32,
            game_over: self.game_over,
        };
        self.last_event = Some(event);
        event
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<StepEvent> {
        self.last_event.take()
    }

    /// Check if the active piece is on the ground
    pub fn is_grounded(&self) -> bool {
        match self.active {
            Some(ref piece) => piece.is_grounded(&self.board),
            None => false,
        }
    }

    /// Gravity tick.
    ///
    /// Does nothing until `drop_interval_ms` has elapsed since the last gravity step.
    /// Then the piece moves down one row, or locks if it cannot.
    pub fn tick(&mut self, now_ms: u64) -> StepEvent {
        let idle = StepEvent {
            game_over: self.game_over,
            ..StepEvent::default()
        };
        if !self.started || self.game_over {
            return idle;
        }

        self.last_tick_ms = self.last_tick_ms.max(now_ms);

        if self.paused {
            // Keep gravity armed so resuming does not drop straight away
            self.last_drop_ms = self.last_tick_ms;
            return idle;
        }

        if now_ms.saturating_sub(self.last_drop_ms) < self.drop_interval_ms as u64 {
            return idle;
        }
        self.last_drop_ms = now_ms;

        if self.try_move(0, 1) {
            return StepEvent {
                moved: true,
                ..idle
            };
        }

        self.lock_piece()
    }

    /// Apply a player command
    pub fn apply_command(&mut self, command: Command) -> StepEvent {
        if command.is_movement() && !self.can_control() {
            return StepEvent {
                game_over: self.game_over,
                ..StepEvent::default()
            };
        }

        let moved = match command {
            Command::MoveLeft => self.try_move(-1, 0),
            Command::MoveRight => self.try_move(1, 0),
            Command::SoftDrop => self.try_move(0, 1),
            Command::Rotate => self.try_rotate(),
            Command::HardDrop => return self.hard_drop(),
            Command::Pause => {
                if !self.started || self.game_over {
                    false
                } else {
                    self.paused = !self.paused;
                    true
                }
            }
            Command::Restart => {
                self.restart();
                true
            }
        };

        StepEvent {
            moved,
            game_over: self.game_over,
            ..StepEvent::default()
        }
    }

    /// Start a fresh episode, continuing the RNG stream and keeping the high score
    fn restart(&mut self) {
        let next_episode = self.episode_id.wrapping_add(1);
        let high_score = self.high_score.max(self.score);
        let now_ms = self.last_tick_ms;

        *self = Self::new(self.piece_queue.seed());
        self.episode_id = next_episode;
        self.high_score = high_score;
        self.start(now_ms);
    }

    /// Check if piece can move in given direction
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        self.board
            .is_valid_position(active.shape(), active.x + dx, active.y + dy)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
