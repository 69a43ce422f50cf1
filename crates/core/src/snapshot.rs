use serde::{Deserialize, Serialize};

use crate::game_state::Tetromino;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Board coordinates of the four minos (may include rows above the board)
    pub minos: [(i8, i8); 4],
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        let mut minos = [(0i8, 0i8); 4];
        for (slot, (dx, dy)) in minos.iter_mut().zip(value.shape().minos()) {
            *slot = (value.x + dx, value.y + dy);
        }
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            minos,
        }
    }
}

/// Read-only view of a game for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub paused: bool,
    pub game_over: bool,
    pub episode_id: u32,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Cell to draw at (x, y): the active piece over the board
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        if let Some(active) = self.active {
            if active
                .minos
                .iter()
                .any(|&(mx, my)| mx as isize == x as isize && my as isize == y as isize)
            {
                return Some(active.kind);
            }
        }
        self.board.get(y).and_then(|row| row.get(x)).copied().flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: PieceKind::I,
            score: 0,
            high_score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
            paused: false,
            game_over: false,
            episode_id: 0,
            seed: 0,
        }
    }
}
