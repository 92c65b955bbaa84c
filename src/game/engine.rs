//! Turn order and win/draw detection.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use super::board::{Board, Mark, Position, BOARD_SIZE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won(Mark),
    Draw,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("invalid input '{0}', enter a whole number")]
    NotANumber(String),
    #[error("row and column must be between 0 and 2, got {0}")]
    OutOfRange(i64),
    #[error("cell {0} is already taken")]
    Occupied(Position),
    #[error("the game is already over")]
    GameOver,
}

/// Parse one coordinate as typed. Range is checked later by [`position_from`].
pub fn parse_coordinate(input: &str) -> Result<i64, MoveError> {
    let input = input.trim();
    input.parse().map_err(|_| MoveError::NotANumber(input.to_string()))
}

/// Range-check a row and column. The row is reported first when both are off.
pub fn position_from(row: i64, col: i64) -> Result<Position, MoveError> {
    let in_range = |v: i64| {
        usize::try_from(v)
            .ok()
            .filter(|v| *v < BOARD_SIZE)
            .ok_or(MoveError::OutOfRange(v))
    };
    let (r, c) = (in_range(row)?, in_range(col)?);
    Position::new(r, c).ok_or(MoveError::OutOfRange(row))
}

/// One game from empty board to a terminal state.
#[derive(Debug, Clone, Default)]
pub struct Game {
    board: Board,
    turn: u32,
    status: GameStatus,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Mark whose move it is.
    pub fn current_mark(&self) -> Mark {
        Mark::for_turn(self.turn)
    }

    /// Place the current mark. On error nothing changes, turn included.
    pub fn play(&mut self, pos: Position) -> Result<GameStatus, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        let mark = self.current_mark();
        if !self.board.place(pos, mark) {
            return Err(MoveError::Occupied(pos));
        }

        self.status = if self.board.check_win(mark) {
            GameStatus::Won(mark)
        } else if self.board.is_full() {
            GameStatus::Draw
        } else {
            self.turn += 1;
            GameStatus::InProgress
        };
        Ok(self.status)
    }

    /// Play a uniformly random empty cell for the current mark.
    ///
    /// Returns `None` without touching the board when no cell is free or the
    /// game is over.
    pub fn computer_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Position> {
        if self.status.is_terminal() {
            return None;
        }
        let pos = *self.board.empty_cells().choose(rng)?;
        self.play(pos).ok().map(|_| pos)
    }

    #[cfg(test)]
    pub(crate) fn from_board(board: Board, turn: u32) -> Self {
        Self {
            board,
            turn,
            status: GameStatus::InProgress,
        }
    }
}
