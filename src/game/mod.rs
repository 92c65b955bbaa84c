//! Tic-tac-toe on a fixed 3x3 board.

pub mod board;
pub mod engine;
pub mod player;

pub use board::{Board, Mark, Position, BOARD_SIZE};
pub use engine::{parse_coordinate, position_from, Game, GameStatus, MoveError};
pub use player::{play_match, ComputerPlayer, HumanPlayer, Player, TurnOutcome};
