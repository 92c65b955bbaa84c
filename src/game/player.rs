//! Human and computer players, and the match loop that alternates them.

use std::io;

use rand::Rng;
use tracing::info;

use super::board::{Mark, Position, BOARD_SIZE};
use super::engine::{parse_coordinate, position_from, Game, GameStatus, MoveError};
use crate::cli::Console;

/// What a player did with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Moved(Position),
    /// Nothing to play; the board is unchanged.
    NoMove,
    /// Input ran out; the match is abandoned.
    Quit,
}

pub trait Player {
    /// Choose a cell and play it on `game`.
    fn take_turn(&mut self, game: &mut Game, console: &mut Console<'_>) -> io::Result<TurnOutcome>;
}

/// Reads row and column from the console until a legal move is entered.
#[derive(Debug, Clone, Default)]
pub struct HumanPlayer {
    user_name: Option<String>,
}

impl HumanPlayer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A player tied to a logged-in user, shown in the turn header.
    pub fn named(user_name: &str) -> Self {
        Self {
            user_name: Some(user_name.to_string()),
        }
    }

    /// Ask for one coordinate. `Ok(None)` means input ran out.
    fn read_coordinate(
        console: &mut Console<'_>,
        label: &str,
    ) -> io::Result<Option<Result<i64, MoveError>>> {
        let prompt = format!("Select {} (0 to {}): ", label, BOARD_SIZE - 1);
        Ok(console.prompt(&prompt)?.map(|line| parse_coordinate(&line)))
    }

    fn reject(game: &Game, console: &mut Console<'_>, err: MoveError) -> io::Result<()> {
        console.say(format!("Invalid move: {}. Try again.", err))?;
        console.show(game.board())
    }
}

impl Player for HumanPlayer {
    fn take_turn(&mut self, game: &mut Game, console: &mut Console<'_>) -> io::Result<TurnOutcome> {
        let mark = game.current_mark();
        loop {
            match &self.user_name {
                Some(name) => console.say(format!("Player {} turn (current player: {})", mark, name))?,
                None => console.say(format!("Player {} turn", mark))?,
            }

            // A bad row is rejected before the column is asked for
            let row = match Self::read_coordinate(console, "row")? {
                None => return Ok(TurnOutcome::Quit),
                Some(Ok(row)) => row,
                Some(Err(e)) => {
                    Self::reject(game, console, e)?;
                    continue;
                }
            };
            let col = match Self::read_coordinate(console, "column")? {
                None => return Ok(TurnOutcome::Quit),
                Some(Ok(col)) => col,
                Some(Err(e)) => {
                    Self::reject(game, console, e)?;
                    continue;
                }
            };

            let played = position_from(row, col).and_then(|pos| game.play(pos).map(|_| pos));
            match played {
                Ok(pos) => return Ok(TurnOutcome::Moved(pos)),
                Err(e) => Self::reject(game, console, e)?,
            }
        }
    }
}

/// Plays a uniformly random free cell.
#[derive(Debug, Clone)]
pub struct ComputerPlayer<R> {
    rng: R,
}

impl<R: Rng> ComputerPlayer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Player for ComputerPlayer<R> {
    fn take_turn(&mut self, game: &mut Game, console: &mut Console<'_>) -> io::Result<TurnOutcome> {
        match game.computer_move(&mut self.rng) {
            Some(pos) => {
                console.say("The computer has made its move.")?;
                Ok(TurnOutcome::Moved(pos))
            }
            None => {
                console.say("No moves available for the computer.")?;
                Ok(TurnOutcome::NoMove)
            }
        }
    }
}

/// Run one game, `x` opening. Returns the finished game; a status of
/// `InProgress` means it was abandoned.
pub fn play_match(
    x: &mut dyn Player,
    o: &mut dyn Player,
    console: &mut Console<'_>,
) -> io::Result<Game> {
    let mut game = Game::new();

    loop {
        console.show(game.board())?;
        let player: &mut dyn Player = match game.current_mark() {
            Mark::X => &mut *x,
            Mark::O => &mut *o,
        };

        let outcome = player.take_turn(&mut game, console)?;
        match game.status() {
            GameStatus::Won(mark) => {
                console.show(game.board())?;
                console.say(format!("Player {} wins!", mark))?;
                info!(winner = %mark, turns = game.turn() + 1, "game won");
                return Ok(game);
            }
            GameStatus::Draw => {
                console.show(game.board())?;
                console.say("It's a draw!")?;
                info!("game drawn");
                return Ok(game);
            }
            GameStatus::InProgress => {
                if let TurnOutcome::Moved(_) = outcome {
                    continue;
                }
                info!(turn = game.turn(), ?outcome, "game abandoned");
                return Ok(game);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Board;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn run(input: &str, x: &mut dyn Player, o: &mut dyn Player) -> (Game, String) {
        let mut out = Vec::new();
        let game = {
            let mut console = Console::new(Cursor::new(input.to_string()), &mut out);
            play_match(x, o, &mut console).unwrap()
        };
        (game, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_human_vs_human_top_row() {
        // X (0,0), O (1,0), X (0,1), O (1,1), X (0,2)
        let input = "0\n0\n1\n0\n0\n1\n1\n1\n0\n2\n";
        let (game, out) = run(input, &mut HumanPlayer::anonymous(), &mut HumanPlayer::anonymous());

        assert_eq!(game.status(), GameStatus::Won(Mark::X));
        assert!(out.contains("Player X wins!"));
        assert!(out.contains("X | X | X\n"));
    }

    #[test]
    fn test_out_of_range_is_reprompted() {
        // "3"/"0" rejected, then a real move, then input ends
        let input = "3\n0\n1\n1\n";
        let (game, out) = run(input, &mut HumanPlayer::anonymous(), &mut HumanPlayer::anonymous());

        assert!(out.contains("must be between 0 and 2, got 3"));
        assert_eq!(game.turn(), 1);
        assert_eq!(game.board().get(Position::new(1, 1).unwrap()), Some(Mark::X));
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_occupied_and_garbage_input() {
        // X (1,1); O tries (1,1), then row "a", then (0,0); then input ends on X
        let input = "1\n1\n1\n1\na\n0\n0\n";
        let (game, out) = run(input, &mut HumanPlayer::anonymous(), &mut HumanPlayer::anonymous());

        assert!(out.contains("already taken"));
        assert!(out.contains("enter a whole number"));
        assert_eq!(game.turn(), 2);
        assert_eq!(game.board().get(Position::new(0, 0).unwrap()), Some(Mark::O));
    }

    #[test]
    fn test_bad_row_skips_column_prompt() {
        let (game, out) = run("a\n0\n0\n", &mut HumanPlayer::anonymous(), &mut HumanPlayer::anonymous());

        assert_eq!(game.turn(), 1);
        assert_eq!(game.board().get(Position::new(0, 0).unwrap()), Some(Mark::X));
        assert_eq!(out.matches("Select row").count(), 3);
        // One column prompt for X's move, none after the bad row
        assert_eq!(out.matches("Select column").count(), 1);
    }

    #[test]
    fn test_rejected_move_redraws_board() {
        let per_board = Board::default().to_string().matches("------").count();

        // Start, after the rejection, before O's turn
        let (_, out) = run("a\n0\n0\n", &mut HumanPlayer::anonymous(), &mut HumanPlayer::anonymous());
        assert_eq!(out.matches("------").count(), 3 * per_board);

        // Same for an occupied cell: start, X moved, O rejected, O moved
        let (_, out) = run("0\n0\n0\n0\n1\n1\n", &mut HumanPlayer::anonymous(), &mut HumanPlayer::anonymous());
        assert_eq!(out.matches("------").count(), 4 * per_board);
    }

    #[test]
    fn test_eof_abandons_without_moving() {
        let (game, _) = run("", &mut HumanPlayer::anonymous(), &mut HumanPlayer::anonymous());
        assert_eq!(game.turn(), 0);
        assert_eq!(game.board().empty_cells().len(), 9);
    }

    #[test]
    fn test_human_vs_computer_finishes() {
        // The human walks every cell in order; taken ones are re-prompted
        let input: String = (0..3)
            .flat_map(|r| (0..3).map(move |c| format!("{}\n{}\n", r, c)))
            .collect();

        for seed in 0..20 {
            let mut human = HumanPlayer::named("ana");
            let mut computer = ComputerPlayer::new(StdRng::seed_from_u64(seed));
            let (game, out) = run(&input, &mut human, &mut computer);

            assert!(game.status().is_terminal(), "seed {}", seed);
            assert!(out.contains("(current player: ana)"));
            assert!(out.contains("The computer has made its move."));
        }
    }

    #[test]
    fn test_computer_vs_computer_fills_legally() {
        let mut x = ComputerPlayer::new(StdRng::seed_from_u64(3));
        let mut o = ComputerPlayer::new(StdRng::seed_from_u64(4));
        let (game, out) = run("", &mut x, &mut o);

        assert!(game.status().is_terminal());
        let moves = out.matches("The computer has made its move.").count();
        assert_eq!(moves, 9 - game.board().empty_cells().len());
    }
}
