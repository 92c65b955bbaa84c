use std::fmt;

pub const BOARD_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Mark that moves on a given turn. X always opens.
    pub fn for_turn(turn: u32) -> Self {
        if turn % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    pub fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A cell coordinate. Both fields are always below `BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Mark>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Option<Mark> {
        self.cells[pos.row][pos.col]
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Place a mark on an empty cell. Returns false and leaves the board alone
    /// if the cell is taken.
    pub(crate) fn place(&mut self, pos: Position, mark: Mark) -> bool {
        let cell = &mut self.cells[pos.row][pos.col];
        if cell.is_some() {
            return false;
        }
        *cell = Some(mark);
        true
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
            .filter(|pos| self.is_empty_at(*pos))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Any full row, column or diagonal of `mark`.
    pub fn check_win(&self, mark: Mark) -> bool {
        let is = |row: usize, col: usize| self.cells[row][col] == Some(mark);

        let rows = (0..BOARD_SIZE).any(|r| (0..BOARD_SIZE).all(|c| is(r, c)));
        let cols = (0..BOARD_SIZE).any(|c| (0..BOARD_SIZE).all(|r| is(r, c)));
        let diag = (0..BOARD_SIZE).all(|i| is(i, i));
        let anti = (0..BOARD_SIZE).all(|i| is(i, BOARD_SIZE - 1 - i));

        rows || cols || diag || anti
    }

    /// Build a board from rows like `"XO "`; anything but X/O is empty.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Board::new();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().take(BOARD_SIZE).enumerate() {
                board.cells[r][c] = match ch {
                    'X' => Some(Mark::X),
                    'O' => Some(Mark::O),
                    _ => None,
                };
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or_else(|| " ".to_string(), |m| m.to_string()))
                .collect();
            writeln!(f, "{}", cells.join(" | "))?;
            writeln!(f, "{}", "-".repeat(BOARD_SIZE * 2))?;
        }
        Ok(())
    }
}
