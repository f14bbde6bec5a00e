//! Board representation and move primitives.
//!
//! The board is a row-major grid where row 0 is the top. Pieces fall to the
//! lowest empty cell of a column, so within any column the empty cells always
//! form a contiguous run starting at row 0. Every mutator here preserves that.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The cell state this player's pieces occupy.
    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::Player1,
            Player::Two => Cell::Player2,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Player> {
        match n {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Player1,
    Player2,
}

impl Cell {
    /// The player owning this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Player1 => Some(Player::One),
            Cell::Player2 => Some(Player::Two),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player1 => 'X',
            Cell::Player2 => 'O',
        }
    }
}

/// Errors produced while building a board from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board must have at least one row and one column")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell {symbol:?} at row {row}, column {col}")]
    UnknownCell { symbol: char, row: usize, col: usize },

    #[error("piece at row {row}, column {col} is floating above an empty cell")]
    Floating { row: usize, col: usize },
}

/// A fixed-size gravity board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Both dimensions must be non-zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Parse a board from rows listed top to bottom.
    ///
    /// `.` is empty, `X` or `1` is player one, `O` or `2` is player two.
    /// Whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let parsed: Vec<Vec<char>> = rows
            .iter()
            .map(|r| r.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();

        let width = parsed.first().map(Vec::len).unwrap_or(0);
        if parsed.is_empty() || width == 0 {
            return Err(BoardError::Empty);
        }

        let mut board = Board::new(width, parsed.len());
        for (row, symbols) in parsed.iter().enumerate() {
            if symbols.len() != width {
                return Err(BoardError::Ragged {
                    row,
                    expected: width,
                    found: symbols.len(),
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                let cell = match symbol {
                    '.' => Cell::Empty,
                    'X' | 'x' => Cell::Player1,
                    'O' | 'o' => Cell::Player2,
                    _ => symbol
                        .to_digit(10)
                        .and_then(|n| Player::from_number(n as u8))
                        .map(Player::cell)
                        .ok_or(BoardError::UnknownCell { symbol, row, col })?,
                };
                let i = board.idx(row, col);
                board.cells[i] = cell;
            }
        }

        for col in 0..width {
            for row in 0..board.height - 1 {
                if board.get(row, col) != Cell::Empty && board.get(row + 1, col) == Cell::Empty {
                    return Err(BoardError::Floating { row, col });
                }
            }
        }

        Ok(board)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Cell at `(row, col)`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        debug_assert!(row < self.height && col < self.width);
        self.cells[self.idx(row, col)]
    }

    /// Cell at signed coordinates, or `None` if off the board.
    #[inline]
    pub fn get_checked(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(self.get(row as usize, col as usize))
    }

    /// A column accepts a move while its top cell is empty.
    #[inline]
    pub fn can_make_move(&self, col: usize) -> bool {
        debug_assert!(col < self.width, "column {col} out of range");
        self.cells[col] == Cell::Empty
    }

    /// Number of pieces stacked in `col`.
    pub fn column_height(&self, col: usize) -> usize {
        (0..self.height)
            .rev()
            .take_while(|&row| self.get(row, col) != Cell::Empty)
            .count()
    }

    /// Drop a piece for `player` into `col` and return where it landed.
    ///
    /// The column must not be full.
    pub fn make_move(&mut self, col: usize, player: Player) -> (usize, usize) {
        debug_assert!(self.can_make_move(col), "column {col} is full");
        let mut row = 0;
        while row < self.height && self.get(row, col) == Cell::Empty {
            row += 1;
        }
        let i = self.idx(row - 1, col);
        self.cells[i] = player.cell();
        (row - 1, col)
    }

    /// Remove the topmost piece of `col`.
    ///
    /// Only valid right after the matching `make_move` on the same column.
    pub fn unmake_move(&mut self, col: usize) {
        let mut row = 0;
        while row < self.height && self.get(row, col) == Cell::Empty {
            row += 1;
        }
        debug_assert!(row < self.height, "column {col} is already empty");
        let i = self.idx(row, col);
        self.cells[i] = Cell::Empty;
    }

    /// Legal columns, left to right.
    pub fn legal_moves(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.width).filter(|&col| self.can_make_move(col))
    }

    pub fn is_full(&self) -> bool {
        self.cells[..self.width].iter().all(|&c| c != Cell::Empty)
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Overwrite this board with `other`, reusing the existing allocation.
    pub fn copy_from(&mut self, other: &Board) {
        self.width = other.width;
        self.height = other.height;
        self.cells.clear();
        self.cells.extend_from_slice(&other.cells);
    }

    /// Horizontal mirror image of this board.
    pub fn mirrored(&self) -> Board {
        let mut out = Board::new(self.width, self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                let i = out.idx(row, self.width - 1 - col);
                out.cells[i] = self.get(row, col);
            }
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                write!(f, "{} ", self.get(row, col).symbol())?;
            }
            writeln!(f)?;
        }
        for col in 0..self.width {
            write!(f, "{} ", col % 10)?;
        }
        writeln!(f)
    }
}
