//! Board grid, sides, and coordinates.
//!
//! The board is a row-major `width * height` array of [`Cell`]s. It is a plain
//! value: cloning produces an independent grid, so game states never alias.

use std::fmt;

use crate::constants::{DISK_A, DISK_B, EMPTY, MIN_SIDE};
use crate::error::{GameError, Result};

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    SideA,
    SideB,
}

impl Side {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::SideA => Side::SideB,
            Side::SideB => Side::SideA,
        }
    }

    /// Reporting code: 1 for SideA, 2 for SideB (0 is reserved for a draw).
    pub fn code(self) -> u8 {
        match self {
            Side::SideA => 1,
            Side::SideB => 2,
        }
    }

    fn symbol(self) -> char {
        match self {
            Side::SideA => DISK_A,
            Side::SideB => DISK_B,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::SideA => write!(f, "SideA"),
            Side::SideB => write!(f, "SideB"),
        }
    }
}

/// Content of a single square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Disk(Side),
}

impl Cell {
    /// The owning side, if any.
    #[inline]
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Disk(side) => Some(side),
        }
    }
}

/// A square on the board, addressed as (row, col).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step one square in direction `(dr, dc)`. Returns `None` below zero;
    /// the upper bound is the board's business.
    #[inline]
    pub fn offset(self, dr: isize, dc: isize) -> Option<Position> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Position { row, col })
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A rectangular Othello grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// An empty board.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// The opening position: a 2x2 block in the centre with SideA on the
    /// main diagonal.
    ///
    /// # Errors
    /// `InvalidDimensions` unless both sides are even and at least 4.
    pub fn standard(width: usize, height: usize) -> Result<Self> {
        if width < MIN_SIDE || height < MIN_SIDE || width % 2 != 0 || height % 2 != 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }
        Ok(Self::opening(width, height))
    }

    /// Opening layout without the dimension check. Only called with sizes
    /// of at least 2.
    pub(crate) fn opening(width: usize, height: usize) -> Self {
        let mut board = Self::new(width, height);
        let (r0, c0) = (height / 2 - 1, width / 2 - 1);
        board.set(Position::new(r0, c0), Cell::Disk(Side::SideA));
        board.set(Position::new(r0, c0 + 1), Cell::Disk(Side::SideB));
        board.set(Position::new(r0 + 1, c0), Cell::Disk(Side::SideB));
        board.set(Position::new(r0 + 1, c0 + 1), Cell::Disk(Side::SideA));
        board
    }

    /// Parse rows of `X` (SideA), `O` (SideB) and `.` (empty).
    /// Whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        if height == 0 {
            return Err(GameError::InvalidBoard("no rows".to_string()));
        }
        let mut cells = Vec::new();
        let mut width = None;
        for (r, row) in rows.iter().enumerate() {
            let mut count = 0;
            for ch in row.chars().filter(|c| !c.is_whitespace()) {
                let cell = match ch {
                    DISK_A => Cell::Disk(Side::SideA),
                    DISK_B => Cell::Disk(Side::SideB),
                    EMPTY => Cell::Empty,
                    other => {
                        return Err(GameError::InvalidBoard(format!(
                            "unexpected '{other}' in row {r}"
                        )));
                    }
                };
                cells.push(cell);
                count += 1;
            }
            match width {
                None => width = Some(count),
                Some(w) if w != count => {
                    return Err(GameError::InvalidBoard(format!(
                        "row {r} has {count} cells, expected {w}"
                    )));
                }
                Some(_) => {}
            }
        }
        let width = width.unwrap_or(0);
        if width == 0 {
            return Err(GameError::InvalidBoard("empty rows".to_string()));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
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
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    #[inline]
    fn idx(&self, pos: Position) -> usize {
        pos.row * self.width + pos.col
    }

    /// The cell at `pos`, or `None` off the board.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if !self.contains(pos) {
            return None;
        }
        Some(self.cells[self.idx(pos)])
    }

    /// Overwrite a cell. Off-board positions are ignored.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if self.contains(pos) {
            let i = self.idx(pos);
            self.cells[i] = cell;
        }
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every square with its content, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (Position::new(i / w, i % w), cell))
    }

    /// Positions of `side`'s disks, row-major.
    pub fn disks(&self, side: Side) -> impl Iterator<Item = Position> + '_ {
        self.iter()
            .filter(move |&(_, cell)| cell == Cell::Disk(side))
            .map(|(pos, _)| pos)
    }

    /// Number of disks owned by `side`.
    pub fn count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Disk(side))
            .count()
    }

    /// Number of empty squares.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Empty).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let ch = match self.cells[row * self.width + col] {
                    Cell::Disk(side) => side.symbol(),
                    Cell::Empty => EMPTY,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_opening_6x6() {
        let board = Board::standard(6, 6).unwrap();
        assert_eq!(board.get(Position::new(2, 2)), Some(Cell::Disk(Side::SideA)));
        assert_eq!(board.get(Position::new(2, 3)), Some(Cell::Disk(Side::SideB)));
        assert_eq!(board.get(Position::new(3, 2)), Some(Cell::Disk(Side::SideB)));
        assert_eq!(board.get(Position::new(3, 3)), Some(Cell::Disk(Side::SideA)));
        assert_eq!(board.count(Side::SideA), 2);
        assert_eq!(board.count(Side::SideB), 2);
        assert_eq!(board.empty_count(), 32);
    }

    #[test]
    fn test_standard_opening_8x8() {
        let board = Board::standard(8, 8).unwrap();
        assert_eq!(board.get(Position::new(3, 3)), Some(Cell::Disk(Side::SideA)));
        assert_eq!(board.get(Position::new(4, 4)), Some(Cell::Disk(Side::SideA)));
        assert_eq!(board.get(Position::new(3, 4)), Some(Cell::Disk(Side::SideB)));
    }

    #[test]
    fn test_standard_rejects_bad_dimensions() {
        assert!(matches!(
            Board::standard(5, 6),
            Err(GameError::InvalidDimensions { width: 5, height: 6 })
        ));
        assert!(Board::standard(2, 2).is_err());
    }

    #[test]
    fn test_get_off_board() {
        let board = Board::new(6, 6);
        assert_eq!(board.get(Position::new(6, 0)), None);
        assert_eq!(board.get(Position::new(0, 6)), None);
        assert_eq!(Position::new(0, 0).offset(-1, 0), None);
    }

    #[test]
    fn test_from_rows_matches_display() {
        let rows = ["......", "......", "..XO..", "..OX..", "......", "......"];
        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board, Board::standard(6, 6).unwrap());

        let text = board.to_string();
        let reparsed: Vec<&str> = text.lines().collect();
        assert_eq!(Board::from_rows(&reparsed).unwrap(), board);
    }

    #[test]
    fn test_from_rows_errors() {
        assert!(Board::from_rows(&[]).is_err());
        assert!(Board::from_rows(&["..", "..."]).is_err());
        assert!(Board::from_rows(&[".Z"]).is_err());
    }

    #[test]
    fn test_cells_and_iter_row_major() {
        let board = Board::from_rows(&["X..O", "....", ".OX.", "...."]).unwrap();
        let w = board.width();
        assert_eq!(board.cells().len(), w * board.height());
        for (i, &cell) in board.cells().iter().enumerate() {
            assert_eq!(board.get(Position::new(i / w, i % w)), Some(cell));
        }

        let squares: Vec<(Position, Cell)> = board.iter().collect();
        assert_eq!(squares.len(), 16);
        assert_eq!(squares[0], (Position::new(0, 0), Cell::Disk(Side::SideA)));
        assert_eq!(squares[3], (Position::new(0, 3), Cell::Disk(Side::SideB)));
        assert_eq!(squares[4], (Position::new(1, 0), Cell::Empty));
        assert_eq!(squares[10], (Position::new(2, 2), Cell::Disk(Side::SideA)));
        for (pos, cell) in squares {
            assert_eq!(board.get(pos), Some(cell));
        }
    }

    #[test]
    fn test_disks_row_major() {
        let board = Board::standard(6, 6).unwrap();
        let b: Vec<Position> = board.disks(Side::SideB).collect();
        assert_eq!(b, vec![Position::new(2, 3), Position::new(3, 2)]);
    }
}
