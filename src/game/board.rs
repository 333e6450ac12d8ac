use std::fmt;

use super::Player;
use crate::error::EngineError;

/// Smallest allowed number of rows or columns.
pub const MIN_DIMENSION: usize = 4;
/// Largest allowed number of rows or columns.
pub const MAX_DIMENSION: usize = 10;
/// Shortest allowed winning run.
pub const MIN_WIN_LENGTH: usize = 2;

/// Row/column steps for N, S, E, W, NE, SW, NW, SE.
const DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    /// The player owning this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::One => '1',
            Cell::Two => '2',
        }
    }

    fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '.' | '0' => Some(Cell::Empty),
            '1' => Some(Cell::One),
            '2' => Some(Cell::Two),
            _ => None,
        }
    }
}

/// A `rows × cols` grid. Row 0 is the bottom; discs rest on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Parse a picture of the board, top row first.
    ///
    /// Each string is one row; `.` (or `0`) is empty, `1` and `2` are discs.
    /// Whitespace inside a row is ignored so rows can be spaced out.
    pub fn from_rows(rows: &[&str]) -> Result<Self, EngineError> {
        let parsed = rows
            .iter()
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| {
                        Cell::from_symbol(c).ok_or_else(|| {
                            EngineError::MalformedGrid(format!("unknown cell symbol '{c}'"))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cols = parsed.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(EngineError::MalformedGrid("board has no cells".into()));
        }
        if let Some(bad) = parsed.iter().position(|row| row.len() != cols) {
            return Err(EngineError::MalformedGrid(format!(
                "row {bad} from the top has {} cells, expected {cols}",
                parsed[bad].len()
            )));
        }

        let mut board = Board::new(parsed.len(), cols);
        for (offset, row) in parsed.into_iter().enumerate() {
            let r = board.rows - 1 - offset;
            for (c, cell) in row.into_iter().enumerate() {
                board.set(r, c, cell);
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position
    /// Row 0 is the bottom, row `rows - 1` is the top
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    /// Whether a disc can still be dropped into `col`
    pub fn has_room(&self, col: usize) -> bool {
        col < self.cols && self.get(self.rows - 1, col) == Cell::Empty
    }

    /// The disc resting on row 0 of `col` (Empty for an empty or unknown column)
    pub fn bottom(&self, col: usize) -> Cell {
        if col >= self.cols {
            return Cell::Empty;
        }
        self.get(0, col)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| !self.has_room(col))
    }

    /// Drop a disc into the lowest empty cell of `col`, returning its row.
    /// Returns `None` when the column is full or out of range.
    pub(crate) fn drop_piece(&mut self, col: usize, cell: Cell) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        let row = (0..self.rows).find(|&row| self.get(row, col) == Cell::Empty)?;
        self.set(row, col, cell);
        Some(row)
    }

    /// Remove the bottom disc of `col`, shifting everything above it down one row.
    /// Returns the removed cell.
    pub(crate) fn pop_piece(&mut self, col: usize) -> Cell {
        let removed = self.get(0, col);
        for row in 0..self.rows - 1 {
            let above = self.get(row + 1, col);
            self.set(row, col, above);
        }
        self.set(self.rows - 1, col, Cell::Empty);
        removed
    }

    /// First disc (row-major from the bottom) floating above an empty cell
    pub fn floating_disc(&self) -> Option<(usize, usize)> {
        (1..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .find(|&(row, col)| {
                self.get(row, col) != Cell::Empty && self.get(row - 1, col) == Cell::Empty
            })
    }

    /// Whether `win_length` cells starting at (row, col) and stepping by
    /// `(dr, dc)` are in bounds and all owned by the origin's player.
    fn run_from(
        &self,
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
        win_length: usize,
    ) -> bool {
        let origin = self.get(row, col);
        (1..win_length).all(|k| {
            let r = row as isize + dr * k as isize;
            let c = col as isize + dc * k as isize;
            r >= 0
                && c >= 0
                && (r as usize) < self.rows
                && (c as usize) < self.cols
                && self.get(r as usize, c as usize) == origin
        })
    }

    /// The owner of the first winning run found, scanning cells row-major from
    /// the bottom and then each direction in turn.
    pub fn find_run(&self, win_length: usize) -> Option<Player> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let Some(player) = self.get(row, col).owner() else {
                    continue;
                };
                if DIRECTIONS
                    .iter()
                    .any(|&dir| self.run_from(row, col, dir, win_length))
                {
                    return Some(player);
                }
            }
        }
        None
    }

    /// Whether `player` has at least one run of `win_length` anywhere
    pub fn has_run(&self, player: Player, win_length: usize) -> bool {
        let cell = player.to_cell();
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .filter(|&(row, col)| self.get(row, col) == cell)
            .any(|(row, col)| {
                DIRECTIONS
                    .iter()
                    .any(|&dir| self.run_from(row, col, dir, win_length))
            })
    }
}

impl fmt::Display for Board {
    /// Text rendering with the top row first, one `|`-separated line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(self.cols * 2 + 1);
        for row in (0..self.rows).rev() {
            writeln!(f, "{separator}")?;
            for col in 0..self.cols {
                write!(f, "|{}", self.get(row, col).symbol())?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{separator}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(6, 7);
        for row in 0..6 {
            for col in 0..7 {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert!(!board.is_full());
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new(6, 7);

        // Drop first piece in column 3
        let row = board.drop_piece(3, Cell::One).unwrap();
        assert_eq!(row, 0); // Should land at bottom
        assert_eq!(board.get(0, 3), Cell::One);

        // Drop second piece in same column
        let row = board.drop_piece(3, Cell::Two).unwrap();
        assert_eq!(row, 1);
        assert_eq!(board.get(1, 3), Cell::Two);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new(4, 4);
        for _ in 0..4 {
            board.drop_piece(0, Cell::One).unwrap();
        }
        assert!(!board.has_room(0));
        assert_eq!(board.drop_piece(0, Cell::Two), None);
    }

    #[test]
    fn test_board_fills_up() {
        let mut board = Board::new(4, 4);
        for col in 0..4 {
            for _ in 0..4 {
                assert!(!board.is_full());
                board.drop_piece(col, Cell::Two).unwrap();
            }
        }
        assert!(board.is_full());

        board.pop_piece(2);
        assert!(!board.is_full());
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new(6, 7);
        assert_eq!(board.drop_piece(7, Cell::One), None);
        assert!(!board.has_room(7));
        assert_eq!(board.bottom(7), Cell::Empty);
    }

    #[test]
    fn test_pop_shifts_column_down() {
        let mut board = Board::from_rows(&[
            "....", //
            "2...",
            "1...",
            "2...",
        ])
        .unwrap();

        assert_eq!(board.pop_piece(0), Cell::Two);
        assert_eq!(board.get(0, 0), Cell::One);
        assert_eq!(board.get(1, 0), Cell::Two);
        assert_eq!(board.get(2, 0), Cell::Empty);
        assert_eq!(board.get(3, 0), Cell::Empty);
    }

    #[test]
    fn test_pop_full_column_empties_top() {
        let mut board = Board::from_rows(&["1...", "2...", "1...", "2..."]).unwrap();
        board.pop_piece(0);
        assert_eq!(board.get(3, 0), Cell::Empty);
        assert_eq!(board.get(2, 0), Cell::One);
    }

    #[test]
    fn test_from_rows_orientation() {
        let board = Board::from_rows(&[
            "2...", // top
            "....",
            "....",
            "1...", // bottom
        ])
        .unwrap();
        assert_eq!(board.rows(), 4);
        assert_eq!(board.cols(), 4);
        assert_eq!(board.get(0, 0), Cell::One);
        assert_eq!(board.get(3, 0), Cell::Two);
        assert_eq!(board.floating_disc(), Some((3, 0)));
    }

    #[test]
    fn test_from_rows_rejects_ragged_and_unknown() {
        assert!(matches!(
            Board::from_rows(&["....", "..."]),
            Err(EngineError::MalformedGrid(_))
        ));
        assert!(matches!(
            Board::from_rows(&["..x."]),
            Err(EngineError::MalformedGrid(_))
        ));
        assert!(matches!(Board::from_rows(&[]), Err(EngineError::MalformedGrid(_))));
    }

    #[test]
    fn test_horizontal_run() {
        let board = Board::from_rows(&["....", "....", "....", "1111"]).unwrap();
        assert_eq!(board.find_run(4), Some(Player::One));
        assert!(board.has_run(Player::One, 4));
        assert!(!board.has_run(Player::Two, 4));
    }

    #[test]
    fn test_vertical_run() {
        let board = Board::from_rows(&["....", ".2..", ".2..", ".21."]).unwrap();
        assert_eq!(board.find_run(3), Some(Player::Two));
        assert_eq!(board.find_run(4), None);
    }

    #[test]
    fn test_diagonal_runs() {
        let up = Board::from_rows(&["...1", "..12", ".122", "1222"]).unwrap();
        assert!(up.has_run(Player::One, 4));

        let down = Board::from_rows(&["1...", "21..", "221.", "2221"]).unwrap();
        assert!(down.has_run(Player::One, 4));
    }

    #[test]
    fn test_run_must_stay_in_bounds() {
        // Three in a row at the right edge never wraps onto the next row
        let board = Board::from_rows(&["....", "....", "1...", ".111"]).unwrap();
        assert_eq!(board.find_run(4), None);
    }

    #[test]
    fn test_win_length_two() {
        let board = Board::from_rows(&["....", "....", "....", "12.."]).unwrap();
        assert_eq!(board.find_run(2), None);
        let board = Board::from_rows(&["....", "....", "2...", "12.."]).unwrap();
        assert_eq!(board.find_run(2), Some(Player::Two));
    }

    #[test]
    fn test_display_top_row_first() {
        let board = Board::from_rows(&["....", "....", "2...", "1..2"]).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "---------");
        assert_eq!(lines[5], "|2|.|.|.|");
        assert_eq!(lines[7], "|1|.|.|2|");
    }
}
