use super::board::{MAX_DIMENSION, MIN_DIMENSION, MIN_WIN_LENGTH};
use super::{Board, Cell, Move, Player};
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Winner(Player),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    /// Human-readable result line
    pub fn message(self) -> String {
        match self {
            Outcome::InProgress => "Game in progress".to_string(),
            Outcome::Winner(player) => format!("{} wins!", player.name()),
            Outcome::Draw => "It's a draw!".to_string(),
        }
    }
}

/// The live game: board, win length and the player to move.
///
/// Cloning is a deep copy; simulations never share storage with the
/// original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    win_length: usize,
    current_player: Player,
}

/// Validate rows, cols and win length against the allowed bounds.
pub fn check_dimensions(rows: usize, cols: usize, win_length: usize) -> Result<(), EngineError> {
    let dims = MIN_DIMENSION..=MAX_DIMENSION;
    let wins = MIN_WIN_LENGTH..=rows.max(cols);
    if dims.contains(&rows) && dims.contains(&cols) && wins.contains(&win_length) {
        Ok(())
    } else {
        Err(EngineError::InvalidDimensions {
            rows,
            cols,
            win_length,
        })
    }
}

impl GameState {
    /// Create an empty game with Player 1 to move
    pub fn new(rows: usize, cols: usize, win_length: usize) -> Result<Self, EngineError> {
        check_dimensions(rows, cols, win_length)?;
        Ok(GameState {
            board: Board::new(rows, cols),
            win_length,
            current_player: Player::One,
        })
    }

    /// Set up an arbitrary position. The board must respect the dimension
    /// bounds and have no disc floating above an empty cell.
    pub fn from_board(board: Board, win_length: usize, turn: Player) -> Result<Self, EngineError> {
        check_dimensions(board.rows(), board.cols(), win_length)?;
        if let Some((row, col)) = board.floating_disc() {
            return Err(EngineError::MalformedGrid(format!(
                "disc at row {row}, column {col} is floating above an empty cell"
            )));
        }
        Ok(GameState {
            board,
            win_length,
            current_player: turn,
        })
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn cols(&self) -> usize {
        self.board.cols()
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Hand the move to `player` without playing anything. Used by search to
    /// ask "what if the opponent played here".
    pub(crate) fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
    }

    /// Whether the player to move may play `mv`
    pub fn is_legal(&self, mv: Move) -> bool {
        if mv.column >= self.cols() {
            return false;
        }
        if mv.pop {
            self.board.bottom(mv.column) == self.current_player.to_cell()
        } else {
            self.board.has_room(mv.column)
        }
    }

    /// Every legal move, column by column, drop before pop
    pub fn legal_moves(&self) -> Vec<Move> {
        (0..self.cols())
            .flat_map(|col| [Move::drop(col), Move::pop(col)])
            .filter(|&mv| self.is_legal(mv))
            .collect()
    }

    /// Apply a move in place and pass the turn.
    ///
    /// An illegal move leaves the state untouched.
    pub fn apply(&mut self, mv: Move) -> Result<(), EngineError> {
        if !self.is_legal(mv) {
            return Err(EngineError::IllegalMove(mv));
        }
        self.play_unchecked(mv);
        Ok(())
    }

    /// Apply `mv` for the player to move without checking ownership of a
    /// popped disc. The column must be in range, and have room for a drop.
    pub(crate) fn play_unchecked(&mut self, mv: Move) {
        if mv.pop {
            self.board.pop_piece(mv.column);
        } else {
            self.board.drop_piece(mv.column, self.current_player.to_cell());
        }
        self.current_player = self.current_player.other();
    }

    /// Win, draw or keep going.
    ///
    /// A draw is only declared when the player to move has nothing to play;
    /// the other player's options do not matter.
    pub fn evaluate(&self) -> Outcome {
        if let Some(winner) = self.board.find_run(self.win_length) {
            return Outcome::Winner(winner);
        }

        let mover = self.current_player.to_cell();
        let can_move = !self.board.is_full()
            || (0..self.cols()).any(|col| self.board.bottom(col) == mover);
        if can_move {
            Outcome::InProgress
        } else {
            Outcome::Draw
        }
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.evaluate().is_terminal()
    }

    /// Number of discs on the board
    pub fn disc_count(&self) -> usize {
        (0..self.rows())
            .flat_map(|row| (0..self.cols()).map(move |col| (row, col)))
            .filter(|&(row, col)| self.board.get(row, col) != Cell::Empty)
            .count()
    }
}
