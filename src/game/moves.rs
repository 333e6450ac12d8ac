use std::fmt;

/// A single ply: drop a disc into a column, or pop the bottom disc out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub column: usize,
    pub pop: bool,
}

impl Move {
    pub fn drop(column: usize) -> Self {
        Move { column, pop: false }
    }

    pub fn pop(column: usize) -> Self {
        Move { column, pop: true }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pop {
            write!(f, "pop column {}", self.column)
        } else {
            write!(f, "drop in column {}", self.column)
        }
    }
}
