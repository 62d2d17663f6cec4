//! 3x3 grid geometry, marks and winning lines

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// Side length of the board
pub const BOARD_SIZE: usize = 3;

/// The eight index triples that win: rows, columns, diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player's symbol. X always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Contents of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Display text: "X", "O" or ""
    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::Marked(mark) => mark.symbol(),
        }
    }
}

/// Nine cells, row-major. Plain `Copy` data so search can branch on copies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: [Cell; CELL_COUNT],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from a compact string such as `"XOX OXO  O"`.
    /// `X`/`O` (either case) are marks; anything else is empty.
    pub fn parse(layout: &str) -> Option<Self> {
        let chars: Vec<char> = layout.chars().collect();
        if chars.len() != CELL_COUNT {
            return None;
        }
        let mut grid = Grid::new();
        for (i, c) in chars.into_iter().enumerate() {
            grid.cells[i] = match c {
                'X' | 'x' => Cell::Marked(Mark::X),
                'O' | 'o' => Cell::Marked(Mark::O),
                _ => Cell::Empty,
            };
        }
        Some(grid)
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Place a mark without any rule checks.
    /// Callers own validation; the move engine is the only caller on a live board.
    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = Cell::Marked(mark);
    }

    /// Copy of this grid with `mark` placed at `index`; None if `index` is off the board
    pub fn with_mark(mut self, index: usize, mark: Mark) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }
        self.set(index, mark);
        Some(self)
    }

    /// Empty cell indices in ascending order
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(i, _)| i)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn is_win(&self, mark: Mark) -> bool {
        self.winning_line(mark).is_some()
    }

    /// First completed line for `mark`, in `WINNING_LINES` order
    pub fn winning_line(&self, mark: Mark) -> Option<[usize; 3]> {
        let target = Cell::Marked(mark);
        WINNING_LINES
            .iter()
            .copied()
            .find(|line| line.iter().all(|&i| self.cells[i] == target))
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Marked(mark))
            .count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            let cells: Vec<String> = (0..BOARD_SIZE)
                .map(|col| {
                    let index = row * BOARD_SIZE + col;
                    match self.cells[index] {
                        Cell::Empty => format!(" {} ", index),
                        Cell::Marked(mark) => format!(" {} ", mark),
                    }
                })
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}
