use colored::Colorize;
use itertools::Itertools;
use std::collections::HashSet;

const N: usize = 9;

#[derive(Debug, Clone)]
pub struct Sudoku {
    rows: [[Option<u8>; N]; N],
    pub state: SudokuState,
    iterations: usize,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SudokuState {
    Unsolved,
    Solved,
    /// Every candidate branch failed.
    Exhausted,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SudokuError {
    InvalidSize,
    ValueOutOfRange(u8),
    InvalidChar(char),
    /// A fixed value breaks a row, column or box constraint.
    InvalidBoard,
    NoSolution,
}

impl std::fmt::Display for SudokuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SudokuError::InvalidSize => write!(f, "Board must be 9x9"),
            SudokuError::ValueOutOfRange(value) => write!(f, "Value out of range: {value}"),
            SudokuError::InvalidChar(c) => write!(f, "Invalid char: {c}"),
            SudokuError::InvalidBoard => write!(f, "Invalid board"),
            SudokuError::NoSolution => write!(f, "No solution found"),
        }
    }
}

impl std::error::Error for SudokuError {}

fn grid_range() -> impl Iterator<Item = (usize, usize)> {
    (0..N).cartesian_product(0..N)
}

impl Sudoku {
    /// Copies the given cells; values outside 1-9 are rejected.
    /// Conflicting givens are accepted and surface through `is_valid`.
    pub fn new(rows: [[Option<u8>; N]; N]) -> Result<Self, SudokuError> {
        for &value in rows.iter().flatten().flatten() {
            if !(1..=9).contains(&value) {
                return Err(SudokuError::ValueOutOfRange(value));
            }
        }
        Ok(Self {
            rows,
            state: SudokuState::Unsolved,
            iterations: 0,
        })
    }

    pub fn from_text(text: &str) -> Result<Self, SudokuError> {
        let mut rows: [[Option<u8>; N]; N] = [[None; N]; N];
        for (i, line) in text.lines().enumerate() {
            if i >= N {
                return Err(SudokuError::InvalidSize);
            }
            for (j, c) in line.chars().enumerate() {
                if j >= N {
                    return Err(SudokuError::InvalidSize);
                }
                match c {
                    ' ' | '.' => {}
                    c => {
                        let value = c.to_digit(10).ok_or(SudokuError::InvalidChar(c))? as u8;
                        if value == 0 {
                            return Err(SudokuError::ValueOutOfRange(value));
                        }
                        rows[i][j] = Some(value);
                    }
                }
            }
        }
        Self::new(rows)
    }

    pub fn is_solved(&self) -> bool {
        matches!(self.state, SudokuState::Solved)
    }

    /// Recursive calls made by the last `solve` run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.rows[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.rows[row][col] = Some(value);
    }

    pub fn clear(&mut self, row: usize, col: usize) {
        self.rows[row][col] = None;
    }

    /// Walks all 81 cells in row-major order; re-querying re-walks the grid.
    pub fn values(&self) -> impl Iterator<Item = Option<u8>> + '_ {
        grid_range().map(|(row, col)| self.rows[row][col])
    }

    pub fn is_full(&self) -> bool {
        !self.values().any(|cell| cell.is_none())
    }

    /// Checks each occupied cell against its own row, column and box.
    pub fn is_valid(&self) -> bool {
        grid_range().all(|(row, col)| match self.rows[row][col] {
            None => true,
            Some(value) => (1..=9).contains(&value) && self.is_cell_valid(row, col),
        })
    }

    pub fn is_complete(&self) -> bool {
        self.is_full() && self.is_valid()
    }

    pub fn is_cell_valid(&self, row: usize, col: usize) -> bool {
        let value = match self.rows[row][col] {
            Some(value) => value,
            None => return true,
        };
        !self.row_values(row, col, true).contains(&value)
            && !self.col_values(row, col, true).contains(&value)
            && !self.box_values(row, col, true).contains(&value)
    }

    fn row_values(&self, row: usize, col: usize, except_cell: bool) -> Vec<u8> {
        self.rows[row]
            .iter()
            .enumerate()
            .filter(|(c, _)| !except_cell || *c != col)
            .filter_map(|(_, x)| *x)
            .collect_vec()
    }

    fn col_values(&self, row: usize, col: usize, except_cell: bool) -> Vec<u8> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(r, _)| !except_cell || *r != row)
            .filter_map(|(_, line)| line[col])
            .collect_vec()
    }

    // With `except_cell`, box peers sharing the cell's row or column are
    // skipped as well; the row and column scans already cover them.
    fn box_values(&self, row: usize, col: usize, except_cell: bool) -> Vec<u8> {
        let r0 = (row / 3) * 3;
        let c0 = (col / 3) * 3;
        (r0..r0 + 3)
            .cartesian_product(c0..c0 + 3)
            .filter(|&(r, c)| !except_cell || (r != row && c != col))
            .filter_map(|(r, c)| self.rows[r][c])
            .collect_vec()
    }

    /// Values already present in the cell's row, column or box.
    pub fn taken_values(&self, row: usize, col: usize) -> HashSet<u8> {
        self.row_values(row, col, false)
            .into_iter()
            .chain(self.col_values(row, col, false).into_iter())
            .chain(self.box_values(row, col, false).into_iter())
            .collect()
    }

    /// Candidates for the cell, ascending. Recomputed from the current grid
    /// contents on every call.
    pub fn possibilities(&self, row: usize, col: usize) -> Vec<u8> {
        let taken = self.taken_values(row, col);
        (1..=9).filter(|x| !taken.contains(x)).collect()
    }

    pub fn is_valid_move(&self, row: usize, col: usize, value: u8) -> bool {
        !self.taken_values(row, col).contains(&value)
    }

    /// Empty cell with the fewest candidates, first in row-major order on
    /// ties. A cell down to 0 or 1 candidates is returned right away: it is
    /// either a dead branch or a forced move. `None` means no empty cell.
    pub fn find_least_possibilities_cell(&self) -> Option<(usize, usize)> {
        let mut found = None;
        let mut least = 10;
        for (row, col) in grid_range() {
            if self.rows[row][col].is_some() {
                continue;
            }
            let count = self.possibilities(row, col).len();
            if count < least {
                found = Some((row, col));
                least = count;
                if least <= 1 {
                    break;
                }
            }
        }
        found
    }

    /// Runs the backtracking search. On failure the board is left at the
    /// point of exhaustion; originally filled cells are never touched.
    pub fn solve(&mut self) -> bool {
        self.iterations = 0;
        let solved = self.try_solve();
        self.state = if solved {
            SudokuState::Solved
        } else {
            SudokuState::Exhausted
        };
        solved
    }

    fn try_solve(&mut self) -> bool {
        self.iterations += 1;
        if self.is_complete() {
            return true;
        }
        let (row, col) = match self.find_least_possibilities_cell() {
            Some(cell) => cell,
            // Full but invalid: nothing left to place, the branch fails.
            None => return false,
        };
        for value in self.possibilities(row, col) {
            self.rows[row][col] = Some(value);
            if self.try_solve() {
                return true;
            }
            self.rows[row][col] = None;
        }
        false
    }
}

/// Boards compare by cell contents only, not search state.
impl PartialEq for Sudoku {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Eq for Sudoku {}

impl std::fmt::Display for Sudoku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut line = String::new();
        let horizontal_line = " ----------------- ";
        for (i, row) in self.rows.iter().enumerate() {
            if i % 3 == 0 {
                writeln!(f, "{}", horizontal_line)?;
            }
            for (j, x) in row.iter().enumerate() {
                line.push(if j % 3 == 0 { '|' } else { ' ' });
                match x {
                    Some(n) => line.push_str(&format!("{n}")),
                    None => line.push_str(&" ".on_blue().to_string()),
                }
            }
            writeln!(f, "{line}|")?;
            line.clear();
        }
        writeln!(f, "{}", horizontal_line)
    }
}
