use crate::sudoku::{Sudoku, SudokuError};
use log::debug;

/// Returns the solved board and the number of search iterations.
/// Boards with conflicting givens are rejected before any search runs.
pub fn solve_sudoku(mut board: Sudoku) -> Result<(Sudoku, usize), (SudokuError, usize)> {
    if !board.is_valid() {
        debug!("Rejecting board with conflicting givens");
        return Err((SudokuError::InvalidBoard, 0));
    }
    let solved = board.solve();
    let iterations = board.iterations();
    debug!("Search finished after {iterations} iterations");
    if solved {
        Ok((board, iterations))
    } else {
        Err((SudokuError::NoSolution, iterations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_sudoku_works() {
        let text = " 1
69  2  57
    692
  9   4
47     2
581 9   3
  5  86
 4 2  8 1
   6   4";
        let board = Sudoku::from_text(text).unwrap();
        println!("{board}");
        let (solved_board, iterations) = solve_sudoku(board).unwrap();
        println!("({iterations} iterations)\n{solved_board}");
        assert!(solved_board.is_solved());
        assert!(solved_board.is_complete());
    }

    #[test]
    fn solve_sudoku_finds_the_classic_completion() {
        let text = "53  7
6  195
 98    6
8   6   3
4  8 3  1
7   2   6
 6    28
   419  5
    8  79";
        let expected = "534678912
672195348
198342567
859761423
426853791
713924856
961537284
287419635
345286179";
        let board = Sudoku::from_text(text).unwrap();
        let (solved_board, iterations) = solve_sudoku(board).unwrap();
        println!("({iterations} iterations)\n{solved_board}");
        assert_eq!(solved_board, Sudoku::from_text(expected).unwrap());
    }

    #[test]
    fn solve_sudoku_cracks_a_17_given_puzzle() {
        let text = "
     3 85
  1 2
   5 7
  4   1
 9
5      73
  2 1
    4   9";
        let expected = "987654321
246173985
351928746
128537694
634892157
795461832
519286473
472319568
863745219";
        let board = Sudoku::from_text(text).unwrap();
        let (solved_board, iterations) = solve_sudoku(board).unwrap();
        println!("({iterations} iterations)\n{solved_board}");
        assert_eq!(solved_board, Sudoku::from_text(expected).unwrap());
    }

    #[test]
    fn solve_sudoku_fills_an_empty_board() {
        let board = Sudoku::from_text("").unwrap();
        let (solved_board, _) = solve_sudoku(board).unwrap();
        assert!(solved_board.is_full());
        assert!(solved_board.is_valid());
    }

    #[test]
    fn complete_board_solves_in_one_iteration() {
        let text = "926817345
851394726
473265891
685123479
734589162
219746538
586472913
342951687
197638254";
        let board = Sudoku::from_text(text).unwrap();
        let (solved_board, iterations) = solve_sudoku(board).unwrap();
        assert_eq!(iterations, 1);
        assert_eq!(solved_board, Sudoku::from_text(text).unwrap());
    }

    #[test]
    fn conflicting_givens_are_rejected_without_searching() {
        let board = Sudoku::from_text("5   5").unwrap();
        assert!(!board.is_valid());
        let (err, iterations) = solve_sudoku(board).unwrap_err();
        assert_eq!(err, SudokuError::InvalidBoard);
        assert_eq!(iterations, 0);
    }

    #[test]
    fn solve_fails_on_a_full_invalid_board() {
        // A completed board with one cell flipped to collide in its row.
        let text = "926817345
851394726
473265891
685123479
734589162
219746538
586472911
342951687
197638254";
        let mut board = Sudoku::from_text(text).unwrap();
        assert!(!board.solve());
        assert_eq!(board.iterations(), 1);
        assert!(!board.is_solved());
        // Nothing was altered, the board still matches the input.
        assert_eq!(board, Sudoku::from_text(text).unwrap());
    }

    #[test]
    fn solve_fails_fast_on_a_dead_cell() {
        // (0, 8) ends up with no candidates: 1-8 fill its row, 9 its column.
        let text = "12345678\n        9";
        let mut board = Sudoku::from_text(text).unwrap();
        assert!(board.possibilities(0, 8).is_empty());
        assert!(!board.solve());
        assert_eq!(board.iterations(), 1);
        assert_eq!(board.get(0, 8), None);
        // The givens survive the failed search untouched.
        assert_eq!(board.get(0, 0), Some(1));
        assert_eq!(board.get(1, 8), Some(9));
    }

    #[test]
    fn solving_is_deterministic_across_runs() {
        let text = " 4 1  2
6  43 5
   2  9
 2  8  1
 58   73
 9  4  5
  1  4  8
  4 95  6
  7  3 2";
        let (first, first_iterations) = solve_sudoku(Sudoku::from_text(text).unwrap()).unwrap();
        let (second, second_iterations) = solve_sudoku(Sudoku::from_text(text).unwrap()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first_iterations, second_iterations);
    }
}
