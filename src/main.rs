use colored::Colorize;
use std::env;
use sudoku_engine::{solve_sudoku, Sudoku};

fn main() {
    env_logger::init();
    let text = env::args().nth(1).expect("No puzzle found.");
    match Sudoku::from_text(&text) {
        Ok(board) => {
            println!("Input:\n{board}");
            match solve_sudoku(board) {
                Ok((solution, iterations)) => {
                    println!("Found a solution in {iterations} iterations.\n{solution}");
                }
                Err((err, iterations)) => {
                    println!("{}", format!("{err} ({iterations} iterations)").red());
                }
            }
        }
        Err(err) => {
            println!("{}", format!("{err}").red());
        }
    }
}
