//! Generate and validate daily path puzzles
//!
//! A puzzle is a grid with numbered cells. It is solved by one path that starts
//! on 1, visits the numbers in increasing order and covers every cell exactly
//! once, stepping between edge-sharing cells.

#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(unused_qualifications)]

#[macro_use]
extern crate log;

pub mod collections;
pub mod date;
pub mod error;
pub mod generate;
pub mod puzzle;
pub mod random;
pub mod solve;
pub mod worker;

pub use crate::generate::{generate, GenerateParams, GeneratedPuzzle, Generator};
pub use crate::puzzle::{Difficulty, Puzzle};
pub use crate::solve::{validate, ValidationResult};
