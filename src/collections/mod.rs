pub mod grid;

pub(crate) mod branch;

pub use self::grid::Grid;
