use std::fmt::{Display, Formatter};
use std::{fmt, io};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// The requested puzzle cannot exist. Caller error, never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("invalid grid dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("grid of {rows}x{cols} exceeds the largest supported size of {max}x{max}")]
    TooLarge { rows: usize, cols: usize, max: usize },
    #[error("at least one number is required")]
    NoNumbers,
    #[error("number count ({count}) exceeds the number of cells ({cells})")]
    TooManyNumbers { count: usize, cells: usize },
}

/// No free trace index remains for a checkpoint
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no free position on the trace for number {value}")]
pub struct PlacementError {
    value: u32,
}

impl PlacementError {
    pub(crate) fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

/// A depth-first search ran out of steps before deciding
#[derive(Debug, Error, Clone, Copy)]
#[error("search step budget of {0} exhausted")]
pub(crate) struct SearchExhausted(pub u32);

#[derive(Error, Debug)]
pub enum GridFromFileError {
    #[error("error reading grid file")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub const UNEXPECTED_END: ParseError = ParseError::from_type(ParseGridErrorType::UnexpectedEnd);

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub struct ParseError {
    error_type: ParseGridErrorType,
    token: Option<String>,
    index: Option<usize>,
}

impl ParseError {
    pub(crate) fn new(error_type: ParseGridErrorType, token: impl Display, index: usize) -> Self {
        Self {
            error_type,
            token: Some(token.to_string()),
            index: Some(index),
        }
    }

    pub(crate) const fn from_type(error_type: ParseGridErrorType) -> Self {
        Self {
            error_type,
            token: None,
            index: None,
        }
    }

    pub fn error_type(&self) -> ParseGridErrorType {
        self.error_type
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseGridErrorType {
    DuplicateNumber,
    InvalidCell,
    InvalidSize,
    SizeTooBig,
    UnexpectedEnd,
    UnexpectedToken,
}

impl Display for ParseGridErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseGridErrorType::DuplicateNumber => "Duplicate number",
            ParseGridErrorType::InvalidCell => "Invalid cell",
            ParseGridErrorType::InvalidSize => "Invalid grid size",
            ParseGridErrorType::SizeTooBig => "Grid size too big",
            ParseGridErrorType::UnexpectedEnd => "Unexpected end",
            ParseGridErrorType::UnexpectedToken => "Unexpected token",
        };
        write!(f, "{}", s)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_type)?;
        if let Some(token) = &self.token {
            write!(f, ": \"{}\"", token)?;
        }
        if let Some(index) = &self.index {
            write!(f, " at {}", index)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid date \"{input}\", expected YYYY-MM-DD")]
pub struct ParseDateError {
    input: String,
}

impl ParseDateError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid difficulty \"{0}\", expected easy, medium or hard")]
pub struct ParseDifficultyError(pub(crate) String);
