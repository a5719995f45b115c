//! Parse puzzles from text
//!
//! The first line holds the dimensions `rows cols`. Then follow `rows * cols`
//! cell tokens in row-major order: `.` for an empty cell or a positive number
//! for a checkpoint.

use ahash::AHashSet;

use crate::collections::grid::Coord;
use crate::error::{ParseError, ParseGridErrorType, ParseGridErrorType::*, UNEXPECTED_END};
use crate::puzzle::{Puzzle, Value, MAX_DIMENSION};
use token_iterator::{IndexedToken, TokenIterator};

pub(crate) use token::Token;

mod token;
mod token_iterator;

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// parse a `Puzzle` from a string
pub fn parse_grid(s: &str) -> Result<Puzzle> {
    let mut s = TokenIterator::new(s);
    let rows = read_dimension(&mut s)?;
    let cols = read_dimension(&mut s)?;
    let mut puzzle = Puzzle::empty(rows, cols);
    let mut seen: AHashSet<Value> = AHashSet::default();
    for coord in (0..rows).flat_map(|row| (0..cols).map(move |col| Coord::new(row, col))) {
        let (index, value) = s
            .next_skip_space()?
            .expect_token()?
            .map_or(InvalidCell, Token::cell)?;
        if let Some(value) = value {
            if value == 0 {
                return Err(ParseError::new(InvalidCell, value, index));
            }
            if !seen.insert(value) {
                return Err(ParseError::new(DuplicateNumber, value, index));
            }
        }
        puzzle.set_value(coord, value);
    }
    if let Some((i, t)) = s.next_skip_space()? {
        return Err(ParseError::new(UnexpectedToken, t, i));
    }
    Ok(puzzle)
}

fn read_dimension(s: &mut TokenIterator<'_>) -> Result<usize> {
    let (index, n) = s
        .next_skip_space()?
        .expect_token()?
        .map_or(InvalidSize, Token::number)?;
    if n == 0 {
        return Err(ParseError::new(InvalidSize, n, index));
    }
    if n as usize > MAX_DIMENSION {
        return Err(ParseError::new(SizeTooBig, n, index));
    }
    Ok(n as usize)
}

trait TokenOption: Sized {
    fn expect_token(self) -> Result<IndexedToken>;
}

impl TokenOption for Option<IndexedToken> {
    fn expect_token(self) -> Result<IndexedToken> {
        self.ok_or(UNEXPECTED_END)
    }
}

trait IndexedTokenExt {
    fn map_or<U>(
        self,
        error_type: ParseGridErrorType,
        f: impl FnOnce(Token) -> Option<U>,
    ) -> Result<(usize, U)>;
}

impl IndexedTokenExt for IndexedToken {
    fn map_or<U>(
        self,
        error_type: ParseGridErrorType,
        f: impl FnOnce(Token) -> Option<U>,
    ) -> Result<(usize, U)> {
        let (index, token) = self;
        let u = f(token).ok_or_else(|| ParseError::new(error_type, token, index))?;
        Ok((index, u))
    }
}

#[cfg(test)]
mod tests {
    use crate::collections::grid::Coord;
    use crate::error::ParseGridErrorType;
    use crate::puzzle::parse::parse_grid;
    use crate::puzzle::Puzzle;

    #[test]
    fn empty() {
        assert!(parse_grid("").is_err());
    }

    #[test]
    fn test() {
        let str = "\
        3 3\n\
        1 2 .\n\
        . 3 .\n\
        . 4 .\n";
        let mut puzzle = Puzzle::empty(3, 3);
        puzzle.set_value(Coord::new(0, 0), Some(1));
        puzzle.set_value(Coord::new(0, 1), Some(2));
        puzzle.set_value(Coord::new(1, 1), Some(3));
        puzzle.set_value(Coord::new(2, 1), Some(4));
        assert_eq!(puzzle, parse_grid(str).unwrap());
    }

    #[test]
    fn print_then_parse() {
        let puzzle = parse_grid("2 4\n 1 . . 10\n . 2 . .").unwrap();
        assert_eq!(puzzle, parse_grid(&puzzle.to_string()).unwrap());
    }

    #[test]
    fn errors() {
        let error_type = |s| parse_grid(s).unwrap_err().error_type();
        assert_eq!(ParseGridErrorType::UnexpectedEnd, error_type("2 2\n1 ."));
        assert_eq!(ParseGridErrorType::DuplicateNumber, error_type("1 3\n1 . 1"));
        assert_eq!(ParseGridErrorType::InvalidSize, error_type("0 3"));
        assert_eq!(ParseGridErrorType::SizeTooBig, error_type("65 3"));
        assert_eq!(ParseGridErrorType::UnexpectedToken, error_type("1 1\n1 2"));
        assert_eq!(ParseGridErrorType::UnexpectedToken, error_type("1 2\n1 x"));
        assert_eq!(ParseGridErrorType::InvalidCell, error_type("1 2\n1 0"));
    }
}
