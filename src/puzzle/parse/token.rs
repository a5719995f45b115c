use std::fmt;

use crate::puzzle::Value;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Number(Value),
    Empty,
    Space,
}

impl Token {
    pub fn number(self) -> Option<Value> {
        match self {
            Token::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The content of a grid cell
    pub fn cell(self) -> Option<Option<Value>> {
        match self {
            Token::Number(n) => Some(Some(n)),
            Token::Empty => Some(None),
            Token::Space => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Empty => write!(f, "."),
            Token::Space => write!(f, " "),
        }
    }
}
