use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{ParseError, ParseGridErrorType::*};
use crate::puzzle::parse::Token;

pub type IndexedToken = (usize, Token);

pub struct TokenIterator<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> TokenIterator<'a> {
    pub fn new(s: &str) -> TokenIterator<'_> {
        TokenIterator {
            chars: s.char_indices().peekable(),
        }
    }

    pub fn next_skip_space(&mut self) -> Result<Option<IndexedToken>, ParseError> {
        loop {
            match self.next()? {
                Some((_, Token::Space)) => {}
                next => return Ok(next),
            }
        }
    }

    pub fn next(&mut self) -> Result<Option<IndexedToken>, ParseError> {
        let (index, c) = match self.chars.next() {
            Some(next) => next,
            None => return Ok(None),
        };
        let token = if c.is_whitespace() {
            while self.chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
            Token::Space
        } else if c == '.' {
            Token::Empty
        } else if c.is_ascii_digit() {
            let mut s = c.to_string();
            while let Some((_, c)) = self.chars.next_if(|&(_, c)| c.is_ascii_digit()) {
                s.push(c);
            }
            match s.parse() {
                Ok(n) => Token::Number(n),
                Err(_) => return Err(ParseError::new(InvalidCell, s, index)),
            }
        } else {
            return Err(ParseError::new(UnexpectedToken, c, index));
        };
        Ok(Some((index, token)))
    }
}
