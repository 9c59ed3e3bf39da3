//! # Leaf Lexer
//!
//! Tokenizes Leaf source code into a sequence of tokens.
//!
//! The lexer is hand-written: a [`RuneReader`] decodes the buffer one code
//! point at a time with a single level of pushback, and the [`Lexer`] decides
//! each token's kind from its first code point. Tokens borrow their text from
//! the buffer instead of copying it.
//!
//! ## Example
//!
//! ```
//! use leaf_lexer::{Lexer, TokenKind};
//!
//! let source = b"x += 0x1F;";
//! let kinds: Vec<_> = Lexer::new(source).map(|r| r.unwrap().kind).collect();
//!
//! assert_eq!(
//!     kinds,
//!     [TokenKind::Ident, TokenKind::PlusEq, TokenKind::Number, TokenKind::Semicolon]
//! );
//! ```

mod classify;
mod config;
mod error;
mod lexer;
mod reader;
mod source;
mod token;

pub use classify::{is_digit, is_identifier_continue, is_identifier_start};
pub use config::LexerConfig;
pub use error::{LexError, SourceError};
pub use lexer::Lexer;
pub use reader::RuneReader;
pub use source::Source;
pub use token::{Position, Token, TokenKind};

/// Tokenize a buffer, collecting tokens and errors separately.
pub fn tokenize(source: &[u8]) -> (Vec<Token<'_>>, Vec<LexError>) {
    let lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for result in lexer {
        match result {
            Ok(token) => tokens.push(token),
            Err(err) => errors.push(err),
        }
    }

    (tokens, errors)
}

/// Tokenize a buffer, stopping at the first error.
pub fn try_tokenize(source: &[u8]) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_collects_both() {
        let (tokens, errors) = tokenize(b"a ` b");
        assert_eq!(tokens.len(), 2);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_try_tokenize_stops_at_error() {
        let err = try_tokenize(b"x = 0xG").unwrap_err();
        assert!(matches!(err, LexError::InvalidDigit { rune: 'G', .. }));
        assert_eq!(err.position(), Position::new(4, 0, 4));

        assert_eq!(try_tokenize(b"tuple t;").unwrap().len(), 3);
    }
}
