//! Lexer error definitions.

use crate::token::Position;
use std::path::PathBuf;
use thiserror::Error;

/// A lexer error.
///
/// Every variant carries the position of the first code point of the token
/// being lexed when the problem was found.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("number literal contains two dots")]
    TwoDots { position: Position },

    #[error("invalid rune in number literal: '{rune}'")]
    InvalidDigit { rune: char, position: Position },

    #[error("unknown rune: '{rune}'")]
    UnknownRune { rune: char, position: Position },

    #[error("unterminated string literal")]
    UnterminatedString { position: Position },

    #[error("unterminated rune literal")]
    UnterminatedRune { position: Position },
}

impl LexError {
    /// Get the position of this error.
    pub fn position(&self) -> Position {
        match self {
            LexError::TwoDots { position } => *position,
            LexError::InvalidDigit { position, .. } => *position,
            LexError::UnknownRune { position, .. } => *position,
            LexError::UnterminatedString { position } => *position,
            LexError::UnterminatedRune { position } => *position,
        }
    }
}

/// An error tied to a source file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "(Error @{}, line {}, column {}): {}",
        .path.display(),
        .error.position().display_line(),
        .error.position().display_column(),
        .error
    )]
    Lex { path: PathBuf, error: LexError },
}

impl SourceError {
    /// The lexical error, if this is one.
    pub fn lex_error(&self) -> Option<&LexError> {
        match self {
            SourceError::Lex { error, .. } => Some(error),
            SourceError::Io { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_messages() {
        let position = Position::new(3, 0, 3);
        assert_eq!(
            LexError::TwoDots { position }.to_string(),
            "number literal contains two dots"
        );
        assert_eq!(
            LexError::InvalidDigit {
                rune: 'G',
                position
            }
            .to_string(),
            "invalid rune in number literal: 'G'"
        );
        assert_eq!(
            LexError::UnknownRune {
                rune: '@',
                position
            }
            .position(),
            position
        );
    }

    #[test]
    fn test_source_error_uses_one_based_position() {
        let error = SourceError::Lex {
            path: PathBuf::from("main.lf"),
            error: LexError::UnknownRune {
                rune: '@',
                position: Position::new(12, 1, 4),
            },
        };

        assert_eq!(
            error.to_string(),
            "(Error @main.lf, line 2, column 5): unknown rune: '@'"
        );
        assert!(error.lex_error().is_some());
    }
}
