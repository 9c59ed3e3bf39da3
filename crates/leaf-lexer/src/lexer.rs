//! High-level lexer interface.

use crate::classify::{is_digit, is_identifier_continue, is_identifier_start};
use crate::config::LexerConfig;
use crate::error::LexError;
use crate::reader::RuneReader;
use crate::token::{Position, Token, TokenKind};

/// A lexer for Leaf source code.
///
/// Yields tokens in source order. After an error the lexer carries on from
/// wherever the reader stopped, so every problem in a buffer can be reported
/// in one pass.
pub struct Lexer<'src> {
    reader: RuneReader<'src>,
    config: LexerConfig,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source buffer.
    pub fn new(source: &'src [u8]) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    pub fn with_config(source: &'src [u8], config: LexerConfig) -> Self {
        Self {
            reader: RuneReader::new(source),
            config,
        }
    }

    /// Get the source buffer.
    pub fn source(&self) -> &'src [u8] {
        self.reader.data()
    }

    /// Get the current position in the source.
    pub fn position(&self) -> Position {
        self.reader.position()
    }

    fn next_token(&mut self) -> Option<Result<Token<'src>, LexError>> {
        self.reader.skip_whitespace();
        if self.reader.is_eof() {
            return None;
        }

        let start = self.reader.position();
        let first = self.reader.read()?;
        let runes = self.reader.runes() - 1;

        let kind = match self.lex_body(first, start) {
            Ok(kind) => kind,
            Err(err) => return Some(Err(err)),
        };

        let bytes = &self.reader.data()[start.offset..self.reader.offset()];
        let mut token = Token {
            kind,
            bytes,
            offset: start.offset,
            length: self.reader.runes() - runes,
            line: start.line,
            column: start.column,
        };

        if self.config.resolve_keywords && token.kind == TokenKind::Ident {
            if let Some(keyword) = std::str::from_utf8(bytes).ok().and_then(TokenKind::keyword) {
                token.kind = keyword;
            }
        }

        debug_assert!(token.size() > 0 && token.kind != TokenKind::Invalid);
        tracing::trace!(
            line = token.line + 1,
            column = token.column + 1,
            kind = %token.kind,
            "'{}'",
            token.text()
        );

        Some(Ok(token))
    }

    /// Consume the rest of a token whose first code point is `first`.
    fn lex_body(&mut self, first: char, start: Position) -> Result<TokenKind, LexError> {
        let kind = match first {
            rune if is_digit(rune, 10) => return self.lex_number(rune, start),
            rune if is_identifier_start(rune) => {
                self.lex_identifier();
                TokenKind::Ident
            }
            '"' => {
                self.lex_quoted('"', start)?;
                TokenKind::String
            }
            '\'' => {
                self.lex_quoted('\'', start)?;
                TokenKind::Rune
            }

            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '#' => TokenKind::Hash,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '~' => TokenKind::Tilde,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,

            '=' => self.compound(&[('=', TokenKind::EqEq)], TokenKind::Eq),
            '+' => self.compound(
                &[('+', TokenKind::PlusPlus), ('=', TokenKind::PlusEq)],
                TokenKind::Plus,
            ),
            '-' => self.compound(
                &[
                    ('-', TokenKind::MinusMinus),
                    ('=', TokenKind::MinusEq),
                    ('>', TokenKind::Arrow),
                ],
                TokenKind::Minus,
            ),
            '*' => self.compound(&[('=', TokenKind::StarEq)], TokenKind::Star),
            '/' => self.compound(&[('=', TokenKind::SlashEq)], TokenKind::Slash),
            '%' => self.compound(&[('=', TokenKind::PercentEq)], TokenKind::Percent),
            '!' => self.compound(&[('=', TokenKind::Ne)], TokenKind::Bang),
            '<' => match self.compound(
                &[('<', TokenKind::Shl), ('=', TokenKind::Le)],
                TokenKind::Lt,
            ) {
                TokenKind::Shl => self.compound(&[('=', TokenKind::ShlEq)], TokenKind::Shl),
                kind => kind,
            },
            '>' => match self.compound(
                &[('>', TokenKind::Shr), ('=', TokenKind::Ge)],
                TokenKind::Gt,
            ) {
                TokenKind::Shr => self.compound(&[('=', TokenKind::ShrEq)], TokenKind::Shr),
                kind => kind,
            },
            '&' => self.compound(
                &[('&', TokenKind::AmpAmp), ('=', TokenKind::AmpEq)],
                TokenKind::Amp,
            ),
            '|' => self.compound(
                &[('|', TokenKind::PipePipe), ('=', TokenKind::PipeEq)],
                TokenKind::Pipe,
            ),
            '^' => self.compound(&[('=', TokenKind::CaretEq)], TokenKind::Caret),

            rune => {
                return Err(LexError::UnknownRune {
                    rune,
                    position: start,
                })
            }
        };

        Ok(kind)
    }

    /// Number literals: `0b`, `0o` and `0x` prefixes lock the base. A bare
    /// leading `0` means octal until a `.` turns it decimal, so `017` is
    /// octal while `0.5` is decimal.
    fn lex_number(&mut self, first: char, start: Position) -> Result<TokenKind, LexError> {
        let mut base = 10;
        let mut weak_octal = false;
        let mut seen_dot = false;

        if first == '0' {
            base = 8;
            match self.reader.read() {
                Some('b') => base = 2,
                Some('o') => {}
                Some('x') => base = 16,
                _ => {
                    weak_octal = true;
                    self.reader.unget();
                }
            }
        }

        loop {
            match self.reader.read() {
                Some('.') => {
                    if seen_dot {
                        return Err(LexError::TwoDots { position: start });
                    }
                    if weak_octal {
                        base = 10;
                    }
                    seen_dot = true;
                }
                Some(rune) if is_digit(rune, base) => {}
                Some(rune) if is_identifier_continue(rune) => {
                    return Err(LexError::InvalidDigit {
                        rune,
                        position: start,
                    });
                }
                _ => {
                    self.reader.unget();
                    break;
                }
            }
        }

        Ok(TokenKind::Number)
    }

    fn lex_identifier(&mut self) {
        while let Some(rune) = self.reader.read() {
            if !is_identifier_continue(rune) {
                self.reader.unget();
                break;
            }
        }
    }

    /// Read up to the closing `quote`. A backslash swallows the next code
    /// point whatever it is; escapes are not checked here.
    fn lex_quoted(&mut self, quote: char, start: Position) -> Result<(), LexError> {
        let unterminated = || match quote {
            '"' => LexError::UnterminatedString { position: start },
            _ => LexError::UnterminatedRune { position: start },
        };

        loop {
            match self.reader.read() {
                Some(rune) if rune == quote => return Ok(()),
                Some('\\') => {
                    self.reader.read().ok_or_else(unterminated)?;
                }
                Some(_) => {}
                None => return Err(unterminated()),
            }
        }
    }

    /// One code point of lookahead: take the first alternative that matches,
    /// otherwise push the code point back and return `fallback`.
    fn compound(&mut self, alternatives: &[(char, TokenKind)], fallback: TokenKind) -> TokenKind {
        if let Some(rune) = self.reader.read() {
            if let Some(&(_, kind)) = alternatives.iter().find(|(next, _)| *next == rune) {
                return kind;
            }
        }
        self.reader.unget();
        fallback
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}
