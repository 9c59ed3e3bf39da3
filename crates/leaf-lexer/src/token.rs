//! Token definitions for Leaf.

use std::borrow::Cow;
use std::fmt;

/// A position in the source buffer.
///
/// `line` and `column` are 0-based; use [`display_line`](Self::display_line)
/// and [`display_column`](Self::display_column) for user-facing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Byte offset into the buffer
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// 1-based line number.
    pub fn display_line(&self) -> usize {
        self.line + 1
    }

    /// 1-based column number.
    pub fn display_column(&self) -> usize {
        self.column + 1
    }
}

/// A classified span of source text.
///
/// Tokens borrow their bytes from the source buffer, so the buffer must
/// outlive every token produced from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// The token's bytes, borrowed from the source buffer.
    pub bytes: &'src [u8],
    /// Byte offset of the first byte.
    pub offset: usize,
    /// Length in code points.
    pub length: usize,
    pub line: usize,
    pub column: usize,
}

impl<'src> Token<'src> {
    /// Length in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Byte range covered by this token.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.bytes.len()
    }

    /// The token text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'src, str> {
        String::from_utf8_lossy(self.bytes)
    }

    /// Position of the first code point.
    pub fn position(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} '{}'",
            self.line + 1,
            self.column + 1,
            self.kind,
            self.text()
        )
    }
}

/// Token kinds for Leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// Not yet classified
    #[default]
    Invalid,

    // ========================================================================
    // Keywords
    // ========================================================================
    Void,
    Bool,
    Byte,
    Sint,
    Usint,
    Int,
    Uint,
    Lint,
    Ulint,

    Null,
    True,
    False,

    Struct,
    Tuple,
    Union,
    Enum,

    Return,
    If,
    Else,
    While,
    For,
    Break,
    Continue,

    Extern,
    Const,

    Sizeof,
    Typeof,

    Include,

    // ========================================================================
    // Punctuation
    // ========================================================================
    Comma,
    Semicolon,
    Dot,
    Hash,
    Colon,
    Question,
    Tilde,
    Arrow,

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // ========================================================================
    // Operators
    // ========================================================================
    Eq,
    EqEq,

    Plus,
    PlusPlus,
    PlusEq,
    Minus,
    MinusMinus,
    MinusEq,
    Star,
    StarEq,
    Slash,
    SlashEq,
    Percent,
    PercentEq,

    Bang,
    Ne,
    Lt,
    Le,
    Shl,
    ShlEq,
    Gt,
    Ge,
    Shr,
    ShrEq,

    Amp,
    AmpAmp,
    AmpEq,
    Pipe,
    PipePipe,
    PipeEq,
    Caret,
    CaretEq,

    // ========================================================================
    // Free-form
    // ========================================================================
    Ident,
    String,
    Rune,
    Number,
}

const KEYWORDS: &[TokenKind] = &[
    TokenKind::Void,
    TokenKind::Bool,
    TokenKind::Byte,
    TokenKind::Sint,
    TokenKind::Usint,
    TokenKind::Int,
    TokenKind::Uint,
    TokenKind::Lint,
    TokenKind::Ulint,
    TokenKind::Null,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Struct,
    TokenKind::Tuple,
    TokenKind::Union,
    TokenKind::Enum,
    TokenKind::Return,
    TokenKind::If,
    TokenKind::Else,
    TokenKind::While,
    TokenKind::For,
    TokenKind::Break,
    TokenKind::Continue,
    TokenKind::Extern,
    TokenKind::Const,
    TokenKind::Sizeof,
    TokenKind::Typeof,
    TokenKind::Include,
];

impl TokenKind {
    /// Look up a reserved word.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS.iter().copied().find(|kind| kind.as_str() == word)
    }

    /// Check if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        KEYWORDS.contains(self)
    }

    /// Check if this token is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Rune
                | TokenKind::Number
                | TokenKind::Null
                | TokenKind::True
                | TokenKind::False
        )
    }

    /// Check if this token is an operator or an assignment operator.
    pub fn is_operator(&self) -> bool {
        (*self as u8) >= (TokenKind::Eq as u8) && (*self as u8) <= (TokenKind::CaretEq as u8)
    }

    /// Check if this token is an assignment, plain or compound.
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
                | TokenKind::ShlEq
                | TokenKind::ShrEq
                | TokenKind::AmpEq
                | TokenKind::PipeEq
                | TokenKind::CaretEq
        )
    }

    /// Source spelling for fixed tokens, a description for the rest.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Invalid => "invalid",

            TokenKind::Void => "void",
            TokenKind::Bool => "bool",
            TokenKind::Byte => "byte",
            TokenKind::Sint => "sint",
            TokenKind::Usint => "usint",
            TokenKind::Int => "int",
            TokenKind::Uint => "uint",
            TokenKind::Lint => "lint",
            TokenKind::Ulint => "ulint",
            TokenKind::Null => "null",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Struct => "struct",
            TokenKind::Tuple => "tuple",
            TokenKind::Union => "union",
            TokenKind::Enum => "enum",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Extern => "extern",
            TokenKind::Const => "const",
            TokenKind::Sizeof => "sizeof",
            TokenKind::Typeof => "typeof",
            TokenKind::Include => "include",

            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Hash => "#",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Tilde => "~",
            TokenKind::Arrow => "->",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",

            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::Plus => "+",
            TokenKind::PlusPlus => "++",
            TokenKind::PlusEq => "+=",
            TokenKind::Minus => "-",
            TokenKind::MinusMinus => "--",
            TokenKind::MinusEq => "-=",
            TokenKind::Star => "*",
            TokenKind::StarEq => "*=",
            TokenKind::Slash => "/",
            TokenKind::SlashEq => "/=",
            TokenKind::Percent => "%",
            TokenKind::PercentEq => "%=",
            TokenKind::Bang => "!",
            TokenKind::Ne => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Shl => "<<",
            TokenKind::ShlEq => "<<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::Shr => ">>",
            TokenKind::ShrEq => ">>=",
            TokenKind::Amp => "&",
            TokenKind::AmpAmp => "&&",
            TokenKind::AmpEq => "&=",
            TokenKind::Pipe => "|",
            TokenKind::PipePipe => "||",
            TokenKind::PipeEq => "|=",
            TokenKind::Caret => "^",
            TokenKind::CaretEq => "^=",

            TokenKind::Ident => "identifier",
            TokenKind::String => "string literal",
            TokenKind::Rune => "rune literal",
            TokenKind::Number => "number literal",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("struct"), Some(TokenKind::Struct));
        assert_eq!(TokenKind::keyword("usint"), Some(TokenKind::Usint));
        assert_eq!(TokenKind::keyword("include"), Some(TokenKind::Include));
        assert_eq!(TokenKind::keyword("structure"), None);
        assert_eq!(TokenKind::keyword("identifier"), None);
        assert_eq!(TokenKind::keyword("+"), None);
    }

    #[test]
    fn test_every_keyword_round_trips() {
        for kind in KEYWORDS {
            assert!(kind.is_keyword());
            assert_eq!(TokenKind::keyword(kind.as_str()), Some(*kind));
        }
        assert_eq!(KEYWORDS.len(), 28);
    }

    #[test]
    fn test_categories() {
        assert!(TokenKind::ShlEq.is_operator());
        assert!(TokenKind::ShlEq.is_assignment());
        assert!(TokenKind::Eq.is_operator());
        assert!(TokenKind::CaretEq.is_operator());
        assert!(!TokenKind::EqEq.is_assignment());
        assert!(!TokenKind::Arrow.is_operator());
        assert!(!TokenKind::Ident.is_operator());

        assert!(TokenKind::Number.is_literal());
        assert!(TokenKind::Null.is_literal());
        assert!(!TokenKind::Ident.is_literal());
        assert!(!TokenKind::Number.is_keyword());
    }

    #[test]
    fn test_default_is_invalid() {
        assert_eq!(TokenKind::default(), TokenKind::Invalid);
    }

    #[test]
    fn test_token_accessors() {
        let source = b"let x";
        let token = Token {
            kind: TokenKind::Ident,
            bytes: &source[4..5],
            offset: 4,
            length: 1,
            line: 2,
            column: 7,
        };

        assert_eq!(token.size(), 1);
        assert_eq!(token.span(), 4..5);
        assert_eq!(token.text(), "x");
        assert_eq!(token.position(), Position::new(4, 2, 7));
        assert_eq!(token.to_string(), "3:8 identifier 'x'");
    }
}
