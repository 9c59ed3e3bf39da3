//! Code point reader over a source buffer.
//!
//! The reader decodes UTF-8 lead/continuation bytes without validating them,
//! keeps line and column bookkeeping, and supports a single level of
//! pushback. Control bytes other than newline and tab never reach the caller:
//! they are skipped, and newline and tab are handed out as plain spaces once
//! their effect on the position has been recorded.

use crate::token::Position;

/// What is needed to undo the most recent read.
#[derive(Debug, Clone, Copy)]
struct LastRead {
    /// Bytes taken by the code point itself, not counting skipped control bytes.
    width: usize,
    line: usize,
    column: usize,
}

/// A cursor that reads one code point at a time.
#[derive(Debug, Clone)]
pub struct RuneReader<'src> {
    data: &'src [u8],
    offset: usize,
    runes: usize,
    line: usize,
    column: usize,
    last: Option<LastRead>,
}

impl<'src> RuneReader<'src> {
    pub fn new(data: &'src [u8]) -> Self {
        Self {
            data,
            offset: 0,
            runes: 0,
            line: 0,
            column: 0,
            last: None,
        }
    }

    /// The underlying buffer.
    pub fn data(&self) -> &'src [u8] {
        self.data
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of code points read so far.
    pub fn runes(&self) -> usize {
        self.runes
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn position(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Read the next code point, or `None` at end of input.
    pub fn read(&mut self) -> Option<char> {
        self.last = None;

        let lead = loop {
            let byte = *self.data.get(self.offset)?;
            self.offset += 1;

            if byte >= 0x20 || byte == b'\n' || byte == b'\t' {
                break byte;
            }
        };

        let start = self.offset - 1;
        let rune = self.decode(lead);

        self.last = Some(LastRead {
            width: self.offset - start,
            line: self.line,
            column: self.column,
        });

        if rune == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.runes += 1;

        if rune < ' ' {
            Some(' ')
        } else {
            Some(rune)
        }
    }

    /// Undo the most recent [`read`](Self::read).
    ///
    /// Only one read can be undone; a second call, or a call after a read
    /// that hit end of input, does nothing.
    pub fn unget(&mut self) {
        if let Some(last) = self.last.take() {
            self.offset -= last.width;
            self.runes -= 1;
            self.line = last.line;
            self.column = last.column;
        }
    }

    /// Skip spaces, stopping in front of the first other code point.
    pub fn skip_whitespace(&mut self) {
        while let Some(rune) = self.read() {
            if rune != ' ' {
                self.unget();
                break;
            }
        }
    }

    /// Fold the continuation bytes that follow `lead` into one code point.
    fn decode(&mut self, lead: u8) -> char {
        let (continuation, bits) = match lead {
            0xF0..=0xFF => (3, lead & 0x07),
            0xE0..=0xEF => (2, lead & 0x0F),
            0xC0..=0xDF => (1, lead & 0x1F),
            _ => return char::from(lead),
        };

        let mut value = u32::from(bits);
        for _ in 0..continuation {
            let Some(&byte) = self.data.get(self.offset) else {
                break;
            };
            value = (value << 6) | u32::from(byte & 0x3F);
            self.offset += 1;
        }

        char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}
