//! Source units: a loaded buffer plus the path used in diagnostics.

use crate::config::LexerConfig;
use crate::error::{LexError, SourceError};
use crate::lexer::Lexer;
use crate::token::Token;
use std::path::{Path, PathBuf};

/// A source file held in memory.
///
/// Tokens produced from a `Source` borrow from it, so it must outlive them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    path: PathBuf,
    data: Vec<u8>,
}

impl Source {
    /// Create a source unit from an already loaded buffer.
    pub fn new(path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            data: data.into(),
        }
    }

    /// Read a file into memory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "loaded source");
        Ok(Self::new(path, data))
    }

    /// Path used in diagnostics.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Create a lexer over this source.
    pub fn lexer(&self, config: LexerConfig) -> Lexer<'_> {
        Lexer::with_config(&self.data, config)
    }

    /// Tokenize the whole source, stopping at the first error.
    pub fn tokenize(&self, config: LexerConfig) -> Result<Vec<Token<'_>>, SourceError> {
        let tokens = self
            .lexer(config)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| self.locate(error))?;

        tracing::debug!(path = %self.path.display(), tokens = tokens.len(), "tokenized");
        Ok(tokens)
    }

    /// Tokenize the whole source, collecting every error.
    pub fn tokenize_all(&self, config: LexerConfig) -> (Vec<Token<'_>>, Vec<SourceError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        for result in self.lexer(config) {
            match result {
                Ok(token) => tokens.push(token),
                Err(error) => errors.push(self.locate(error)),
            }
        }

        tracing::debug!(
            path = %self.path.display(),
            tokens = tokens.len(),
            errors = errors.len(),
            "tokenized"
        );
        (tokens, errors)
    }

    /// Attach this source's path to a lexer error.
    pub fn locate(&self, error: LexError) -> SourceError {
        SourceError::Lex {
            path: self.path.clone(),
            error,
        }
    }
}
