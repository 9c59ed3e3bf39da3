//! Lexer configuration.

/// Options controlling tokenization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerConfig {
    /// Re-tag identifiers that spell a reserved word with their keyword kind.
    pub resolve_keywords: bool,
}

impl LexerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let resolve_keywords = std::env::var("LEAF_KEYWORDS")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self { resolve_keywords }
    }

    /// Enable or disable keyword resolution.
    pub fn with_keywords(mut self, resolve_keywords: bool) -> Self {
        self.resolve_keywords = resolve_keywords;
        self
    }
}
