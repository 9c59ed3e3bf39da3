//! CLI commands.

use leaf_lexer::LexerConfig;

pub mod check;
pub mod lex;
pub mod stats;

/// Lexer settings from the environment, with command-line flags on top.
pub fn lexer_config(keywords: bool) -> LexerConfig {
    let config = LexerConfig::from_env();
    config.with_keywords(config.resolve_keywords || keywords)
}
