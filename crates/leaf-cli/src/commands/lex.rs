//! Lex command - tokenize a file.

use leaf_lexer::{LexerConfig, Source, SourceError, Token, TokenKind};
use serde::Serialize;
use std::path::Path;

/// JSON form of a token.
#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: TokenKind,
    text: std::borrow::Cow<'a, str>,
    line: usize,
    column: usize,
    offset: usize,
    size: usize,
    length: usize,
}

impl<'a> From<&Token<'a>> for TokenRecord<'a> {
    fn from(token: &Token<'a>) -> Self {
        Self {
            kind: token.kind,
            text: token.text(),
            line: token.line + 1,
            column: token.column + 1,
            offset: token.offset,
            size: token.size(),
            length: token.length,
        }
    }
}

pub fn run(file: &Path, config: LexerConfig, json: bool) -> miette::Result<()> {
    let source = Source::load(file).map_err(|e| miette::miette!("{}", e))?;

    if json {
        return run_json(&source, config);
    }

    println!("Tokenizing: {}\n", file.display());

    let mut token_count = 0;
    let mut error_count = 0;

    for result in source.lexer(config) {
        match result {
            Ok(token) => {
                let text = token.text();
                let text_display = if text.chars().count() > 40 {
                    format!("{}...", text.chars().take(40).collect::<String>())
                } else {
                    text.to_string()
                };

                println!(
                    "{:4}:{:<4}  {:16}  {:?}",
                    token.line + 1,
                    token.column + 1,
                    token.kind.to_string(),
                    text_display
                );
                token_count += 1;
            }
            Err(err) => {
                println!("{}", source.locate(err));
                error_count += 1;
            }
        }
    }

    println!("\n{} tokens, {} errors", token_count, error_count);

    if error_count > 0 {
        Err(miette::miette!("{} lexer errors", error_count))
    } else {
        Ok(())
    }
}

fn run_json(source: &Source, config: LexerConfig) -> miette::Result<()> {
    let (output, errors) = render_json(source, config)?;
    println!("{}", output);

    for err in &errors {
        eprintln!("{}", err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(miette::miette!("{} lexer errors", errors.len()))
    }
}

/// Render every token as a JSON array, returning the lexer errors alongside.
fn render_json(
    source: &Source,
    config: LexerConfig,
) -> miette::Result<(String, Vec<SourceError>)> {
    let (tokens, errors) = source.tokenize_all(config);
    let records: Vec<TokenRecord<'_>> = tokens.iter().map(TokenRecord::from).collect();

    let output = serde_json::to_string_pretty(&records)
        .map_err(|e| miette::miette!("Failed to serialize tokens: {}", e))?;

    Ok((output, errors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_is_one_document() {
        let source = Source::new("demo.lf", "x += 0x1F;");
        let (output, errors) = render_json(&source, LexerConfig::default()).unwrap();
        assert!(errors.is_empty());

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let tokens = value.as_array().unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0]["kind"], "Ident");
        assert_eq!(tokens[1]["kind"], "PlusEq");
        assert_eq!(tokens[2]["text"], "0x1F");
        assert_eq!(tokens[2]["size"], 4);
        assert_eq!(tokens[3]["column"], 10);
    }

    #[test]
    fn test_json_output_with_errors() {
        let source = Source::new("bad.lf", "a @ b");
        let (output, errors) = render_json(&source, LexerConfig::default()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(errors.len(), 1);
    }
}
