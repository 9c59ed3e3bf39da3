//! Check command - check files for lexical errors.

use leaf_lexer::{LexerConfig, Source};
use std::path::Path;

pub fn run(files: &[std::path::PathBuf], config: LexerConfig) -> miette::Result<()> {
    if files.is_empty() {
        return Err(miette::miette!("No files specified"));
    }

    let mut total_errors = 0;

    for file in files {
        total_errors += check_file(file, config)?;
    }

    println!();
    if total_errors > 0 {
        println!("Check complete: {} error(s)", total_errors);
        Err(miette::miette!("{} errors found", total_errors))
    } else {
        println!("Check complete: no issues found");
        Ok(())
    }
}

fn check_file(file: &Path, config: LexerConfig) -> miette::Result<usize> {
    let source = Source::load(file).map_err(|e| miette::miette!("{}", e))?;

    println!("Checking: {}", file.display());

    let (_, errors) = source.tokenize_all(config);

    for err in &errors {
        println!("  {}", err);
        if let Some(lex_error) = err.lex_error() {
            print_source_line(source.data(), lex_error.position().line);
        }
    }

    if errors.is_empty() {
        println!("  ok");
    }

    Ok(errors.len())
}

fn print_source_line(data: &[u8], line: usize) {
    if let Some(text) = data.split(|&b| b == b'\n').nth(line) {
        println!("    |");
        println!("{:4} | {}", line + 1, String::from_utf8_lossy(text).trim_end());
        println!("    |");
    }
}
