//! Stats command - token counts and memory usage for a file.

use leaf_alloc::TrackingAllocator;
use leaf_lexer::{LexerConfig, Source, TokenKind};
use std::collections::HashMap;
use std::path::Path;

pub fn run(file: &Path, config: LexerConfig, allocator: &TrackingAllocator) -> miette::Result<()> {
    let before = allocator.stats();
    let source = Source::load(file).map_err(|e| miette::miette!("{}", e))?;
    let tokens = source.tokenize(config).map_err(|e| miette::miette!("{}", e))?;
    let during = allocator.stats();

    let mut counts: HashMap<TokenKind, usize> = HashMap::new();
    for token in &tokens {
        *counts.entry(token.kind).or_default() += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));

    println!("Statistics: {}\n", file.display());
    println!("  {} bytes, {} tokens", source.len(), tokens.len());
    println!(
        "  {} code points in tokens",
        tokens.iter().map(|t| t.length).sum::<usize>()
    );
    println!();

    for (kind, count) in &counts {
        println!("  {:16}  {}", kind.to_string(), count);
    }

    println!();
    println!(
        "  memory: {} bytes live with tokens loaded (+{}), {} peak",
        during.used,
        during.used.saturating_sub(before.used),
        during.peak
    );

    tracing::debug!(
        tokens = tokens.len(),
        kinds = counts.len(),
        "collected statistics"
    );

    Ok(())
}
