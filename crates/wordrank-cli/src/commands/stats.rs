use super::count_input;
use crate::Cli;
use anyhow::Result;
use std::path::Path;
use wordrank_count::Engine;

pub fn run(cli: &Cli, path: Option<&Path>) -> Result<()> {
    let engine = Engine::new(cli.rank_config()?);
    let tally = count_input(&engine, path)?;
    let summary = tally.summary();
    let table = tally.table();

    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(stdin)".to_string());

    println!("Input: {source}");
    println!("Tokens: {}", summary.tokens);
    println!("Distinct words: {}", summary.distinct_words);
    println!("Overlong runs: {}", summary.overlong_runs);
    if summary.distinct_words > 0 {
        println!(
            "Avg occurrences per word: {:.2}",
            summary.tokens as f64 / summary.distinct_words as f64
        );
    }
    println!("Table buckets: {}", table.bucket_count());

    Ok(())
}
