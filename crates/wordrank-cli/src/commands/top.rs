use super::count_input;
use crate::{Cli, Format};
use anyhow::Result;
use std::io::Write;
use std::path::Path;
use wordrank_count::{Engine, checked_n};
use wordrank_render::{JsonlWriter, PlainWriter, Totals};

pub fn run(cli: &Cli, path: Option<&Path>, n: i64, format: Format, counts: bool) -> Result<()> {
    let n = checked_n(n)?;
    let config = cli.rank_config()?;
    let tie_break = config.tie_break;
    let engine = Engine::new(config);

    let tally = count_input(&engine, path)?;
    let summary = tally.summary();
    let entries = tally.rank_entries(n)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        Format::Plain => PlainWriter::new()
            .show_counts(counts)
            .write_to(&mut out, &entries)?,
        Format::Jsonl => {
            let totals = Totals {
                distinct_words: summary.distinct_words,
                tokens: summary.tokens,
                complete: summary.complete,
            };
            JsonlWriter::new(n, tie_break)
                .show_counts(counts)
                .write_to(&mut out, &entries, &totals)?
        }
    }
    out.flush()?;

    if !cli.is_quiet() {
        tracing::info!(
            returned = entries.len(),
            distinct = summary.distinct_words,
            tokens = summary.tokens,
            "ranking done"
        );
    }

    Ok(())
}
