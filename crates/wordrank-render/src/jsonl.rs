use crate::Totals;
use serde::Serialize;
use std::io::Write;
use wordrank_core::{FrequencyEntry, TieBreak};

/// Output format version written in the header line.
const FORMAT_VERSION: &str = "1";

/// Writes a ranking as JSONL: header, one line per word, footer.
pub struct JsonlWriter {
    requested: usize,
    tie_break: TieBreak,
    show_counts: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Header<'a> {
    version: &'a str,
    requested: usize,
    tie_break: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct WordLine<'a> {
    rank: usize,
    word: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Footer {
    returned: usize,
    distinct_words: usize,
    tokens: u64,
    complete: bool,
}

impl JsonlWriter {
    pub fn new(requested: usize, tie_break: TieBreak) -> Self {
        Self {
            requested,
            tie_break,
            show_counts: false,
        }
    }

    pub fn show_counts(mut self, show_counts: bool) -> Self {
        self.show_counts = show_counts;
        self
    }

    /// Render a ranking as a JSONL string.
    pub fn render(&self, entries: &[FrequencyEntry], totals: &Totals) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, entries, totals)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Write JSONL output to a writer.
    pub fn write_to(
        &self,
        writer: &mut dyn Write,
        entries: &[FrequencyEntry],
        totals: &Totals,
    ) -> anyhow::Result<()> {
        let header = Header {
            version: FORMAT_VERSION,
            requested: self.requested,
            tie_break: self.tie_break.as_str(),
        };
        serde_json::to_writer(&mut *writer, &header)?;
        writeln!(writer)?;

        for (i, entry) in entries.iter().enumerate() {
            let line = WordLine {
                rank: i + 1,
                word: entry.word.as_str(),
                count: self.show_counts.then_some(entry.count),
            };
            serde_json::to_writer(&mut *writer, &line)?;
            writeln!(writer)?;
        }

        let footer = Footer {
            returned: entries.len(),
            distinct_words: totals.distinct_words,
            tokens: totals.tokens,
            complete: totals.complete,
        };
        serde_json::to_writer(&mut *writer, &footer)?;
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordrank_core::Word;

    fn sample() -> Vec<FrequencyEntry> {
        vec![
            FrequencyEntry {
                word: Word::new("the").unwrap(),
                count: 3,
            },
            FrequencyEntry {
                word: Word::new("fox").unwrap(),
                count: 2,
            },
        ]
    }

    fn totals() -> Totals {
        Totals {
            distinct_words: 6,
            tokens: 9,
            complete: true,
        }
    }

    fn parse(output: &str) -> Vec<serde_json::Value> {
        output
            .trim()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn header_entries_footer() {
        let output = JsonlWriter::new(2, TieBreak::Lexicographic)
            .render(&sample(), &totals())
            .unwrap();
        let lines = parse(&output);
        assert_eq!(lines.len(), 4);

        assert_eq!(lines[0]["Version"], FORMAT_VERSION);
        assert_eq!(lines[0]["Requested"], 2);
        assert_eq!(lines[0]["TieBreak"], "lexicographic");

        assert_eq!(lines[1]["Rank"], 1);
        assert_eq!(lines[1]["Word"], "the");
        assert!(lines[1].get("Count").is_none());
        assert_eq!(lines[2]["Word"], "fox");

        assert_eq!(lines[3]["Returned"], 2);
        assert_eq!(lines[3]["DistinctWords"], 6);
        assert_eq!(lines[3]["Tokens"], 9);
        assert_eq!(lines[3]["Complete"], true);
    }

    #[test]
    fn counts_when_requested() {
        let output = JsonlWriter::new(2, TieBreak::Lexicographic)
            .show_counts(true)
            .render(&sample(), &totals())
            .unwrap();
        let lines = parse(&output);
        assert_eq!(lines[1]["Count"], 3);
        assert_eq!(lines[2]["Count"], 2);
    }

    #[test]
    fn empty_ranking_has_header_and_footer() {
        let output = JsonlWriter::new(0, TieBreak::ReverseLexicographic)
            .render(&[], &Totals::default())
            .unwrap();
        let lines = parse(&output);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["TieBreak"], "reverse_lexicographic");
        assert_eq!(lines[1]["Returned"], 0);
        assert_eq!(lines[1]["Complete"], false);
    }
}
