//! Plain-text and JSONL rendering of ranked words.

mod jsonl;
mod plain;

pub use jsonl::JsonlWriter;
pub use plain::PlainWriter;

/// Whole-pass figures shown alongside a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub distinct_words: usize,
    pub tokens: u64,
    pub complete: bool,
}
