use crate::selector::TopSelector;
use crate::table::FrequencyTable;
use crate::tokenizer::Tokenizer;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use wordrank_core::{
    FrequencyEntry, OverlongPolicy, RankConfig, RankError, RankedResult, TieBreak,
};

/// Shared flag that asks a running pass to stop early.
///
/// A cancelled pass still ranks whatever it counted; the result is marked
/// incomplete.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Statistics for one counting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    /// Tokens counted. Always equal to the sum of all counts.
    pub tokens: u64,
    pub distinct_words: usize,
    /// Letter runs longer than the configured limit.
    pub overlong_runs: u64,
    /// False if the pass was cancelled before the end of its input.
    pub complete: bool,
}

/// The populated table of a finished pass, ready to be ranked.
#[derive(Debug)]
pub struct Tally {
    table: FrequencyTable,
    summary: PassSummary,
    tie_break: TieBreak,
}

impl Tally {
    pub fn summary(&self) -> PassSummary {
        self.summary
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Rank the top `n` words and release the table.
    pub fn rank(self, n: usize) -> RankedResult {
        let ranked = self.selector_for(n).select(self.table.entries());
        if self.summary.complete {
            ranked
        } else {
            RankedResult::partial(ranked.into_words())
        }
    }

    /// Rank the top `n` words with their counts and release the table.
    ///
    /// The entries carry no completeness marker. Check `summary().complete`
    /// before calling this if the pass may have been cancelled.
    pub fn rank_entries(self, n: usize) -> Result<Vec<FrequencyEntry>, RankError> {
        self.selector_for(n).select_entries(self.table.entries())
    }

    fn selector_for(&self, n: usize) -> TopSelector {
        TopSelector::new(n).with_tie_break(self.tie_break)
    }
}

/// Runs tokenize → count → select over one input.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: RankConfig,
    cancel: Option<CancelFlag>,
}

impl Engine {
    pub fn new(config: RankConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Stop counting when `flag` is raised.
    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Tokenize all of `input` into a populated table.
    #[tracing::instrument(skip_all)]
    pub fn count<R: Read>(&self, input: R) -> Result<Tally, RankError> {
        let mut words = Tokenizer::from_config(&self.config).stream(BufReader::new(input));
        let (table, complete) = self.tally(&mut words)?;
        Ok(self.finish(table, words.overlong_runs(), complete))
    }

    /// Tokenize in-memory text into a populated table.
    #[tracing::instrument(skip_all)]
    pub fn count_str(&self, text: &str) -> Result<Tally, RankError> {
        let mut words = Tokenizer::from_config(&self.config).words(text);
        let mut tokens = words.by_ref().map(Ok::<String, io::Error>);
        let (table, complete) = self.tally(&mut tokens)?;
        Ok(self.finish(table, words.overlong_runs(), complete))
    }

    pub fn count_path(&self, path: &Path) -> Result<Tally, RankError> {
        let file = File::open(path)
            .map_err(|e| RankError::Io(format!("{}: {e}", path.display())))?;
        self.count(file)
    }

    /// The `n` most frequent words of `input`.
    pub fn rank<R: Read>(&self, input: R, n: usize) -> Result<RankedResult, RankError> {
        Ok(self.count(input)?.rank(n))
    }

    pub fn rank_str(&self, text: &str, n: usize) -> Result<RankedResult, RankError> {
        Ok(self.count_str(text)?.rank(n))
    }

    pub fn rank_path(&self, path: &Path, n: usize) -> Result<RankedResult, RankError> {
        Ok(self.count_path(path)?.rank(n))
    }

    fn tally<I>(&self, words: &mut I) -> Result<(FrequencyTable, bool), RankError>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let mut table = FrequencyTable::with_capacity(self.config.initial_capacity)
            .with_max_load_factor(self.config.max_load_factor);

        for word in words {
            if self.is_cancelled() {
                return Ok((table, false));
            }
            let word = word?;
            debug_assert!(!word.is_empty(), "tokenizer emitted an empty word");
            table.bump(&word)?;
        }
        Ok((table, true))
    }

    fn finish(&self, table: FrequencyTable, overlong_runs: u64, complete: bool) -> Tally {
        let summary = PassSummary {
            tokens: table.total_count(),
            distinct_words: table.len(),
            overlong_runs,
            complete,
        };
        tracing::debug!(
            tokens = summary.tokens,
            distinct = summary.distinct_words,
            buckets = table.bucket_count(),
            "counting pass finished"
        );
        if overlong_runs > 0 {
            let limit = self.config.max_word_len.unwrap_or_default();
            match self.config.overlong {
                OverlongPolicy::Skip => tracing::warn!(
                    runs = overlong_runs,
                    limit,
                    "skipped words longer than the length limit"
                ),
                policy => tracing::debug!(
                    runs = overlong_runs,
                    limit,
                    %policy,
                    "shortened words longer than the length limit"
                ),
            }
        }
        if !complete {
            tracing::warn!("pass cancelled, ranking partial counts");
        }

        Tally {
            table,
            summary,
            tie_break: self.config.tie_break,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }
}

/// Rank the `n` most frequent words of `input` with the default config.
///
/// Negative `n` is rejected with [`RankError::InvalidArgument`] before any
/// input is read.
pub fn rank_top_words<R: Read>(input: R, n: i64) -> Result<RankedResult, RankError> {
    let n = checked_n(n)?;
    Engine::default().rank(input, n)
}

/// Convert a caller-supplied word count, rejecting negatives.
pub fn checked_n(n: i64) -> Result<usize, RankError> {
    usize::try_from(n).map_err(|_| {
        RankError::InvalidArgument(format!("n must be a non-negative count, got {n}"))
    })
}
