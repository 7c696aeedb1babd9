use crate::RankError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// A non-empty run of lowercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// Build a word, rejecting anything that is not `[a-z]+`.
    pub fn new(word: impl Into<String>) -> Result<Self, RankError> {
        let word = word.into();
        if word.is_empty() {
            return Err(RankError::InvalidKey("empty word".to_string()));
        }
        if !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(RankError::InvalidKey(format!(
                "{word:?} is not a lowercase ASCII word"
            )));
        }
        Ok(Self(word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A `Word` is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Word {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A word and how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub word: Word,
    pub count: u64,
}

/// Secondary ordering applied to words with equal counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Ascending byte order: "a" before "b".
    #[default]
    Lexicographic,
    /// Descending byte order: "b" before "a".
    ReverseLexicographic,
}

impl TieBreak {
    /// Compare two words with equal counts. `Less` means `a` ranks first.
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Lexicographic => a.cmp(b),
            Self::ReverseLexicographic => b.cmp(a),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lexicographic => "lexicographic",
            Self::ReverseLexicographic => "reverse_lexicographic",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full ranking order: higher count first, then the tie-break.
pub fn rank_order(tie_break: TieBreak, a: (&str, u64), b: (&str, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| tie_break.compare(a.0, b.0))
}

/// What the tokenizer does with a letter run longer than the configured limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlongPolicy {
    /// Keep the first `max_word_len` letters, drop the rest of the run.
    #[default]
    Truncate,
    /// Emit the run as consecutive chunks of at most `max_word_len` letters.
    Split,
    /// Drop the whole run. Skipped runs are counted and reported.
    Skip,
}

impl OverlongPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Truncate => "truncate",
            Self::Split => "split",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for OverlongPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ordered words handed back to the caller.
///
/// Owns its strings outright: nothing here points into the frequency table
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RankedResult {
    words: Vec<String>,
    complete: bool,
}

impl RankedResult {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            complete: true,
        }
    }

    /// A result built from a pass that stopped before the end of its input.
    pub fn partial(words: Vec<String>) -> Self {
        Self {
            words,
            complete: false,
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// False only when the pass was cancelled before consuming all input.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

impl IntoIterator for RankedResult {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.into_iter()
    }
}
