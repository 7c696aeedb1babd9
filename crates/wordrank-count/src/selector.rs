use std::cmp::Ordering;
use std::collections::BinaryHeap;
use wordrank_core::{FrequencyEntry, RankError, RankedResult, TieBreak, Word, rank_order};

/// Switch from a full sort to a bounded heap once there are more than this
/// many entries per requested slot.
const HEAP_RATIO: usize = 4;

/// Select the `n` most frequent words using the default tie-break
/// (lexicographic ascending).
pub fn select_top<'a>(
    entries: impl IntoIterator<Item = (&'a str, u64)>,
    n: usize,
) -> RankedResult {
    TopSelector::new(n).select(entries)
}

/// Picks the highest-count words from an unordered entry set.
///
/// Ordering is count descending, then the configured [`TieBreak`]. That is a
/// total order over distinct words, so the output does not depend on the
/// order entries arrive in.
#[derive(Debug, Clone, Copy)]
pub struct TopSelector {
    n: usize,
    tie_break: TieBreak,
}

impl TopSelector {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            tie_break: TieBreak::default(),
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Ranked words, copied out of `entries`.
    pub fn select<'a>(
        &self,
        entries: impl IntoIterator<Item = (&'a str, u64)>,
    ) -> RankedResult {
        let words = self
            .ranked(entries)
            .into_iter()
            .map(|(word, _)| word.to_string())
            .collect();
        RankedResult::new(words)
    }

    /// Ranked entries with their counts, copied out of `entries`.
    ///
    /// Fails with [`RankError::InvalidKey`] if a selected word is not a
    /// valid [`Word`].
    pub fn select_entries<'a>(
        &self,
        entries: impl IntoIterator<Item = (&'a str, u64)>,
    ) -> Result<Vec<FrequencyEntry>, RankError> {
        self.ranked(entries)
            .into_iter()
            .map(|(word, count)| {
                Ok(FrequencyEntry {
                    word: Word::new(word)?,
                    count,
                })
            })
            .collect()
    }

    fn ranked<'a>(
        &self,
        entries: impl IntoIterator<Item = (&'a str, u64)>,
    ) -> Vec<(&'a str, u64)> {
        if self.n == 0 {
            return Vec::new();
        }
        let entries: Vec<(&str, u64)> = entries.into_iter().collect();
        if entries.len() > self.n.saturating_mul(HEAP_RATIO) {
            self.by_heap(entries)
        } else {
            self.by_sort(entries)
        }
    }

    fn by_sort<'a>(&self, mut entries: Vec<(&'a str, u64)>) -> Vec<(&'a str, u64)> {
        let tie_break = self.tie_break;
        entries.sort_unstable_by(|a, b| rank_order(tie_break, *a, *b));
        entries.truncate(self.n);
        entries
    }

    fn by_heap<'a>(&self, entries: Vec<(&'a str, u64)>) -> Vec<(&'a str, u64)> {
        // Max-heap on rank position: the top is the worst entry kept so far.
        let mut heap: BinaryHeap<Candidate<'a>> = BinaryHeap::with_capacity(self.n + 1);
        for (word, count) in entries {
            let candidate = Candidate {
                word,
                count,
                tie_break: self.tie_break,
            };
            if heap.len() < self.n {
                heap.push(candidate);
            } else if let Some(worst) = heap.peek() {
                if candidate < *worst {
                    heap.pop();
                    heap.push(candidate);
                }
            }
        }
        heap.into_sorted_vec()
            .into_iter()
            .map(|c| (c.word, c.count))
            .collect()
    }
}

/// Heap element ordered by rank: `Less` ranks earlier.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    word: &'a str,
    count: u64,
    tie_break: TieBreak,
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        rank_order(
            self.tie_break,
            (self.word, self.count),
            (other.word, other.count),
        )
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&'static str, u64)]) -> Vec<(&'static str, u64)> {
        pairs.to_vec()
    }

    #[test]
    fn orders_by_count_descending() {
        let input = entries(&[("dog", 1), ("the", 3), ("fox", 2)]);
        assert_eq!(select_top(input, 3).words(), ["the", "fox", "dog"]);
    }

    #[test]
    fn ties_break_lexicographically() {
        let input = entries(&[("b", 2), ("a", 2)]);
        assert_eq!(select_top(input, 1).words(), ["a"]);
    }

    #[test]
    fn reverse_tie_break() {
        let input = entries(&[("a", 2), ("c", 2), ("b", 2)]);
        let result = TopSelector::new(3)
            .with_tie_break(TieBreak::ReverseLexicographic)
            .select(input);
        assert_eq!(result.words(), ["c", "b", "a"]);
    }

    #[test]
    fn n_larger_than_entries_returns_all() {
        let input = entries(&[("x", 1), ("y", 5)]);
        let result = select_top(input, 10);
        assert_eq!(result.words(), ["y", "x"]);
    }

    #[test]
    fn zero_n_is_empty() {
        let input = entries(&[("x", 1)]);
        assert!(select_top(input, 0).is_empty());
    }

    #[test]
    fn empty_entries_is_empty() {
        assert!(select_top(Vec::<(&str, u64)>::new(), 5).is_empty());
    }

    #[test]
    fn input_order_does_not_matter() {
        let forward = entries(&[("a", 1), ("b", 1), ("c", 2), ("d", 1)]);
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(select_top(forward, 3), select_top(backward, 3));
    }

    #[test]
    fn heap_and_sort_agree() {
        // 26 * 26 words with counts cycling 1..=7 so plenty of ties.
        let owned: Vec<String> = (b'a'..=b'z')
            .flat_map(|a| (b'a'..=b'z').map(move |b| format!("{}{}", a as char, b as char)))
            .collect();
        let input: Vec<(&str, u64)> = owned
            .iter()
            .enumerate()
            .map(|(i, w)| (w.as_str(), (i % 7) as u64 + 1))
            .collect();

        for n in [1, 3, 10, 50] {
            for tie_break in [TieBreak::Lexicographic, TieBreak::ReverseLexicographic] {
                let selector = TopSelector::new(n).with_tie_break(tie_break);
                let heap = selector.by_heap(input.clone());
                let sort = selector.by_sort(input.clone());
                assert_eq!(heap, sort, "n={n} tie_break={tie_break}");
                assert_eq!(heap.len(), n);
            }
        }
    }

    #[test]
    fn heap_path_is_used_for_large_inputs() {
        let input = entries(&[
            ("a", 1),
            ("b", 9),
            ("c", 3),
            ("d", 9),
            ("e", 2),
            ("f", 4),
        ]);
        // 6 entries > 1 * HEAP_RATIO
        assert_eq!(select_top(input, 1).words(), ["b"]);
    }

    #[test]
    fn select_entries_keeps_counts() {
        let input = entries(&[("fox", 2), ("the", 3)]);
        let ranked = TopSelector::new(2).select_entries(input).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].word.as_str(), "the");
        assert_eq!(ranked[0].count, 3);
        assert_eq!(ranked[1].word.as_str(), "fox");
        assert_eq!(ranked[1].count, 2);
    }

    #[test]
    fn select_entries_rejects_malformed_words() {
        let input = entries(&[("Bad", 2)]);
        assert!(matches!(
            TopSelector::new(1).select_entries(input),
            Err(RankError::InvalidKey(_))
        ));
    }

    #[test]
    fn output_is_monotone() {
        let input = entries(&[("q", 4), ("r", 1), ("s", 4), ("t", 2), ("u", 3)]);
        let ranked = TopSelector::new(5).select_entries(input).unwrap();
        for pair in ranked.windows(2) {
            let ord = rank_order(
                TieBreak::Lexicographic,
                (pair[0].word.as_str(), pair[0].count),
                (pair[1].word.as_str(), pair[1].count),
            );
            assert_eq!(ord, Ordering::Less);
        }
    }
}
