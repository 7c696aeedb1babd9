use rustc_hash::FxHasher;
use std::hash::{BuildHasher, BuildHasherDefault};
use wordrank_core::{
    DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, FrequencyEntry, MIN_LOAD_FACTOR, RankError,
    Word,
};

/// Hasher used when none is given.
pub type DefaultHashBuilder = BuildHasherDefault<FxHasher>;

const MIN_BUCKETS: usize = 8;
const MAX_INITIAL_BUCKETS: usize = 1 << 20;

#[derive(Debug, Clone)]
struct Slot {
    hash: u64,
    word: Word,
    count: u64,
}

/// Word → count map with separate chaining.
///
/// Buckets are owned `Vec`s of slots; each slot keeps its full hash so the
/// table can double without rehashing words. Lookups compare the hash and
/// then the word itself, so colliding hashes never merge distinct words.
#[derive(Debug, Clone)]
pub struct FrequencyTable<S = DefaultHashBuilder> {
    buckets: Vec<Vec<Slot>>,
    len: usize,
    total: u64,
    max_load_factor: f64,
    hash_builder: S,
}

impl FrequencyTable<DefaultHashBuilder> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// A table starting with `capacity` buckets, rounded up to a power of two
    /// and clamped to `[8, 2^20]`. It doubles once entries exceed
    /// `buckets * max_load_factor`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl Default for FrequencyTable<DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BuildHasher> FrequencyTable<S> {
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let bucket_count = capacity
            .clamp(MIN_BUCKETS, MAX_INITIAL_BUCKETS)
            .next_power_of_two();
        Self {
            buckets: vec![Vec::new(); bucket_count],
            len: 0,
            total: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hash_builder,
        }
    }

    /// Entries per bucket allowed before the bucket array doubles.
    ///
    /// Non-finite values and values below [`MIN_LOAD_FACTOR`] fall back to the
    /// default.
    pub fn with_max_load_factor(mut self, max_load_factor: f64) -> Self {
        let usable = max_load_factor.is_finite() && max_load_factor >= MIN_LOAD_FACTOR;
        self.max_load_factor = if usable {
            max_load_factor
        } else {
            DEFAULT_MAX_LOAD_FACTOR
        };
        self
    }

    /// Count one occurrence of `word`, inserting it with count 1 if absent.
    ///
    /// Returns the updated count. The word must be non-empty lowercase ASCII;
    /// anything else is rejected with [`RankError::InvalidKey`].
    pub fn bump(&mut self, word: &str) -> Result<u64, RankError> {
        if word.is_empty() {
            return Err(RankError::InvalidKey("empty word".to_string()));
        }

        let hash = self.hash_builder.hash_one(word);
        let index = self.bucket_index(hash);
        if let Some(slot) = self.buckets[index]
            .iter_mut()
            .find(|slot| slot.hash == hash && slot.word.as_str() == word)
        {
            slot.count += 1;
            self.total += 1;
            return Ok(slot.count);
        }

        let word = Word::new(word)?;
        if self.len + 1 > self.grow_threshold() {
            self.grow();
        }
        let index = self.bucket_index(hash);
        self.buckets[index].push(Slot {
            hash,
            word,
            count: 1,
        });
        self.len += 1;
        self.total += 1;
        Ok(1)
    }

    /// Current count for `word`, if present.
    pub fn get(&self, word: &str) -> Option<u64> {
        let hash = self.hash_builder.hash_one(word);
        self.buckets[self.bucket_index(hash)]
            .iter()
            .find(|slot| slot.hash == hash && slot.word.as_str() == word)
            .map(|slot| slot.count)
    }
}

impl<S> FrequencyTable<S> {
    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sum of all counts, i.e. the number of successful bumps.
    pub fn total_count(&self) -> u64 {
        self.total
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Every `(word, count)` pair, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.buckets
            .iter()
            .flatten()
            .map(|slot| (slot.word.as_str(), slot.count))
    }

    /// Consume the table into owned entries, in no particular order.
    pub fn into_entries(self) -> impl Iterator<Item = FrequencyEntry> {
        self.buckets
            .into_iter()
            .flatten()
            .map(|slot| FrequencyEntry {
                word: slot.word,
                count: slot.count,
            })
    }

    fn bucket_index(&self, hash: u64) -> usize {
        // Bucket count is always a power of two.
        (hash as usize) & (self.buckets.len() - 1)
    }

    fn grow_threshold(&self) -> usize {
        self.threshold_for(self.buckets.len())
    }

    fn threshold_for(&self, bucket_count: usize) -> usize {
        (bucket_count as f64 * self.max_load_factor) as usize
    }

    /// Double until the next insert fits under the load factor.
    fn grow(&mut self) {
        let mut new_count = self.buckets.len().saturating_mul(2);
        while self.threshold_for(new_count) < self.len + 1 {
            match new_count.checked_mul(2) {
                Some(next) => new_count = next,
                None => break,
            }
        }
        if new_count == self.buckets.len() {
            return;
        }
        tracing::trace!(
            from = self.buckets.len(),
            to = new_count,
            entries = self.len,
            "growing frequency table"
        );
        let old = std::mem::replace(&mut self.buckets, vec![Vec::new(); new_count]);
        for slot in old.into_iter().flatten() {
            let index = self.bucket_index(slot.hash);
            self.buckets[index].push(slot);
        }
    }
}
