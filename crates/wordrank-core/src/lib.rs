//! wordrank core domain types, configuration, and errors.

mod config;
mod error;
mod types;

pub use config::{
    DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, MIN_LOAD_FACTOR, RankConfig,
};
pub use error::RankError;
pub use types::{FrequencyEntry, OverlongPolicy, RankedResult, TieBreak, Word, rank_order};
