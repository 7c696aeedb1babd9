//! Tokenizing, counting, and top-N selection of word frequencies.

mod engine;
mod selector;
mod table;
mod tokenizer;

pub use engine::{CancelFlag, Engine, PassSummary, Tally, checked_n, rank_top_words};
pub use selector::{TopSelector, select_top};
pub use table::{DefaultHashBuilder, FrequencyTable};
pub use tokenizer::{StreamWords, Tokenizer, Words};
