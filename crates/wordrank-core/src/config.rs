use crate::{OverlongPolicy, RankError, TieBreak};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default initial bucket hint for the frequency table.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Default entries-per-bucket ratio before the table doubles.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Smallest accepted load factor: 100 buckets per entry.
pub const MIN_LOAD_FACTOR: f64 = 0.01;

/// Tuning knobs for a ranking pass.
///
/// None of these change which words are counted or how they are ordered
/// except `max_word_len`/`overlong` (tokenization) and `tie_break`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankConfig {
    /// Longest letter run emitted as-is. `None` means no limit.
    pub max_word_len: Option<usize>,
    pub overlong: OverlongPolicy,
    pub initial_capacity: usize,
    pub max_load_factor: f64,
    pub tie_break: TieBreak,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            max_word_len: None,
            overlong: OverlongPolicy::default(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            tie_break: TieBreak::default(),
        }
    }
}

impl RankConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, RankError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RankError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, RankError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RankError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), RankError> {
        if self.max_word_len == Some(0) {
            return Err(RankError::Config(
                "max_word_len must be at least 1".to_string(),
            ));
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor < MIN_LOAD_FACTOR {
            return Err(RankError::Config(format!(
                "max_load_factor must be a finite number of at least {MIN_LOAD_FACTOR}, got {}",
                self.max_load_factor
            )));
        }
        Ok(())
    }
}
