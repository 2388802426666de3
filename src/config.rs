//! Comparer configuration
//!
//! [`ComparerConfig`] holds every threshold and weight the comparison uses.
//! It is fixed for the lifetime of an [`AddressComparer`](crate::AddressComparer)
//! and validated once at construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::{Category, CategoryWeights};
use crate::algorithms::Metric;

/// Province scores at or below this value disqualify an alignment candidate.
pub const DEFAULT_PROVINCE_GATE: f64 = 13.0;

/// Leniency handed to the canonical mapper.
pub const DEFAULT_MAPPER_LENIENCY: u8 = 60;

/// Rewritten addresses must be longer than this (in chars) to be mapped.
pub const DEFAULT_MAPPER_MIN_LEN: usize = 15;

/// A single-segment side must be longer than this (in chars) to be aligned.
pub const DEFAULT_MIN_SEGMENT_LEN: usize = 3;

/// Errors that can occur when validating a configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Weight is negative, NaN or infinite
    #[error("Weight for '{category}' must be a finite, non-negative number, got {value}")]
    InvalidWeight { category: Category, value: f64 },

    /// Every weight is zero, so no candidate could ever be preferred
    #[error("At least one category weight must be positive")]
    AllWeightsZero,

    /// Province gate outside the 0..=100 similarity scale
    #[error("Province gate must be in range [0, 100], got {0}")]
    InvalidGate(f64),

    /// Mapper leniency outside the 0..=100 similarity scale
    #[error("Mapper leniency must be in range [0, 100], got {0}")]
    InvalidLeniency(u8),
}

/// How equally-scored alignment candidates are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Strict greater-than: the first candidate reaching the maximum wins.
    #[default]
    FirstFound,
    /// Greater-or-equal: the last candidate reaching the maximum wins.
    LastFound,
}

impl TieBreak {
    /// Whether `value` replaces the running maximum `best`.
    #[must_use]
    pub fn prefers(self, value: f64, best: f64) -> bool {
        match self {
            TieBreak::FirstFound => value > best,
            TieBreak::LastFound => value >= best,
        }
    }
}

/// How alignment candidates are ranked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRule {
    /// Discard candidates failing the province gate, rank the rest by the
    /// weighted sum of category scores.
    #[default]
    WeightedGated,
    /// No gate; rank by the plain sum of category scores. Ties always go to
    /// the last candidate found, whatever [`TieBreak`] says.
    Unweighted,
}

/// Configuration for [`AddressComparer`](crate::AddressComparer).
///
/// # Examples
///
/// ```
/// use fuzzyaddr::{ComparerConfig, TieBreak};
///
/// let config = ComparerConfig {
///     province_gate: 10.0,
///     tie_break: TieBreak::LastFound,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparerConfig {
    /// Category weights for candidate ranking
    pub weights: CategoryWeights,
    /// Province score at or below which a candidate is discarded
    pub province_gate: f64,
    /// Resolution of equally-scored candidates under the weighted rule
    pub tie_break: TieBreak,
    /// Candidate ranking rule
    pub selection: SelectionRule,
    /// Primitive used to score a pair of category segments
    pub group_metric: Metric,
    /// Single-segment sides must be longer than this to be aligned
    pub min_segment_len: usize,
    /// Rewritten addresses must be longer than this to reach the mapper
    pub mapper_min_len: usize,
    /// Leniency passed to the canonical mapper
    pub mapper_leniency: u8,
}

impl ComparerConfig {
    /// Province 0.4, district 0.3, ward 0.2, street 0.1.
    #[must_use]
    pub fn default_weights() -> CategoryWeights {
        CategoryWeights {
            street: 0.1,
            ward: 0.2,
            district: 0.3,
            province: 0.4,
        }
    }

    /// Check every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (category, &value) in self.weights.iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { category, value });
            }
        }
        if self.weights.sum() <= 0.0 {
            return Err(ConfigError::AllWeightsZero);
        }
        if !(0.0..=100.0).contains(&self.province_gate) {
            return Err(ConfigError::InvalidGate(self.province_gate));
        }
        if self.mapper_leniency > 100 {
            return Err(ConfigError::InvalidLeniency(self.mapper_leniency));
        }
        Ok(())
    }
}

impl Default for ComparerConfig {
    fn default() -> Self {
        Self {
            weights: Self::default_weights(),
            province_gate: DEFAULT_PROVINCE_GATE,
            tie_break: TieBreak::default(),
            selection: SelectionRule::default(),
            group_metric: Metric::default(),
            min_segment_len: DEFAULT_MIN_SEGMENT_LEN,
            mapper_min_len: DEFAULT_MAPPER_MIN_LEN,
            mapper_leniency: DEFAULT_MAPPER_LENIENCY,
        }
    }
}
