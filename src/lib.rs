//! FuzzyAddr - Fuzzy comparison of Vietnamese postal addresses
//!
//! Free-text addresses list the same administrative units (street, ward,
//! district, province) in whatever order the writer chose, with or without
//! prefixes like "PHƯỜNG" or "TP". This crate works out which comma segment
//! of each address plays which role, then scores the two addresses category
//! by category.
//!
//! # Features
//! - FuzzyWuzzy-style similarity primitives over NFC-normalized text
//! - Alignment search over all 24 × 24 segment orderings, gated on province
//! - Canonical mapping through a pluggable [`CanonicalMapper`], with an
//!   in-memory [`Gazetteer`]
//! - Parallel batch comparison
//!
//! # Example
//!
//! ```
//! use fuzzyaddr::AddressComparer;
//!
//! let comparer = AddressComparer::default();
//! let result = comparer
//!     .compare(
//!         "12 Lê Lợi, Bến Thành, Quận 1, Hồ Chí Minh",
//!         "TP Hồ Chí Minh, Quận 1, Phường Bến Thành, 12 Lê Lợi",
//!     )
//!     .unwrap();
//!
//! assert!(result.alignment.is_aligned());
//! assert_eq!(result.scores().province, 100.0);
//! assert_eq!(result.scores().ward, 100.0);
//! ```

pub mod address;
pub mod algorithms;
pub mod alignment;
pub mod comparer;
pub mod config;
pub mod mapper;
pub mod report;

pub use address::{
    AddressGroups, Category, CategoryWeights, FullStringScores, Permutation, PermutationCatalog,
    ScoreVector,
};
pub use algorithms::Metric;
pub use alignment::{Aligner, AlignmentResult, CleanedAddress, Regime, Side, UNALIGNED_SCORE};
pub use comparer::{AddressComparer, PARALLEL_THRESHOLD};
pub use config::{ComparerConfig, ConfigError, SelectionRule, TieBreak};
pub use mapper::{CanonicalMapper, Gazetteer, GazetteerEntry, MappedAddress};
pub use report::ComparisonResult;
