//! Address model: categories, group extraction, permutations and scoring

pub mod category;
pub mod groups;
pub mod permutation;
pub mod scoring;

pub use category::{Category, CategoryWeights, PerCategory, ScoreVector};
pub use groups::{extract_groups, inject_all, parse_canonical, to_canonical_string, AddressGroups};
pub use permutation::{Permutation, PermutationCatalog};
pub use scoring::{
    full_string_scores, score_category, score_groups, score_strings, FullStringScores,
    BOTH_EMPTY_SCORE, ONE_EMPTY_SCORE,
};
