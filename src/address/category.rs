//! Administrative categories and per-category containers

use std::fmt;

use serde::{Deserialize, Serialize};

/// One level of the Vietnamese administrative address hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// House number, street, building detail
    Street,
    /// Ward / commune / township (phường, xã, thị trấn)
    Ward,
    /// Urban or rural district (quận, huyện, thị xã)
    District,
    /// Province or centrally-governed city (tỉnh, thành phố)
    Province,
}

impl Category {
    /// All categories in canonical order: street, ward, district, province.
    pub const ALL: [Category; 4] = [
        Category::Street,
        Category::Ward,
        Category::District,
        Category::Province,
    ];

    /// Position in canonical order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Category::Street => 0,
            Category::Ward => 1,
            Category::District => 2,
            Category::Province => 3,
        }
    }

    /// Lowercase name, as used in serialized reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Street => "street",
            Category::Ward => "ward",
            Category::District => "district",
            Category::Province => "province",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per category.
///
/// The four fields are always present, so a mapping built from this type
/// can never lose or gain a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerCategory<T> {
    pub street: T,
    pub ward: T,
    pub district: T,
    pub province: T,
}

impl<T> PerCategory<T> {
    /// Build by evaluating `f` once per category, in canonical order.
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            street: f(Category::Street),
            ward: f(Category::Ward),
            district: f(Category::District),
            province: f(Category::Province),
        }
    }

    #[must_use]
    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Street => &self.street,
            Category::Ward => &self.ward,
            Category::District => &self.district,
            Category::Province => &self.province,
        }
    }

    /// Iterate `(category, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Apply `f` to every value.
    pub fn map<U>(&self, mut f: impl FnMut(Category, &T) -> U) -> PerCategory<U> {
        PerCategory::from_fn(|c| f(c, self.get(c)))
    }
}

impl<T: Clone> PerCategory<T> {
    /// Same value in every category.
    pub fn uniform(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

/// Per-category similarity ratios on the 0..=100 scale.
pub type ScoreVector = PerCategory<f64>;

/// Per-category weights used to rank alignment candidates.
pub type CategoryWeights = PerCategory<f64>;

impl PerCategory<f64> {
    /// Σ score × weight over the four categories.
    #[must_use]
    pub fn weighted_sum(&self, weights: &CategoryWeights) -> f64 {
        self.iter().map(|(c, score)| score * weights.get(c)).sum()
    }

    /// Plain sum over the four categories.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, score)| *score).sum()
    }
}
