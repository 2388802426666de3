//! Positional hypotheses: which category each comma slot holds

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Category;

/// An ordering of the four categories over the four positional slots.
///
/// Slot `i` of a comma-delimited address is read as `self.slots()[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[Category; 4]", into = "[Category; 4]")]
pub struct Permutation([Category; 4]);

impl Permutation {
    /// street, ward, district, province
    pub const CANONICAL: Permutation = Permutation(Category::ALL);

    /// Order applied to both sides when each is a single segment.
    pub const SINGLE_SEGMENT: Permutation = Permutation([
        Category::Province,
        Category::Street,
        Category::Ward,
        Category::District,
    ]);

    /// Order applied to a single-segment side copied into every slot.
    pub const INJECT_ALL: Permutation = Permutation::CANONICAL;

    /// Returns `None` unless every category appears exactly once.
    #[must_use]
    pub fn new(slots: [Category; 4]) -> Option<Self> {
        let mut seen = [false; 4];
        for c in slots {
            if std::mem::replace(&mut seen[c.index()], true) {
                return None;
            }
        }
        Some(Self(slots))
    }

    #[must_use]
    pub const fn slots(&self) -> &[Category; 4] {
        &self.0
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "({a}, {b}, {c}, {d})")
    }
}

impl TryFrom<[Category; 4]> for Permutation {
    type Error = String;

    fn try_from(slots: [Category; 4]) -> Result<Self, Self::Error> {
        Self::new(slots).ok_or_else(|| format!("not a permutation of categories: {slots:?}"))
    }
}

impl From<Permutation> for [Category; 4] {
    fn from(p: Permutation) -> Self {
        p.0
    }
}

/// Every ordering of the four categories, fixed at construction.
///
/// Orderings are listed lexicographically by canonical index, so index 0 is
/// [`Permutation::CANONICAL`] and index 23 is its reverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationCatalog {
    permutations: Vec<Permutation>,
}

impl PermutationCatalog {
    /// Number of orderings of four categories (4!).
    pub const SIZE: usize = 24;

    #[must_use]
    pub fn new() -> Self {
        let mut permutations = Vec::with_capacity(Self::SIZE);
        let mut prefix = Vec::with_capacity(4);
        let mut remaining = Category::ALL.to_vec();
        Self::generate(&mut prefix, &mut remaining, &mut permutations);
        Self { permutations }
    }

    fn generate(prefix: &mut Vec<Category>, remaining: &mut Vec<Category>, out: &mut Vec<Permutation>) {
        if remaining.is_empty() {
            if let [a, b, c, d] = prefix[..] {
                out.push(Permutation([a, b, c, d]));
            }
            return;
        }
        for i in 0..remaining.len() {
            let picked = remaining.remove(i);
            prefix.push(picked);
            Self::generate(prefix, remaining, out);
            prefix.pop();
            remaining.insert(i, picked);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.permutations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.permutations.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Permutation> {
        self.permutations.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Permutation> {
        self.permutations.iter()
    }
}

impl Default for PermutationCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a PermutationCatalog {
    type Item = &'a Permutation;
    type IntoIter = std::slice::Iter<'a, Permutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
