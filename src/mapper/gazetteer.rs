//! In-memory gazetteer of Vietnamese administrative units
//!
//! A gazetteer is a flat list of `(province, district, ward)` entries; a
//! province-only or district-level entry leaves the lower levels empty.
//! Names are cleaned on insertion so lookups compare like with like.
//!
//! # Example
//!
//! ```rust
//! use fuzzyaddr::mapper::{CanonicalMapper, Gazetteer};
//!
//! let gazetteer = Gazetteer::builder()
//!     .ward("Hồ Chí Minh", "Quận 1", "Bến Nghé")
//!     .ward("Hồ Chí Minh", "Quận 1", "Bến Thành")
//!     .district("Hà Nội", "Ba Đình")
//!     .build();
//!
//! let mapped = gazetteer.resolve("12 LÊ LỢI,PHƯỜNG BẾN THÀNH,QUẬN 1,TP HỒ CHÍ MINH", 60).unwrap();
//! assert_eq!(mapped.kind, "full");
//! assert_eq!(mapped.ward, "BẾN THÀNH");
//! assert_eq!(mapped.province, "HỒ CHÍ MINH");
//! ```

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{CanonicalMapper, MappedAddress};
use crate::address::{parse_canonical, Category};
use crate::algorithms::fuzz::partial_ratio;
use crate::algorithms::normalize::{clean_and_reduce, clean_upper_delimited};

/// Reduced names shorter than this are too ambiguous for substring matching
/// ("1" would match any house number).
const MIN_REDUCED_LEN: usize = 3;

/// Level weights used to rank gazetteer candidates.
const PROVINCE_WEIGHT: f64 = 0.4;
const DISTRICT_WEIGHT: f64 = 0.3;
const WARD_WEIGHT: f64 = 0.2;

/// One administrative unit, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteerEntry {
    pub province: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub ward: String,
}

impl GazetteerEntry {
    pub fn new(
        province: impl Into<String>,
        district: impl Into<String>,
        ward: impl Into<String>,
    ) -> Self {
        Self {
            province: province.into(),
            district: district.into(),
            ward: ward.into(),
        }
    }
}

/// A name at one level, cleaned and reduced for its category.
#[derive(Debug, Clone, Default)]
struct Level {
    name: String,
    reduced: String,
}

impl Level {
    fn new(raw: &str, category: Category) -> Self {
        let name = clean_upper_delimited(raw);
        let reduced = clean_and_reduce(&name, category);
        Self { name, reduced }
    }

    fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Best of full-name and reduced-name substring similarity.
    fn score(&self, query: &Level) -> u8 {
        if self.is_empty() || query.is_empty() {
            return 0;
        }
        let full = partial_ratio(&self.name, &query.name);
        if self.reduced.chars().count() < MIN_REDUCED_LEN || query.reduced.is_empty() {
            return full;
        }
        full.max(partial_ratio(&self.reduced, &query.reduced))
    }
}

#[derive(Debug, Clone)]
struct Record {
    province: Level,
    district: Level,
    ward: Level,
}

impl Record {
    fn key(&self) -> (String, String, String) {
        (
            self.province.name.clone(),
            self.district.name.clone(),
            self.ward.name.clone(),
        )
    }
}

impl From<&GazetteerEntry> for Record {
    fn from(entry: &GazetteerEntry) -> Self {
        Self {
            province: Level::new(&entry.province, Category::Province),
            district: Level::new(&entry.district, Category::District),
            ward: Level::new(&entry.ward, Category::Ward),
        }
    }
}

/// Best candidate found so far during a lookup.
struct Candidate<'a> {
    record: &'a Record,
    value: f64,
    district_matched: bool,
    ward_matched: bool,
}

/// Reference hierarchy used as a [`CanonicalMapper`].
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    records: Vec<Record>,
}

impl Gazetteer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> GazetteerBuilder {
        GazetteerBuilder::default()
    }

    /// Build from entries.
    ///
    /// Entries with an empty province are skipped, as are entries whose
    /// cleaned names repeat an earlier one.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = GazetteerEntry>,
    {
        let mut gazetteer = Self::new();
        let mut seen = AHashSet::new();
        let mut duplicates = 0usize;
        for entry in entries {
            let record = Record::from(&entry);
            if record.province.is_empty() {
                debug!(?entry, "skipping gazetteer entry without province");
                continue;
            }
            if !seen.insert(record.key()) {
                duplicates += 1;
                continue;
            }
            gazetteer.records.push(record);
        }
        debug!(records = gazetteer.len(), duplicates, "built gazetteer");
        gazetteer
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<GazetteerEntry> for Gazetteer {
    fn from_iter<I: IntoIterator<Item = GazetteerEntry>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl CanonicalMapper for Gazetteer {
    fn resolve(&self, address: &str, leniency: u8) -> Option<MappedAddress> {
        let groups = parse_canonical(address);
        let query = Record {
            province: Level::new(&groups.province, Category::Province),
            district: Level::new(&groups.district, Category::District),
            ward: Level::new(&groups.ward, Category::Ward),
        };

        let mut count = 0;
        let mut best: Option<Candidate<'_>> = None;
        for record in &self.records {
            let province = record.province.score(&query.province);
            if province < leniency {
                continue;
            }
            count += 1;

            let mut value = PROVINCE_WEIGHT * f64::from(province);
            let district = record.district.score(&query.district);
            let district_matched = !record.district.is_empty() && district >= leniency;
            let mut ward_matched = false;
            if district_matched {
                value += DISTRICT_WEIGHT * f64::from(district);
                let ward = record.ward.score(&query.ward);
                ward_matched = !record.ward.is_empty() && ward >= leniency;
                if ward_matched {
                    value += WARD_WEIGHT * f64::from(ward);
                }
            }

            if best.as_ref().map_or(true, |b| value > b.value) {
                best = Some(Candidate {
                    record,
                    value,
                    district_matched,
                    ward_matched,
                });
            }
        }

        let Some(best) = best else {
            trace!(address, "gazetteer found no province");
            return None;
        };
        let kind = match (best.district_matched, best.ward_matched) {
            (true, true) => "full",
            (true, false) => "district",
            _ => "province",
        };
        let pick = |matched: bool, level: &Level| {
            if matched {
                level.name.clone()
            } else {
                String::new()
            }
        };
        Some(MappedAddress {
            street: clean_upper_delimited(&groups.street),
            ward: pick(best.ward_matched, &best.record.ward),
            district: pick(best.district_matched, &best.record.district),
            province: best.record.province.name.clone(),
            kind: kind.to_owned(),
            count,
        })
    }
}

/// Fluent construction of a [`Gazetteer`].
#[derive(Debug, Clone, Default)]
pub struct GazetteerBuilder {
    entries: Vec<GazetteerEntry>,
}

impl GazetteerBuilder {
    #[must_use]
    pub fn entry(mut self, entry: GazetteerEntry) -> Self {
        self.entries.push(entry);
        self
    }

    #[must_use]
    pub fn province(self, province: &str) -> Self {
        self.entry(GazetteerEntry::new(province, "", ""))
    }

    #[must_use]
    pub fn district(self, province: &str, district: &str) -> Self {
        self.entry(GazetteerEntry::new(province, district, ""))
    }

    #[must_use]
    pub fn ward(self, province: &str, district: &str, ward: &str) -> Self {
        self.entry(GazetteerEntry::new(province, district, ward))
    }

    #[must_use]
    pub fn build(self) -> Gazetteer {
        Gazetteer::from_entries(self.entries)
    }
}
