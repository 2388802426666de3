//! Canonical mapping of free-text addresses onto a reference hierarchy
//!
//! The comparer only needs [`CanonicalMapper`]; [`Gazetteer`] is the
//! in-memory implementation shipped with the crate.

pub mod gazetteer;

pub use gazetteer::{Gazetteer, GazetteerBuilder, GazetteerEntry};

use serde::{Deserialize, Serialize};

use crate::address::AddressGroups;

/// Kind tag of the record substituted when an address cannot be mapped.
pub const SHORT_ADDRESS_KIND: &str = "short_address";

/// Canonical record produced by a [`CanonicalMapper`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedAddress {
    pub street: String,
    pub ward: String,
    pub district: String,
    pub province: String,
    /// Classification tag reported by the mapper
    pub kind: String,
    /// Number of candidates the mapper considered; diagnostic only
    pub count: usize,
}

impl MappedAddress {
    /// The sentinel for addresses too short to map, or that the mapper
    /// could not resolve.
    #[must_use]
    pub fn short_address() -> Self {
        Self {
            kind: SHORT_ADDRESS_KIND.to_owned(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn is_short_address(&self) -> bool {
        self.kind == SHORT_ADDRESS_KIND
    }

    /// Uppercased category values.
    #[must_use]
    pub fn groups(&self) -> AddressGroups {
        AddressGroups {
            street: self.street.to_uppercase(),
            ward: self.ward.to_uppercase(),
            district: self.district.to_uppercase(),
            province: self.province.to_uppercase(),
        }
    }

    /// The four category values, street first, joined by single spaces.
    #[must_use]
    pub fn joined(&self) -> String {
        let groups = self.groups();
        [groups.street, groups.ward, groups.district, groups.province].join(" ")
    }
}

/// Maps a `street,ward,district,province` address onto canonical names.
///
/// `leniency` is a 0..=100 similarity a level must reach to be accepted.
/// Returning `None` means the address could not be resolved.
pub trait CanonicalMapper: Send + Sync {
    fn resolve(&self, address: &str, leniency: u8) -> Option<MappedAddress>;
}

impl<M: CanonicalMapper + ?Sized> CanonicalMapper for &M {
    fn resolve(&self, address: &str, leniency: u8) -> Option<MappedAddress> {
        (**self).resolve(address, leniency)
    }
}

impl<M: CanonicalMapper + ?Sized> CanonicalMapper for Box<M> {
    fn resolve(&self, address: &str, leniency: u8) -> Option<MappedAddress> {
        (**self).resolve(address, leniency)
    }
}

impl<M: CanonicalMapper + ?Sized> CanonicalMapper for std::sync::Arc<M> {
    fn resolve(&self, address: &str, leniency: u8) -> Option<MappedAddress> {
        (**self).resolve(address, leniency)
    }
}
