//! Group extraction: comma segments into the four category slots

use super::{Category, PerCategory, Permutation};
use crate::algorithms::normalize::{DELIMITER, MAX_GROUPS};

/// Segment text per category. Missing segments are empty strings.
pub type AddressGroups = PerCategory<String>;

/// Split `addr` into the four category slots under `order`.
///
/// Segments are split on commas, trimmed, and empty ones dropped. When more
/// than four remain, all but the last three are merged (space-joined) into a
/// single leading segment, since administrative names cluster at the end.
/// Segment `i` goes to `order.slots()[i]`; slots past the last segment are
/// empty.
///
/// # Examples
/// ```
/// use fuzzyaddr::address::{extract_groups, Permutation};
///
/// let groups = extract_groups("TOA A, 12 LE LOI, BEN THANH, QUAN 1, HO CHI MINH", &Permutation::CANONICAL);
/// assert_eq!(groups.street, "TOA A 12 LE LOI");
/// assert_eq!(groups.province, "HO CHI MINH");
///
/// let groups = extract_groups("HO CHI MINH", &Permutation::SINGLE_SEGMENT);
/// assert_eq!(groups.province, "HO CHI MINH");
/// assert_eq!(groups.street, "");
/// ```
#[must_use]
pub fn extract_groups(addr: &str, order: &Permutation) -> AddressGroups {
    let mut segments: Vec<String> = addr
        .split(DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();

    if segments.len() > MAX_GROUPS {
        let boundary = segments.len() - (MAX_GROUPS - 1);
        let head = segments[..boundary].join(" ");
        segments.drain(..boundary);
        segments.insert(0, head);
    }

    let mut groups = AddressGroups::default();
    for (slot, segment) in order.slots().iter().zip(segments) {
        *slot_mut(&mut groups, *slot) = segment;
    }
    groups
}

fn slot_mut(groups: &mut AddressGroups, category: Category) -> &mut String {
    match category {
        Category::Street => &mut groups.street,
        Category::Ward => &mut groups.ward,
        Category::District => &mut groups.district,
        Category::Province => &mut groups.province,
    }
}

/// Read an address already laid out as `street,ward,district,province`.
///
/// With exactly four comma parts the slots are taken positionally, empty
/// parts included. Anything else goes through [`extract_groups`] under the
/// canonical order.
#[must_use]
pub fn parse_canonical(addr: &str) -> AddressGroups {
    let parts: Vec<&str> = addr.split(DELIMITER).collect();
    match parts[..] {
        [street, ward, district, province] => AddressGroups {
            street: street.trim().to_owned(),
            ward: ward.trim().to_owned(),
            district: district.trim().to_owned(),
            province: province.trim().to_owned(),
        },
        _ => extract_groups(addr, &Permutation::CANONICAL),
    }
}

/// Lay groups out as `street,ward,district,province`, keeping empty slots.
#[must_use]
pub fn to_canonical_string(groups: &AddressGroups) -> String {
    Category::ALL
        .iter()
        .map(|&c| groups.get(c).as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Copy a single-segment address into all four comma slots.
#[must_use]
pub fn inject_all(addr: &str) -> String {
    vec![addr; MAX_GROUPS].join(",")
}
