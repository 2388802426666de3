//! FuzzyWuzzy-style similarity primitives on an integer 0..=100 scale.
//!
//! - [`ratio`]: normalized Levenshtein similarity
//! - [`partial_ratio`]: best window of the longer string against the shorter
//! - [`token_sort_ratio`]: order-insensitive comparison
//! - [`token_set_ratio`]: set-based comparison, tolerant of extra tokens
//!
//! All four are symmetric and case-sensitive. Inputs are compared as Unicode
//! scalar values after NFC normalization, so `"Hà"` typed with a combining
//! grave accent compares equal to its precomposed form.

use std::borrow::Cow;

use unicode_normalization::{is_nfc, UnicodeNormalization};

use super::levenshtein::{similarity_chars, CharBuf};

/// Bring `s` to NFC, borrowing when it already is.
fn nfc(s: &str) -> Cow<'_, str> {
    if is_nfc(s) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.nfc().collect())
    }
}

/// Scale a 0.0..=1.0 similarity to the rounded 0..=100 integer scale.
#[inline]
fn to_percent(similarity: f64) -> u8 {
    (similarity.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Basic similarity ratio.
///
/// # Examples
/// ```
/// use fuzzyaddr::algorithms::fuzz::ratio;
/// assert_eq!(ratio("BEN THANH", "BEN THANH"), 100);
/// assert_eq!(ratio("", "BEN THANH"), 0);
/// ```
#[must_use]
pub fn ratio(s1: &str, s2: &str) -> u8 {
    let a: CharBuf = nfc(s1).chars().collect();
    let b: CharBuf = nfc(s2).chars().collect();
    to_percent(similarity_chars(&a, &b))
}

/// Best partial match ratio.
///
/// Slides the shorter string across the longer one and returns the highest
/// window similarity, so a segment fully contained in the other scores 100.
///
/// # Examples
/// ```
/// use fuzzyaddr::algorithms::fuzz::partial_ratio;
/// assert_eq!(partial_ratio("HO CHI MINH", "TP HO CHI MINH"), 100);
/// ```
#[must_use]
pub fn partial_ratio(s1: &str, s2: &str) -> u8 {
    let a: CharBuf = nfc(s1).chars().collect();
    let b: CharBuf = nfc(s2).chars().collect();

    if a.is_empty() && b.is_empty() {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    if shorter.len() == longer.len() {
        return to_percent(similarity_chars(shorter, longer));
    }

    let width = shorter.len();
    let mut best = 0.0f64;
    for window in longer.windows(width) {
        best = best.max(similarity_chars(shorter, window));
        if best >= 1.0 {
            break;
        }
    }
    to_percent(best)
}

/// Replace every non-alphanumeric char with a space and split into tokens.
fn tokens(s: &str) -> Vec<String> {
    let processed: String = nfc(s)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    processed.split_whitespace().map(str::to_owned).collect()
}

/// Similarity after tokenizing and sorting both strings.
///
/// # Examples
/// ```
/// use fuzzyaddr::algorithms::fuzz::token_sort_ratio;
/// assert_eq!(token_sort_ratio("QUAN 1, HO CHI MINH", "HO CHI MINH QUAN 1"), 100);
/// ```
#[must_use]
pub fn token_sort_ratio(s1: &str, s2: &str) -> u8 {
    let mut t1 = tokens(s1);
    let mut t2 = tokens(s2);
    if t1.is_empty() && t2.is_empty() {
        return 100;
    }
    if t1.is_empty() || t2.is_empty() {
        return 0;
    }
    t1.sort_unstable();
    t2.sort_unstable();
    ratio(&t1.join(" "), &t2.join(" "))
}

/// Sorted, deduplicated token set.
fn token_set(s: &str) -> Vec<String> {
    let mut t = tokens(s);
    t.sort_unstable();
    t.dedup();
    t
}

/// Join `head` and `tail` with a space, skipping whichever is empty.
fn join_parts(head: &str, tail: &[&str]) -> String {
    let tail = tail.join(" ");
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail,
        (false, true) => head.to_owned(),
        (false, false) => format!("{head} {tail}"),
    }
}

/// Set-based token similarity.
///
/// Compares the sorted intersection against each side's intersection plus
/// remainder and returns the maximum. Token sets are kept sorted so the
/// result never depends on hash iteration order.
///
/// # Examples
/// ```
/// use fuzzyaddr::algorithms::fuzz::token_set_ratio;
/// assert_eq!(token_set_ratio("BEN NGHE QUAN 1", "QUAN 1 BEN NGHE BEN NGHE"), 100);
/// ```
#[must_use]
pub fn token_set_ratio(s1: &str, s2: &str) -> u8 {
    let set1 = token_set(s1);
    let set2 = token_set(s2);

    if set1.is_empty() && set2.is_empty() {
        return 100;
    }
    if set1.is_empty() || set2.is_empty() {
        return 0;
    }

    let intersection: Vec<&str> = set1
        .iter()
        .filter(|t| set2.binary_search(t).is_ok())
        .map(String::as_str)
        .collect();
    let diff1: Vec<&str> = set1
        .iter()
        .filter(|t| set2.binary_search(t).is_err())
        .map(String::as_str)
        .collect();
    let diff2: Vec<&str> = set2
        .iter()
        .filter(|t| set1.binary_search(t).is_err())
        .map(String::as_str)
        .collect();

    let sect = intersection.join(" ");
    let combined1 = join_parts(&sect, &diff1);
    let combined2 = join_parts(&sect, &diff2);

    let mut best = ratio(&combined1, &combined2);
    if !sect.is_empty() {
        best = best.max(ratio(&sect, &combined1)).max(ratio(&sect, &combined2));
    }
    best.max(ratio(&set1.join(" "), &set2.join(" ")))
}
