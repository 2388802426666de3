//! Address text normalization
//!
//! Provides the cleaning applied to raw input before alignment, the
//! per-category reduction applied before segments are scored, and the
//! group-count estimate that selects an alignment regime.

use unicode_normalization::UnicodeNormalization;

use crate::address::Category;

/// Segment delimiter used by cleaned addresses.
pub const DELIMITER: char = ',';

/// Maximum number of groups an address can exhibit.
pub const MAX_GROUPS: usize = 4;

/// Characters treated as alternative segment delimiters.
fn is_delimiter(c: char) -> bool {
    matches!(c, ',' | ';' | '|' | '\n' | '\r')
}

/// Clean an address into uppercase, alphanumeric, comma-delimited form.
///
/// - NFC-normalizes and uppercases (Vietnamese diacritics are kept)
/// - maps `;`, `|` and line breaks to `,`
/// - turns any other non-alphanumeric char into a space
/// - collapses whitespace and drops empty segments
///
/// # Examples
/// ```
/// use fuzzyaddr::algorithms::normalize::clean_upper_delimited;
///
/// assert_eq!(
///     clean_upper_delimited(" 12 Lê Lợi,, P. Bến Thành; Q.1 "),
///     "12 LÊ LỢI,P BẾN THÀNH,Q 1"
/// );
/// ```
#[must_use]
pub fn clean_upper_delimited(s: &str) -> String {
    let upper: String = s.nfc().collect::<String>().to_uppercase().nfc().collect();
    let mapped: String = upper
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if is_delimiter(c) {
                DELIMITER
            } else {
                ' '
            }
        })
        .collect();

    mapped
        .split(DELIMITER)
        .map(|segment| segment.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Administrative prefixes stripped per category, longest first.
fn prefixes(category: Category) -> &'static [&'static str] {
    match category {
        Category::Street => &["SỐ NHÀ", "SO NHA", "ĐƯỜNG", "DUONG", "SỐ", "SO"],
        Category::Ward => &[
            "THỊ TRẤN", "THI TRAN", "PHƯỜNG", "PHUONG", "XÃ", "XA", "TT", "P",
        ],
        Category::District => &[
            "THÀNH PHỐ", "THANH PHO", "THỊ XÃ", "THI XA", "HUYỆN", "HUYEN", "QUẬN", "QUAN",
            "TP", "TX", "Q", "H",
        ],
        Category::Province => &["THÀNH PHỐ", "THANH PHO", "TỈNH", "TINH", "TP"],
    }
}

/// Trim the administrative prefix that belongs to `category`.
///
/// Expects text already passed through [`clean_upper_delimited`]. At most one
/// prefix is removed, and never when it is the whole segment (`"QUAN"` alone
/// stays `"QUAN"`).
///
/// # Examples
/// ```
/// use fuzzyaddr::address::Category;
/// use fuzzyaddr::algorithms::normalize::clean_and_reduce;
///
/// assert_eq!(clean_and_reduce("QUAN 1", Category::District), "1");
/// assert_eq!(clean_and_reduce("TP HO CHI MINH", Category::Province), "HO CHI MINH");
/// assert_eq!(clean_and_reduce("QUAN 1", Category::Ward), "QUAN 1");
/// ```
#[must_use]
pub fn clean_and_reduce(s: &str, category: Category) -> String {
    let trimmed = s.trim();
    for prefix in prefixes(category) {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            if let Some(rest) = rest.strip_prefix(' ') {
                let rest = rest.trim_start();
                if !rest.is_empty() {
                    return rest.to_owned();
                }
            }
        }
    }
    trimmed.to_owned()
}

/// Estimate how many distinct groups (0..=4) an address exhibits.
///
/// Counts the non-empty comma segments, capped at [`MAX_GROUPS`]. Used only
/// to choose an alignment regime.
///
/// # Examples
/// ```
/// use fuzzyaddr::algorithms::normalize::estimate_group_count;
///
/// assert_eq!(estimate_group_count(""), 0);
/// assert_eq!(estimate_group_count("HO CHI MINH"), 1);
/// assert_eq!(estimate_group_count("A,B,,C,D,E"), 4);
/// ```
#[must_use]
pub fn estimate_group_count(s: &str) -> usize {
    s.split(DELIMITER)
        .filter(|segment| !segment.trim().is_empty())
        .take(MAX_GROUPS)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_uppercases_and_collapses() {
        assert_eq!(
            clean_upper_delimited("12  le loi ,ben thanh,  quan 1 , ho chi minh"),
            "12 LE LOI,BEN THANH,QUAN 1,HO CHI MINH"
        );
    }

    #[test]
    fn test_clean_alternative_delimiters() {
        assert_eq!(clean_upper_delimited("a; b | c\nd"), "A,B,C,D");
    }

    #[test]
    fn test_clean_punctuation_becomes_space() {
        assert_eq!(clean_upper_delimited("TP.HCM"), "TP HCM");
        assert_eq!(clean_upper_delimited("Bà Rịa - Vũng Tàu"), "BÀ RỊA VŨNG TÀU");
    }

    #[test]
    fn test_clean_decomposed_input_is_composed() {
        let decomposed: String = "Hà Nội".nfd().collect();
        assert_eq!(clean_upper_delimited(&decomposed), "HÀ NỘI");
    }

    #[test]
    fn test_clean_blank() {
        assert_eq!(clean_upper_delimited(""), "");
        assert_eq!(clean_upper_delimited(" , ;!! "), "");
    }

    #[test]
    fn test_reduce_per_category() {
        assert_eq!(clean_and_reduce("PHUONG BEN NGHE", Category::Ward), "BEN NGHE");
        assert_eq!(clean_and_reduce("PHƯỜNG BẾN NGHÉ", Category::Ward), "BẾN NGHÉ");
        assert_eq!(clean_and_reduce("HUYEN CU CHI", Category::District), "CU CHI");
        assert_eq!(clean_and_reduce("TINH AN GIANG", Category::Province), "AN GIANG");
        assert_eq!(clean_and_reduce("DUONG LE LOI", Category::Street), "LE LOI");
    }

    #[test]
    fn test_reduce_requires_word_boundary() {
        // "QUANG NAM" must not lose its "QUAN"
        assert_eq!(clean_and_reduce("QUANG NAM", Category::District), "QUANG NAM");
        assert_eq!(clean_and_reduce("PHU YEN", Category::Ward), "PHU YEN");
    }

    #[test]
    fn test_reduce_keeps_bare_prefix() {
        assert_eq!(clean_and_reduce("QUAN", Category::District), "QUAN");
        assert_eq!(clean_and_reduce("", Category::Province), "");
    }

    #[test]
    fn test_group_count() {
        assert_eq!(estimate_group_count(",,"), 0);
        assert_eq!(estimate_group_count("A,B"), 2);
        assert_eq!(estimate_group_count("A,B,C,D"), 4);
    }
}
