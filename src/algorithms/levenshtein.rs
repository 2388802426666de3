//! Levenshtein (edit) distance kernel
//!
//! Optimized with:
//! - Myers bit-parallel algorithm for patterns up to 64 chars
//! - Single-row DP fallback for longer patterns
//! - Unicode-aware character handling (operates on `char`, not bytes)
//!
//! Everything in this module works on char slices so callers that slide a
//! window across a longer string (see [`super::fuzz::partial_ratio`]) never
//! have to re-collect a `String` per window.

use ahash::AHashMap;
use smallvec::SmallVec;

/// Maximum pattern length for Myers bit-parallel algorithm (64 bits per block)
const MYERS_BLOCK_SIZE: usize = 64;

/// Char buffer sized for typical address segments.
pub(crate) type CharBuf = SmallVec<[char; 64]>;

// ============================================================================
// Myers Bit-Parallel Algorithm
// ============================================================================

/// Myers bit-parallel Levenshtein distance for patterns up to 64 characters.
///
/// Runs in O(n) for a pattern that fits a single 64-bit word.
///
/// Based on: Myers, G. (1999). "A fast bit-vector algorithm for approximate string matching"
#[inline]
fn myers_64(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    let n = text.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }
    if m > MYERS_BLOCK_SIZE {
        return dp_distance(pattern, text);
    }

    // Peq[c] has bit i set if pattern[i] == c
    let mut peq: AHashMap<char, u64> = AHashMap::with_capacity(m.min(26));
    for (i, &c) in pattern.iter().enumerate() {
        *peq.entry(c).or_insert(0) |= 1u64 << i;
    }

    let mut vp: u64 = !0u64;
    let mut vn: u64 = 0u64;
    let mut score = m;

    let mask = 1u64 << (m - 1);

    for &tc in text {
        let eq = peq.get(&tc).copied().unwrap_or(0);

        let xv = eq | vn;
        let xh = (((eq & vp).wrapping_add(vp)) ^ vp) | eq;

        let hp = vn | !(xh | vp);
        let hn = vp & xh;

        if (hp & mask) != 0 {
            score += 1;
        } else if (hn & mask) != 0 {
            score -= 1;
        }

        // First row is 0,1,2,... so the shifted-in horizontal delta is +1
        let hp_shifted = (hp << 1) | 1;
        let hn_shifted = hn << 1;

        vp = hn_shifted | !(xv | hp_shifted);
        vn = hp_shifted & xv;
    }

    score
}

/// Standard DP distance for char slices (fallback for long patterns)
#[inline]
fn dp_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Shorter slice on the column axis
    let (target, source) = if a.len() < b.len() { (a, b) } else { (b, a) };
    let n_target = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=n_target).collect();

    for (i, &sc) in source.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;

        for j in 0..n_target {
            let cost = usize::from(sc != target[j]);
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            let substitution = prev + cost;

            prev = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
        }
    }

    row[n_target]
}

// ============================================================================
// Public API
// ============================================================================

/// Levenshtein distance between two char slices.
#[inline]
#[must_use]
pub fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
    if a == b {
        return 0;
    }
    // Shorter slice as the Myers pattern
    let (pattern, text) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    myers_64(pattern, text)
}

/// Levenshtein distance between two strings, counted in chars.
///
/// # Example
/// ```
/// use fuzzyaddr::algorithms::levenshtein::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("Hà Nội", "Ha Noi"), 2);
/// ```
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a_chars: CharBuf = a.chars().collect();
    let b_chars: CharBuf = b.chars().collect();
    levenshtein_chars(&a_chars, &b_chars)
}

/// Normalized similarity (0.0 to 1.0) between two char slices.
///
/// Two empty slices are identical (1.0); one empty slice against a
/// non-empty one is 0.0.
#[inline]
#[must_use]
pub fn similarity_chars(a: &[char], b: &[char]) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }
    let dist = levenshtein_chars(a, b);
    1.0 - (dist as f64 / max_len as f64)
}

/// Normalized Levenshtein similarity (0.0 to 1.0)
#[inline]
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let a_chars: CharBuf = a.chars().collect();
    let b_chars: CharBuf = b.chars().collect();
    similarity_chars(&a_chars, &b_chars)
}
