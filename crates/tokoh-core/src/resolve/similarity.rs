use std::collections::HashMap;

/// Jaro similarity over Unicode scalar values.
#[must_use]
pub fn jaro(a: &str, b: &str) -> f64 {
    strsim::jaro(a, b)
}

/// Jaccard similarity of the two character multisets.
///
/// The intersection keeps the smaller count of each character and the union
/// the larger, so repeated letters are weighed rather than collapsed.
#[must_use]
pub fn jaccard(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let counts_a = char_counts(a);
    let counts_b = char_counts(b);

    let mut intersection = 0usize;
    let mut union = 0usize;

    for (ch, &n_a) in &counts_a {
        let n_b = counts_b.get(ch).copied().unwrap_or(0);
        intersection += n_a.min(n_b);
        union += n_a.max(n_b);
    }
    for (ch, &n_b) in &counts_b {
        if !counts_a.contains_key(ch) {
            union += n_b;
        }
    }

    if union == 0 {
        return 1.0;
    }
    intersection as f64 / union as f64
}

fn char_counts(s: &str) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for ch in s.chars() {
        *counts.entry(ch).or_insert(0) += 1;
    }
    counts
}

/// True when `needle` occurs in `haystack` on whitespace boundaries.
#[must_use]
pub fn contains_phrase(haystack: &str, needle: &str) -> bool {
    format!(" {haystack} ").contains(&format!(" {needle} "))
}

/// Whitespace-delimited containment in either direction.
#[must_use]
pub fn either_contains_phrase(a: &str, b: &str) -> bool {
    contains_phrase(a, b) || contains_phrase(b, a)
}

/// Plain substring containment in either direction.
#[must_use]
pub fn either_contains(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
