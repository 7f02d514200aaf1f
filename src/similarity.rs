//! String similarity used by the typo-squatting guard.

/// Normalized edit-distance similarity in `0.0..=1.0`, 1.0 meaning identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Undo the digit-for-letter swaps lookalike domains rely on.
pub fn fold_lookalikes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '0' => 'o',
            '1' => 'l',
            '3' => 'e',
            '4' => 'a',
            '5' => 's',
            '7' => 't',
            other => other,
        })
        .collect()
}

/// Similarity of a candidate domain to a reference, taking the better of the
/// literal comparison and the comparison with lookalike digits folded.
pub fn lookalike_ratio(domain: &str, reference: &str) -> f64 {
    let literal = ratio(domain, reference);
    let folded = fold_lookalikes(domain);
    if folded == domain {
        return literal;
    }
    literal.max(ratio(&folded, reference))
}
