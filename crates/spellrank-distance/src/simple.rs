// Scalar edit distances used as ranking features.

/// Plain Levenshtein distance (insert, delete, substitute).
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Optimal string alignment distance (Damerau variant where no substring
/// is edited more than once), capped at `max`.
///
/// Every distance above `max` is reported as `max`, so very dissimilar
/// candidates are penalized at most `max` times instead of being dropped.
pub fn capped_distance(a: &str, b: &str, max: usize) -> usize {
    if a == b {
        return 0;
    }
    // Length difference is a lower bound; skip the full computation.
    let (la, lb) = (a.chars().count(), b.chars().count());
    if la.abs_diff(lb) >= max {
        return max;
    }
    strsim::osa_distance(a, b).min(max)
}
