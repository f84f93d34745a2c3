// Normalized string similarity.

/// Jaro-Winkler similarity in `[0, 1]` (1.0 = identical).
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    strsim::jaro_winkler(a, b)
}

/// Longest common prefix of all `strings`, by character.
///
/// An empty slice yields the empty string; a single string is its own
/// prefix.
pub fn longest_common_prefix<'a>(strings: &[&'a str]) -> &'a str {
    let Some((first, rest)) = strings.split_first() else {
        return "";
    };
    let mut end = first.len();
    for other in rest {
        let common: usize = first
            .chars()
            .zip(other.chars())
            .take_while(|(x, y)| x == y)
            .map(|(x, _)| x.len_utf8())
            .sum();
        end = end.min(common);
    }
    &first[..end]
}
