// Detailed Damerau-Levenshtein distance
// Origin: DetailedDamerauLevenstheinDistance.java
//
// Computes the unrestricted Damerau-Levenshtein distance (adjacent
// transpositions allowed across edited substrings) and keeps, in every
// cell of the dynamic-programming table, the count of each operation type
// that led there. The total `value()` is the usual scalar distance.

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Counts of the edit operations needed to turn one string into another.
///
/// Values are immutable: every mutator returns a new count with exactly
/// one counter incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditOperationCount {
    pub inserts: usize,
    pub deletes: usize,
    pub replaces: usize,
    pub transposes: usize,
}

impl EditOperationCount {
    /// The zero distance (identical strings).
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(inserts: usize, deletes: usize, replaces: usize, transposes: usize) -> Self {
        Self {
            inserts,
            deletes,
            replaces,
            transposes,
        }
    }

    #[must_use]
    pub fn insert(self) -> Self {
        Self {
            inserts: self.inserts + 1,
            ..self
        }
    }

    #[must_use]
    pub fn delete(self) -> Self {
        Self {
            deletes: self.deletes + 1,
            ..self
        }
    }

    #[must_use]
    pub fn replace(self) -> Self {
        Self {
            replaces: self.replaces + 1,
            ..self
        }
    }

    #[must_use]
    pub fn transpose(self) -> Self {
        Self {
            transposes: self.transposes + 1,
            ..self
        }
    }

    /// Total number of operations.
    pub fn value(&self) -> usize {
        self.inserts + self.deletes + self.replaces + self.transposes
    }
}

impl fmt::Display for EditOperationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "value={} inserts={} deletes={} replaces={} transposes={}",
            self.value(),
            self.inserts,
            self.deletes,
            self.replaces,
            self.transposes
        )
    }
}

/// Compute the detailed distance between `s1` and `s2`: the minimum number
/// of insertions, deletions, single-character substitutions and adjacent
/// transpositions needed to transform `s1` into `s2`.
///
/// Comparison is per Unicode scalar value and case-sensitive.
///
/// Table layout: `h[i + 1][j + 1]` holds the distance between the first
/// `i` characters of `s1` and the first `j` characters of `s2`. Row and
/// column 0 are "infinite" sentinels (`|s1| + |s2|`, parked in `inserts`);
/// row 1 holds `j` inserts and column 1 holds `i` deletes.
///
/// When several operations reach the minimum, the first one in the order
/// substitution, insertion, deletion, transposition is recorded. Other
/// orders give the same `value()` with a different breakdown.
pub fn compare(s1: &str, s2: &str) -> EditOperationCount {
    if s1 == s2 {
        return EditOperationCount::ZERO;
    }

    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (n, m) = (a.len(), b.len());
    let inf = n + m;

    // Last row (1-based) in which each character was seen in `a`; 0 = never.
    let mut da: HashMap<char, usize> = HashMap::with_capacity(n + m);

    let mut h = vec![vec![EditOperationCount::ZERO; m + 2]; n + 2];
    for i in 0..=n {
        h[i + 1][0] = EditOperationCount::new(inf, 0, 0, 0);
        h[i + 1][1] = EditOperationCount::new(0, i, 0, 0);
    }
    for j in 0..=m {
        h[0][j + 1] = EditOperationCount::new(inf, 0, 0, 0);
        h[1][j + 1] = EditOperationCount::new(j, 0, 0, 0);
    }

    for i in 1..=n {
        // Last column in this row where a[i - 1] matched.
        let mut db = 0;

        for j in 1..=m {
            let i1 = da.get(&b[j - 1]).copied().unwrap_or(0);
            let j1 = db;

            let cost = if a[i - 1] == b[j - 1] {
                db = j;
                0
            } else {
                1
            };

            let transposition_cost = (i - i1 - 1) + 1 + (j - j1 - 1);

            let substitution = h[i][j].value() + cost;
            let insertion = h[i + 1][j].value() + 1;
            let deletion = h[i][j + 1].value() + 1;
            let transposition = h[i1][j1].value() + transposition_cost;
            let min = substitution.min(insertion).min(deletion).min(transposition);

            // Tie-break order is part of the observable breakdown; keep it.
            h[i + 1][j + 1] = if min == substitution {
                if cost == 1 { h[i][j].replace() } else { h[i][j] }
            } else if min == insertion {
                h[i + 1][j].insert()
            } else if min == deletion {
                h[i][j + 1].delete()
            } else {
                (0..transposition_cost).fold(h[i1][j1], |d, _| d.transpose())
            };
        }

        da.insert(a[i - 1], i);
    }

    h[n + 1][m + 1]
}
