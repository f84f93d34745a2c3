// Random edit operations for generating misspelled test data.
// Origin: DetailedDamerauLevenstheinDistance.java (EditOperation)
//
// Each operation applies one random single-character edit to a word. Used
// by the mutate CLI tool and the distance property tests; the ranking path
// never touches this module.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::detailed::EditOperationCount;

/// One kind of single-character edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditOperation {
    Insert,
    Delete,
    Replace,
    Transpose,
}

impl EditOperation {
    /// All operations, in the order used by [`EditOperation::random`].
    pub const ALL: [EditOperation; 4] = [
        EditOperation::Insert,
        EditOperation::Replace,
        EditOperation::Transpose,
        EditOperation::Delete,
    ];

    /// Pick an operation uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Apply this operation at a random position of `s`.
    ///
    /// Returns `None` when the word is too short for the operation:
    /// delete and transpose need at least two characters, replace needs
    /// one. Inserted and replacement characters are drawn from `a..=z`, so
    /// a replace may pick the same character and leave the word unchanged.
    pub fn apply<R: Rng + ?Sized>(self, s: &str, rng: &mut R) -> Option<String> {
        let mut chars: Vec<char> = s.chars().collect();
        let len = chars.len();
        match self {
            EditOperation::Insert => {
                let i = rng.random_range(0..=len);
                chars.insert(i, random_letter(rng));
            }
            EditOperation::Delete => {
                if len <= 1 {
                    return None;
                }
                let i = rng.random_range(0..len);
                chars.remove(i);
            }
            EditOperation::Replace => {
                if len == 0 {
                    return None;
                }
                let i = rng.random_range(0..len);
                chars[i] = random_letter(rng);
            }
            EditOperation::Transpose => {
                if len <= 1 {
                    return None;
                }
                let i = rng.random_range(0..len - 1);
                chars.swap(i, i + 1);
            }
        }
        Some(chars.into_iter().collect())
    }
}

impl EditOperationCount {
    /// Count one more application of `operation`.
    #[must_use]
    pub fn track(self, operation: EditOperation) -> Self {
        match operation {
            EditOperation::Insert => self.insert(),
            EditOperation::Delete => self.delete(),
            EditOperation::Replace => self.replace(),
            EditOperation::Transpose => self.transpose(),
        }
    }
}

fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(b'a' + rng.random_range(0..26u8))
}

/// Apply `edits` random operations to `word`, skipping operations that do
/// not apply. Returns the mutated word and the operations actually applied.
pub fn mutate<R: Rng + ?Sized>(
    word: &str,
    edits: usize,
    rng: &mut R,
) -> (String, EditOperationCount) {
    let mut current = word.to_string();
    let mut applied = EditOperationCount::ZERO;
    for _ in 0..edits {
        let op = EditOperation::random(rng);
        if let Some(next) = op.apply(&current, rng) {
            current = next;
            applied = applied.track(op);
        }
    }
    (current, applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detailed::compare;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn short_words_reject_operations() {
        let mut rng = rng();
        assert_eq!(EditOperation::Delete.apply("a", &mut rng), None);
        assert_eq!(EditOperation::Transpose.apply("a", &mut rng), None);
        assert_eq!(EditOperation::Replace.apply("", &mut rng), None);
        assert!(EditOperation::Insert.apply("", &mut rng).is_some());
    }

    #[test]
    fn lengths_change_as_expected() {
        let mut rng = rng();
        for _ in 0..50 {
            assert_eq!(EditOperation::Insert.apply("casa", &mut rng).unwrap().len(), 5);
            assert_eq!(EditOperation::Delete.apply("casa", &mut rng).unwrap().len(), 3);
            assert_eq!(EditOperation::Replace.apply("casa", &mut rng).unwrap().len(), 4);
            assert_eq!(EditOperation::Transpose.apply("casa", &mut rng).unwrap().len(), 4);
        }
    }

    #[test]
    fn single_edit_is_at_most_distance_one() {
        let mut rng = rng();
        for _ in 0..200 {
            let op = EditOperation::random(&mut rng);
            if let Some(m) = op.apply("paraula", &mut rng) {
                assert!(compare("paraula", &m).value() <= 1, "{op:?} -> {m}");
            }
        }
    }

    #[test]
    fn transpose_of_two_chars_swaps_them() {
        let mut rng = rng();
        assert_eq!(EditOperation::Transpose.apply("ab", &mut rng).as_deref(), Some("ba"));
    }

    #[test]
    fn mutate_bounds_the_distance() {
        let mut rng = rng();
        for _ in 0..100 {
            let (m, applied) = mutate("correccio", 3, &mut rng);
            assert!(applied.value() <= 3);
            assert!(compare("correccio", &m).value() <= applied.value());
        }
    }

    #[test]
    fn track_counts_each_kind() {
        let d = EditOperation::ALL
            .iter()
            .fold(EditOperationCount::ZERO, |d, op| d.track(*op));
        assert_eq!(d, EditOperationCount::new(1, 1, 1, 1));
    }

    #[test]
    fn seeded_mutation_is_reproducible() {
        let a = mutate("ortografia", 4, &mut StdRng::seed_from_u64(7));
        let b = mutate("ortografia", 4, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
