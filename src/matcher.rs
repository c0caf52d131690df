//! Decides whether a name shown on a provider page is the contact we searched for.

/// Minimum similarity for two names to count as the same person. Loose enough
/// to absorb middle names, suffixes and shortened first names.
pub const MATCH_THRESHOLD: f64 = 0.6;

/// True when `displayed` and `expected` are close enough to be the same person.
pub fn matches(displayed: &str, expected: &str) -> bool {
    similarity(displayed, expected) >= MATCH_THRESHOLD
}

/// Normalized indel similarity in `[0, 1]`: `2 * lcs / (len_a + len_b)`,
/// computed over case-folded, trimmed characters.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.trim().to_lowercase().chars().collect();
    let b: Vec<char> = b.trim().to_lowercase().chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    (2 * longest_common_subsequence(&a, &b)) as f64 / total as f64
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Jon Smith", "Jonathan Smith")]
    #[case("Jane Roe", "jane roe")]
    #[case("Jane A. Roe", "Jane Roe")]
    #[case("John Doe Jr.", "John Doe")]
    #[case("  Jane Roe ", "Jane Roe")]
    fn same_person(#[case] displayed: &str, #[case] expected: &str) {
        assert!(matches(displayed, expected));
    }

    #[rstest]
    #[case("Alice Wong", "Bob Chen")]
    #[case("Jane Roe", "Marcus Aurelius")]
    #[case("", "Jane Roe")]
    fn different_person(#[case] displayed: &str, #[case] expected: &str) {
        assert!(!matches(displayed, expected));
    }

    #[test]
    fn similarity_is_symmetric() {
        let forward = similarity("Jon Smith", "Jonathan Smith");
        let backward = similarity("Jonathan Smith", "Jon Smith");
        assert!((forward - backward).abs() < f64::EPSILON);
    }

    #[test]
    fn similarity_of_shortened_first_name() {
        // 9 shared characters out of 9 + 14
        let ratio = similarity("Jon Smith", "Jonathan Smith");
        assert!((ratio - 18.0 / 23.0).abs() < 1e-9);
    }

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("Jane Roe", "Jane Roe"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }
}
