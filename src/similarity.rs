// src/similarity.rs
use log::info;

/// Levenshtein edit distance (insert/delete/substitute, unit cost).
///
/// Letter case is ignored: "Pere" and "pere" are the same description as far
/// as duplicate detection is concerned.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().flat_map(|c| c.to_lowercase()).collect();
    let b: Vec<char> = b.chars().flat_map(|c| c.to_lowercase()).collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single-row DP over the shorter dimension.
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut previous_diagonal = row[0];
        row[0] = i + 1;

        for (j, cb) in b.iter().enumerate() {
            let substitution = if ca == cb {
                previous_diagonal
            } else {
                previous_diagonal + 1
            };
            previous_diagonal = row[j + 1];
            row[j + 1] = substitution
                .min(row[j + 1] + 1) // deletion
                .min(row[j] + 1); // insertion
        }
    }

    row[b.len()]
}

/// Flags listing descriptions that sit within a configured edit distance of
/// an owner's existing listings.
#[derive(Debug, Clone, Copy)]
pub struct DuplicateDetector {
    threshold: usize,
}

impl DuplicateDetector {
    pub fn new(threshold: usize) -> Self {
        DuplicateDetector { threshold }
    }

    /// True when any existing description is at or under the threshold.
    /// Linear scan, run once per insert attempt.
    pub fn is_near_duplicate<'a, I>(&self, candidate: &str, existing: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        for description in existing {
            let d = distance(description, candidate);
            if d <= self.threshold {
                info!(
                    "description within distance {} of an existing listing",
                    d
                );
                return true;
            }
        }
        false
    }
}
