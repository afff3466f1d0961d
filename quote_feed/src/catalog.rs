//! Built-in pool of feed titles.

use rand::Rng;

/// Titles the feed hands out. The pool is intentionally small so repeated
/// polls return known duplicates for the client-side dedupe to skip.
const TITLES: &[&str] = &[
    "Simplicity is the soul of efficiency.",
    "Programs must be written for people to read.",
    "Premature optimization is the root of all evil.",
    "Talk is cheap. Show me the code.",
    "First, solve the problem. Then, write the code.",
    "Make it work, make it right, make it fast.",
    "The best error message is the one that never shows up.",
    "Deleted code is debugged code.",
    "A good plan today is better than a perfect plan tomorrow.",
    "Weeks of coding can save you hours of planning.",
    "Before software can be reusable it first has to be usable.",
    "Testing leads to failure, and failure leads to understanding.",
];

/// Draws `count` titles uniformly (with repetition) from the pool.
pub fn random_titles(count: usize) -> Vec<&'static str> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| TITLES[rng.random_range(0..TITLES.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_requested_number_of_titles_from_pool() {
        let titles = random_titles(7);
        assert_eq!(titles.len(), 7);
        assert!(titles.iter().all(|t| TITLES.contains(t)));
    }

    #[test]
    fn zero_count_yields_empty_batch() {
        assert!(random_titles(0).is_empty());
    }
}
