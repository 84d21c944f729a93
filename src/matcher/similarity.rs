//! Ratcliff–Obershelp string similarity
//!
//! The ratio is `2 * M / T`, where `T` is the total number of characters in
//! both strings and `M` the number of characters in matching blocks.

use difflib::sequencematcher::SequenceMatcher;

/// Case-insensitive similarity ratio in `[0, 1]`
///
/// Two empty strings are identical (`1.0`).
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    f64::from(SequenceMatcher::new(&a, &b).ratio())
}
