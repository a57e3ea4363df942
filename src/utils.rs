//! Text normalization and shuffling helpers shared across the crate.

use rand::Rng;
use rand::seq::SliceRandom;

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// Return a uniformly random permutation of `items`, leaving the input untouched.
///
/// Uses `SliceRandom::shuffle` (Fisher–Yates), so every ordering is equally likely.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    if out.len() > 1 {
        out.shuffle(rng);
    }
    out
}
