//! Slug validation and generation for public-facing codes.
//!
//! Campaigns and contacts are addressed in public URLs by short opaque
//! slugs: trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens. Generated slugs use the base36 subset.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Length of generated campaign and referral codes.
const GENERATED_SLUG_LEN: usize = 7;

/// Generated slugs draw from lowercase base36 digits.
const SLUG_RADIX: u32 = 36;

/// Return `true` when `value` is a valid domain slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    is_trimmed_non_empty(value) && has_allowed_slug_chars(value)
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Generate a fresh random slug.
///
/// Uniqueness is not guaranteed here; the store's unique indexes are the
/// arbiter, and at seven base36 digits collisions are vanishingly rare.
pub(crate) fn generate_slug() -> String {
    let mut rng = SmallRng::from_entropy();
    std::iter::repeat_with(|| {
        char::from_digit(rng.gen_range(0..SLUG_RADIX), SLUG_RADIX).unwrap_or('0')
    })
    .take(GENERATED_SLUG_LEN)
    .collect()
}
