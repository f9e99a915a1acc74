//! Hint-driven password generation
//!
//! Each hint is searched for trigger words and contributes one component per
//! trigger found. The components are glued together in the order produced.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{self, HINT_NAMES, HINT_SYMBOLS};

/// Inclusive year range produced by "year" / "date" hints
pub const YEAR_RANGE: (u32, u32) = (1970, 2024);
/// Minimum number of components in a generated password
pub const MIN_COMPONENTS: usize = 3;

/// Components contributed by a single hint, in rule order
fn components_for_hint<R: Rng + ?Sized>(hint: &str, rng: &mut R) -> Vec<String> {
    let hint = hint.to_lowercase();
    let mut components = Vec::new();

    if hint.contains("year") || hint.contains("date") {
        components.push(rng.gen_range(YEAR_RANGE.0..=YEAR_RANGE.1).to_string());
    }
    if hint.contains("name") {
        if let Some(name) = HINT_NAMES.choose(rng) {
            components.push((*name).to_string());
        }
    }
    if hint.contains("special") {
        if let Some(symbol) = HINT_SYMBOLS.choose(rng) {
            components.push(symbol.to_string());
        }
    }
    if hint.contains("number") {
        components.push(rng.gen_range(0..=999u32).to_string());
    }

    components
}

/// Generate a plausible password from free-text hints.
///
/// An empty hint list falls back to a random dictionary word.
pub fn generate_password_from_hints<S, R>(hints: &[S], rng: &mut R) -> String
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    if hints.is_empty() {
        return catalog::get_common_passwords()
            .choose(rng)
            .copied()
            .unwrap_or("password")
            .to_string();
    }

    let mut components: Vec<String> = hints
        .iter()
        .flat_map(|hint| components_for_hint(hint.as_ref(), rng))
        .collect();

    while components.len() < MIN_COMPONENTS {
        let letter = rng.gen_range(b'a'..=b'z') as char;
        components.push(letter.to_string());
    }

    let password = components.concat();
    if rng.gen_bool(0.5) {
        capitalize_first(&password)
    } else {
        password
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
