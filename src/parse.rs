//! Best-effort extraction of Django model names from `models.py` source text.
//!
//! This is a text pattern, not a Python parser. It matches class definitions
//! whose sole listed base is `models.Model`, left to right, top to bottom.
//! Known boundaries, accepted as-is:
//! - a matching definition inside a comment or string still matches,
//! - multiple inheritance where `models.Model` is not the sole parameter
//!   does not match,
//! - spelling variants outside the pattern's whitespace tolerance
//!   (e.g. a space around the dot in `models.Model`) do not match.
//!
//! Duplicate declarations pass through as duplicate names; uniqueness is the
//! source repository's problem, not this layer's.

use regex::Regex;
use std::sync::LazyLock;

static MODEL_CLASS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"class\s+(\w+)\s*\(\s*models\.Model\s*\)")
        .expect("model class regex is a valid static pattern")
});

/// Return the declared model names in source order. An empty result is a
/// valid outcome (the file declares no models), not an error.
pub fn parse_django_models(text: &str) -> Vec<String> {
    MODEL_CLASS_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
