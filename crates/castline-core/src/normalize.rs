//! Text sanitizing shared by every stage that compares names or titles.
//!
//! The transform is a fixed four-step pipeline whose steps are switched on
//! and off by [`NormalizeOptions`]. Step order never changes, which keeps
//! the transform idempotent for any flag combination.

use std::sync::LazyLock;

use regex::Regex;

/// Which normalization steps to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub upper: bool,
    pub alphanumeric_only: bool,
    pub strip: bool,
    pub collapse_whitespace: bool,
}

impl NormalizeOptions {
    /// Every step enabled. Used for character names, titles, performers and
    /// prediction input.
    pub const SANITIZE: Self = Self {
        upper: true,
        alphanumeric_only: true,
        strip: true,
        collapse_whitespace: true,
    };

    /// Whitespace collapse only. Used for utterance text.
    pub const WHITESPACE: Self = Self {
        upper: false,
        alphanumeric_only: false,
        strip: false,
        collapse_whitespace: true,
    };
}

/// Apply the enabled steps in order:
/// 1. Non-alphanumeric replacement
/// 2. Whitespace collapse
/// 3. Strip
/// 4. Uppercase
pub fn normalize(text: &str, options: NormalizeOptions) -> String {
    let mut s = if options.alphanumeric_only {
        replace_non_alphanumeric(text)
    } else {
        text.to_string()
    };
    if options.collapse_whitespace {
        s = collapse_whitespace(&s);
    }
    if options.strip {
        s = s.trim().to_string();
    }
    if options.upper {
        s = s.to_uppercase();
    }
    s
}

/// Column form of [`normalize`].
pub fn normalize_column<S: AsRef<str>>(column: &[S], options: NormalizeOptions) -> Vec<String> {
    column
        .iter()
        .map(|s| normalize(s.as_ref(), options))
        .collect()
}

/// Shorthand for [`normalize`] with [`NormalizeOptions::SANITIZE`].
///
/// This is the exact transform a prediction consumer must apply to an
/// utterance before handing it to the classifier.
pub fn sanitize(text: &str) -> String {
    normalize(text, NormalizeOptions::SANITIZE)
}

// ── Step 1: non-alphanumeric replacement ──────────────────────────────

/// Replace every char outside ASCII `[0-9A-Za-z]` that is not whitespace
/// with a single space.
fn replace_non_alphanumeric(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

// ── Step 2: whitespace collapse ───────────────────────────────────────

/// Replace each maximal whitespace run with one space. Leading and trailing
/// runs are kept (as a single space); trimming is a separate step.
fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                result.push(' ');
                in_run = true;
            }
        } else {
            result.push(c);
            in_run = false;
        }
    }
    result
}

// ── Year extraction ───────────────────────────────────────────────────

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("year pattern is valid"));

/// Pull a year out of a free-form cell such as `"1999"` or `"1999/I"`.
///
/// When several four-digit runs are present the last one wins.
pub fn extract_year(text: &str) -> Option<i32> {
    YEAR_PATTERN
        .find_iter(text)
        .last()
        .and_then(|m| m.as_str().parse().ok())
}
