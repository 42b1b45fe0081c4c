use serde::{Deserialize, Serialize};

use crate::names::{extract_names, NameVariants};

/// A cast catalog row as handed over by the producer, before sanitizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCast {
    pub character: String,
    pub performer: String,
    pub title: String,
    pub year: String,
}

/// One (performer, character, title, year) credit with its name variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastRecord {
    pub character_raw: String,
    pub name_first: Option<String>,
    pub name_last: Option<String>,
    pub name_first_last: Option<String>,
    pub name_full: String,
    pub performer: String,
    pub title: String,
    pub year: i32,
}

impl CastRecord {
    /// Build a record from an already sanitized character name, deriving
    /// the variant fields.
    pub fn from_character(
        character_raw: impl Into<String>,
        performer: impl Into<String>,
        title: impl Into<String>,
        year: i32,
    ) -> Self {
        let character_raw = character_raw.into();
        let NameVariants {
            first,
            last,
            first_last,
            full,
        } = extract_names(&character_raw);
        Self {
            character_raw,
            name_first: first,
            name_last: last,
            name_first_last: first_last,
            name_full: full,
            performer: performer.into(),
            title: title.into(),
            year,
        }
    }
}
