//! Participants table and name normalization.
//!
//! A participant is identified by its name only. Names are compared exactly
//! after trimming and Unicode NFC normalization, so the same name typed on two
//! keyboards maps to the same participant.

use sea_orm::entity::prelude::*;
use unicode_normalization::UnicodeNormalization;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "participants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Trim and NFC-normalize a participant name. Returns `None` for blank input.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.nfc().collect())
}

/// Normalize a list of names, dropping blanks and exact duplicates while
/// preserving the first occurrence.
pub fn normalize_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut unique: Vec<String> = Vec::new();
    for name in names {
        let Some(name) = normalize_name(name.as_ref()) else {
            continue;
        };
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    unique
}
