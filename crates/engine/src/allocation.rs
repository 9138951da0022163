//! Share allocation for a single expense.
//!
//! The amount is divided in whole cents. Every member gets `amount / k` and the
//! `amount % k` leftover cents go, one each, to the first members in
//! lexicographic name order. The same expense therefore always splits the
//! same way, and the shares always add up to the amount.

use crate::{EngineError, MoneyCents, ResultEngine};

/// A member's part of one expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Share<'a> {
    pub name: &'a str,
    pub amount: MoneyCents,
}

/// Resolve the members who share an expense against the current group.
///
/// Unknown names are dropped and duplicates collapse to their first
/// occurrence. When nothing is left the whole group shares the expense.
pub fn resolve_split<'a>(split: &[String], participants: &'a [String]) -> Vec<&'a str> {
    let mut members: Vec<&'a str> = Vec::with_capacity(split.len());
    for name in split {
        let Some(known) = participants.iter().find(|p| *p == name) else {
            continue;
        };
        if !members.contains(&known.as_str()) {
            members.push(known.as_str());
        }
    }

    if members.is_empty() {
        return participants.iter().map(String::as_str).collect();
    }
    members
}

/// Split `amount` across `members`.
///
/// Shares are returned in allocation order (sorted by name).
pub fn allocate<'a>(amount: MoneyCents, members: &[&'a str]) -> ResultEngine<Vec<Share<'a>>> {
    if members.is_empty() {
        return Err(EngineError::InvalidSplit(
            "an expense must be shared by at least one participant".to_string(),
        ));
    }
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "cannot split a negative amount: {amount}"
        )));
    }

    let mut sorted = members.to_vec();
    sorted.sort_unstable();

    let k = sorted.len() as i64;
    let base = amount.cents() / k;
    let remainder = (amount.cents() % k) as usize;

    let shares = sorted
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let extra = i64::from(idx < remainder);
            Share {
                name,
                amount: MoneyCents::new(base + extra),
            }
        })
        .collect();
    Ok(shares)
}
