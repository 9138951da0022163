//! Balance report: who paid what, who owes what, and how to settle.
//!
//! [`build_report`] is a pure function of the participant list and the
//! expenses. It never mutates its input and can be called concurrently.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    EngineError, Expense, MoneyCents, ResultEngine,
    allocation::{allocate, resolve_split},
    settlement::{Payment, settle},
};

/// Paid/share/balance figures of one participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberSummary {
    pub name: String,
    /// Sum of the expenses this participant paid.
    pub paid: MoneyCents,
    /// Sum of this participant's shares over every expense they are part of.
    pub share: MoneyCents,
    /// `paid - share`: positive if owed money, negative if owing.
    pub balance: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub total: MoneyCents,
    /// Plain average of `total` over the group, in cents.
    ///
    /// Display only: balances are computed from the per-expense splits and can
    /// differ from this figure when splits are not uniform.
    pub per_head: Decimal,
    /// One entry per participant, in participant order.
    pub summary: Vec<MemberSummary>,
    pub payments: Vec<Payment>,
}

fn too_large() -> EngineError {
    EngineError::InvalidAmount("amount too large".to_string())
}

#[derive(Default)]
struct Tally {
    paid: MoneyCents,
    share: MoneyCents,
}

/// Compute balances and settling payments for a group.
///
/// Splits are resolved against `participants` (see
/// [`resolve_split`](crate::resolve_split)); a payer outside the group is an
/// error.
pub fn build_report(participants: &[String], expenses: &[Expense]) -> ResultEngine<Report> {
    if participants.is_empty() {
        return Err(EngineError::NoParticipants);
    }

    let mut tallies: HashMap<&str, Tally> = participants
        .iter()
        .map(|name| (name.as_str(), Tally::default()))
        .collect();
    let mut total = MoneyCents::ZERO;

    for expense in expenses {
        let members = resolve_split(&expense.split, participants);
        let shares = allocate(expense.amount, &members)?;

        let payer = tallies
            .get_mut(expense.payer.as_str())
            .ok_or_else(|| EngineError::UnknownParticipant(expense.payer.clone()))?;
        payer.paid = payer.paid.checked_add(expense.amount).ok_or_else(too_large)?;
        total = total.checked_add(expense.amount).ok_or_else(too_large)?;

        for share in shares {
            if let Some(tally) = tallies.get_mut(share.name) {
                tally.share = tally.share.checked_add(share.amount).ok_or_else(too_large)?;
            }
        }
    }

    let summary = participants
        .iter()
        .map(|name| {
            let tally = tallies.remove(name.as_str()).unwrap_or_default();
            Ok(MemberSummary {
                name: name.clone(),
                paid: tally.paid,
                share: tally.share,
                balance: tally.paid.checked_sub(tally.share).ok_or_else(too_large)?,
            })
        })
        .collect::<ResultEngine<Vec<MemberSummary>>>()?;

    let per_head = Decimal::from(total.cents()) / Decimal::from(participants.len());
    let payments = settle(&summary)?;

    tracing::debug!(
        participants = participants.len(),
        expenses = expenses.len(),
        payments = payments.len(),
        "report computed"
    );

    Ok(Report {
        total,
        per_head: per_head.normalize(),
        summary,
        payments,
    })
}
