//! Greedy debt settlement.
//!
//! Turns per-participant balances into a list of payments that brings every
//! balance back to zero. The result is not guaranteed to use the fewest
//! possible payments, but it is fully deterministic:
//!
//! - debtors are served largest debt first;
//! - the participant who paid the most is repaid first, provided they are
//!   still owed money, then the other creditors largest credit first;
//! - ties keep the participant order.

use crate::{EngineError, MemberSummary, MoneyCents, ResultEngine};

/// A single transfer that settles (part of) a debt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    pub from: String,
    pub to: String,
    pub amount: MoneyCents,
}

#[derive(Debug)]
struct Position<'a> {
    name: &'a str,
    remaining: MoneyCents,
}

/// Compute the payments that settle `summary`.
///
/// `summary` must be in participant order. Payments are returned in the order
/// they were generated.
pub fn settle(summary: &[MemberSummary]) -> ResultEngine<Vec<Payment>> {
    let mut creditors: Vec<Position<'_>> = Vec::new();
    let mut debtors: Vec<Position<'_>> = Vec::new();
    for member in summary {
        if member.balance.is_positive() {
            creditors.push(Position {
                name: &member.name,
                remaining: member.balance,
            });
        } else if member.balance.is_negative() {
            debtors.push(Position {
                name: &member.name,
                remaining: -member.balance,
            });
        }
    }

    // Stable sorts: equal amounts keep the participant order.
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    if let Some(top) = top_payer(summary)
        && let Some(idx) = creditors.iter().position(|c| c.name == top)
    {
        let top = creditors.remove(idx);
        creditors.insert(0, top);
    }

    let mut payments = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let debtor = &debtors[i];
        let creditor = &creditors[j];
        let amount = debtor.remaining.min(creditor.remaining);
        payments.push(Payment {
            from: debtor.name.to_string(),
            to: creditor.name.to_string(),
            amount,
        });

        debtors[i].remaining -= amount;
        creditors[j].remaining -= amount;
        if debtors[i].remaining.is_zero() {
            i += 1;
        }
        if creditors[j].remaining.is_zero() {
            j += 1;
        }
    }

    let leftover_debt: MoneyCents = debtors[i..].iter().map(|d| d.remaining).sum();
    let leftover_credit: MoneyCents = creditors[j..].iter().map(|c| c.remaining).sum();
    if !leftover_debt.is_zero() || !leftover_credit.is_zero() {
        return Err(EngineError::Unbalanced(format!(
            "{leftover_debt} still owed, {leftover_credit} still due after settlement"
        )));
    }

    Ok(payments)
}

/// The participant with the largest total paid, if they are still owed money.
fn top_payer(summary: &[MemberSummary]) -> Option<&str> {
    let mut top: Option<&MemberSummary> = None;
    for member in summary {
        match top {
            Some(current) if member.paid <= current.paid => {}
            _ => top = Some(member),
        }
    }
    top.filter(|m| m.balance.is_positive())
        .map(|m| m.name.as_str())
}
