//! Conversions between engine values and the JSON types in `api_types`.
//!
//! Shared by the HTTP handlers and the admin CLI (JSON import/export).

use api_types::{
    amount::Amount,
    data::DataFile,
    expense::ExpenseRecord,
    participant::RemovedParticipant as RemovedParticipantView,
    report::{MemberFigures, PaymentView, ReportResponse},
    settings::SettingsView,
};
use engine::{
    EngineError, Expense, MoneyCents, RemovedParticipant, Report, Settings, SettingsPatch,
    Snapshot,
};
use uuid::Uuid;

/// Parse a client amount (number or string) into cents, rounding half-up.
pub fn parse_amount(amount: &Amount) -> Result<MoneyCents, EngineError> {
    amount.as_text().parse()
}

fn parse_expense_id(raw: &str) -> Result<Uuid, EngineError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| EngineError::InvalidInput(format!("invalid expense id: {raw}")))
}

pub fn expense_record(expense: &Expense) -> ExpenseRecord {
    ExpenseRecord {
        id: expense.id.to_string(),
        payer: expense.payer.clone(),
        amount: Amount::Text(expense.amount.to_string()),
        description: expense.description.clone(),
        date: expense.date.clone(),
        split: expense.split.clone(),
    }
}

/// Decode a stored or restored expense. The id must be a UUID.
pub fn expense_from_record(record: ExpenseRecord) -> Result<Expense, EngineError> {
    Ok(Expense {
        id: parse_expense_id(&record.id)?,
        amount: parse_amount(&record.amount)?,
        payer: record.payer,
        description: record.description,
        date: record.date,
        split: record.split,
    })
}

pub fn removed_participant_view(removed: &RemovedParticipant) -> RemovedParticipantView {
    RemovedParticipantView {
        name: removed.name.clone(),
        expenses: removed.expenses.iter().map(expense_record).collect(),
    }
}

pub fn removed_participant_from_view(
    view: RemovedParticipantView,
) -> Result<RemovedParticipant, EngineError> {
    let expenses = view
        .expenses
        .into_iter()
        .map(expense_from_record)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RemovedParticipant {
        name: view.name,
        expenses,
    })
}

pub fn settings_view(settings: &Settings) -> SettingsView {
    SettingsView {
        event: settings.event.clone(),
        currency: settings.currency.clone(),
    }
}

pub fn data_file(snapshot: &Snapshot) -> DataFile {
    DataFile {
        participants: snapshot.participants.clone(),
        expenses: snapshot.expenses.iter().map(expense_record).collect(),
        event: snapshot.settings.event.clone(),
        currency: snapshot.settings.currency.clone(),
    }
}

/// Build a snapshot from a JSON data file.
///
/// Every expense goes through the same validation as a restore, so the
/// result only references known participants. Expenses without an id get a
/// fresh one.
pub fn snapshot_from_data(data: DataFile) -> Result<Snapshot, EngineError> {
    let mut snapshot = Snapshot::default();
    snapshot.set_participants(data.participants);
    snapshot.update_settings(SettingsPatch {
        event: Some(data.event),
        currency: Some(data.currency),
    });

    for mut record in data.expenses {
        if record.id.trim().is_empty() {
            record.id = Uuid::new_v4().to_string();
        }
        let expense = expense_from_record(record)?;
        snapshot.restore_expense(expense)?;
    }
    Ok(snapshot)
}

pub fn report_response(report: &Report) -> ReportResponse {
    ReportResponse {
        ok: true,
        total_cents: report.total.cents(),
        per_head_cents: report.per_head,
        summary: report
            .summary
            .iter()
            .map(|member| {
                (
                    member.name.clone(),
                    MemberFigures {
                        paid_cents: member.paid.cents(),
                        share_cents: member.share.cents(),
                        balance_cents: member.balance.cents(),
                    },
                )
            })
            .collect(),
        payments: report
            .payments
            .iter()
            .map(|payment| PaymentView {
                from: payment.from.clone(),
                to: payment.to.clone(),
                amount_cents: payment.amount.cents(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_amounts_round_half_up_without_float_error() {
        let amount: Amount = serde_json::from_str("1.005").unwrap();
        assert_eq!(parse_amount(&amount).unwrap().cents(), 101);

        let amount: Amount = serde_json::from_str("10").unwrap();
        assert_eq!(parse_amount(&amount).unwrap().cents(), 1000);

        let amount: Amount = serde_json::from_str("\"12,345\"").unwrap();
        assert_eq!(parse_amount(&amount).unwrap().cents(), 1235);
    }

    #[test]
    fn long_number_amounts_keep_every_digit() {
        let amount: Amount = serde_json::from_str("1234567890123456.78").unwrap();

        assert_eq!(amount.as_text(), "1234567890123456.78");
        assert_eq!(parse_amount(&amount).unwrap().cents(), 123_456_789_012_345_678);
    }

    #[test]
    fn non_numeric_amount_is_invalid() {
        let amount = Amount::Text("lots".to_string());
        assert!(matches!(
            parse_amount(&amount),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn legacy_data_file_imports() {
        let raw = r#"{
            "participants": ["A", "B"],
            "expenses": [
                {"id": "6f1c1bb0-8c8e-4b8e-9a59-1b2a3c4d5e6f", "payer": "A", "amount": 10.0,
                 "description": "X", "date": "2025-01-01"},
                {"payer": "B", "amount": "4.50"}
            ]
        }"#;
        let data: DataFile = serde_json::from_str(raw).unwrap();

        let snapshot = snapshot_from_data(data).unwrap();

        assert_eq!(snapshot.participants, vec!["A", "B"]);
        assert_eq!(snapshot.settings.currency, "CAD");
        assert_eq!(snapshot.expenses.len(), 2);
        assert_eq!(snapshot.expenses[0].amount.cents(), 1000);
        assert_eq!(snapshot.expenses[0].split, vec!["A", "B"]);
        assert_eq!(snapshot.expenses[1].amount.cents(), 450);
    }

    #[test]
    fn export_then_import_keeps_the_group() {
        let mut snapshot = Snapshot::default();
        snapshot.set_participants(["Ann", "Ben"]);
        snapshot
            .add_expense(engine::ExpenseDraft {
                payer: "Ben".to_string(),
                amount: MoneyCents::new(1234),
                description: "fuel".to_string(),
                date: "yesterday".to_string(),
                split: Some(vec!["Ann".to_string()]),
            })
            .unwrap();

        let json = serde_json::to_string(&data_file(&snapshot)).unwrap();
        let imported = snapshot_from_data(serde_json::from_str(&json).unwrap()).unwrap();

        assert_eq!(imported, snapshot);
    }
}
