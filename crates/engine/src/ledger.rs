//! Record keeping for a group: participants, expenses and settings.
//!
//! Every operation works on an in-memory [`Snapshot`]. Loading and saving the
//! snapshot is the job of a [`Repository`](crate::Repository); the
//! [`Engine`](crate::Engine) ties the two together.

use uuid::Uuid;

use crate::{
    EngineError, Expense, MoneyCents, ResultEngine, Settings, SettingsPatch,
    allocation::resolve_split,
    participants::{normalize_name, normalize_names},
    util::ensure_positive_amount,
};

/// Everything the service knows about a group at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub participants: Vec<String>,
    pub expenses: Vec<Expense>,
    pub settings: Settings,
}

/// Input for a new expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub payer: String,
    pub amount: MoneyCents,
    pub description: String,
    pub date: String,
    /// `None` means the whole group.
    pub split: Option<Vec<String>>,
}

/// Partial update of an expense; `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub payer: Option<String>,
    pub amount: Option<MoneyCents>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub split: Option<Vec<String>>,
}

/// A removed participant together with the expenses they paid.
///
/// Handing it back to [`Snapshot::restore_participant`] undoes the removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovedParticipant {
    pub name: String,
    pub expenses: Vec<Expense>,
}

impl Snapshot {
    fn has_participant(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p == name)
    }

    fn expense_index(&self, id: Uuid) -> ResultEngine<usize> {
        self.expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
    }

    fn require_payer(&self, payer: &str) -> ResultEngine<String> {
        let name = normalize_name(payer)
            .ok_or_else(|| EngineError::InvalidInput("payer is required".to_string()))?;
        if !self.has_participant(&name) {
            return Err(EngineError::UnknownParticipant(name));
        }
        Ok(name)
    }

    /// Keep only known members of `split`; fall back to the whole group.
    fn normalize_split(&self, split: &[String]) -> Vec<String> {
        let split = normalize_names(split);
        resolve_split(&split, &self.participants)
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Drop split members that are no longer participants.
    fn prune_splits(&mut self) {
        let participants = &self.participants;
        for expense in &mut self.expenses {
            expense
                .split
                .retain(|member| participants.iter().any(|p| p == member));
        }
    }

    /// Replace the participant list.
    ///
    /// Names are normalized and de-duplicated. Expenses paid by someone who is
    /// no longer in the group are removed.
    pub fn set_participants<I, S>(&mut self, names: I) -> &[String]
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.participants = normalize_names(names);
        let participants = &self.participants;
        self.expenses
            .retain(|e| participants.iter().any(|p| *p == e.payer));
        self.prune_splits();
        &self.participants
    }

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> ResultEngine<&Expense> {
        let payer = self.require_payer(&draft.payer)?;
        ensure_positive_amount(draft.amount)?;
        let split = match draft.split {
            Some(split) => self.normalize_split(&split),
            None => self.participants.clone(),
        };

        let expense = Expense::new(payer, draft.amount, draft.description, draft.date, split);
        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    pub fn update_expense(&mut self, id: Uuid, patch: ExpensePatch) -> ResultEngine<&Expense> {
        let idx = self.expense_index(id)?;

        let payer = patch
            .payer
            .as_deref()
            .map(|p| self.require_payer(p))
            .transpose()?;
        if let Some(amount) = patch.amount {
            ensure_positive_amount(amount)?;
        }
        let split = patch.split.as_deref().map(|s| self.normalize_split(s));

        let expense = &mut self.expenses[idx];
        if let Some(payer) = payer {
            expense.payer = payer;
        }
        if let Some(amount) = patch.amount {
            expense.amount = amount;
        }
        if let Some(description) = patch.description {
            expense.description = description;
        }
        if let Some(date) = patch.date {
            expense.date = date;
        }
        if let Some(split) = split {
            expense.split = split;
        }
        Ok(expense)
    }

    pub fn delete_expense(&mut self, id: Uuid) -> ResultEngine<Expense> {
        let idx = self.expense_index(id)?;
        Ok(self.expenses.remove(idx))
    }

    /// Rename a participant everywhere it is referenced.
    pub fn rename_participant(&mut self, old: &str, new: &str) -> ResultEngine<&[String]> {
        let (Some(old), Some(new)) = (normalize_name(old), normalize_name(new)) else {
            return Err(EngineError::InvalidInput(
                "old and new names are required".to_string(),
            ));
        };
        let idx = self
            .participants
            .iter()
            .position(|p| *p == old)
            .ok_or_else(|| EngineError::KeyNotFound(old.clone()))?;
        if old == new {
            return Ok(&self.participants);
        }
        if self.has_participant(&new) {
            return Err(EngineError::ExistingKey(new));
        }

        self.participants[idx] = new.clone();
        for expense in &mut self.expenses {
            if expense.payer == old {
                expense.payer = new.clone();
            }
            for member in &mut expense.split {
                if *member == old {
                    *member = new.clone();
                }
            }
        }
        Ok(&self.participants)
    }

    /// Remove a participant and every expense they paid.
    pub fn delete_participant(&mut self, name: &str) -> ResultEngine<RemovedParticipant> {
        let name = normalize_name(name).unwrap_or_default();
        let idx = self
            .participants
            .iter()
            .position(|p| *p == name)
            .ok_or_else(|| EngineError::KeyNotFound(name.clone()))?;
        self.participants.remove(idx);

        let (removed, kept): (Vec<Expense>, Vec<Expense>) = std::mem::take(&mut self.expenses)
            .into_iter()
            .partition(|e| e.payer == name);
        self.expenses = kept;
        self.prune_splits();

        Ok(RemovedParticipant {
            name,
            expenses: removed,
        })
    }

    /// Put a deleted expense back, keeping its id.
    pub fn restore_expense(&mut self, expense: Expense) -> ResultEngine<&Expense> {
        if self.expenses.iter().any(|e| e.id == expense.id) {
            return Err(EngineError::ExistingKey(expense.id.to_string()));
        }
        let payer = self.require_payer(&expense.payer)?;
        ensure_positive_amount(expense.amount)?;
        let split = self.normalize_split(&expense.split);

        self.expenses.push(Expense {
            payer,
            split,
            ..expense
        });
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Put a deleted participant back, with the expenses they paid.
    ///
    /// The name is appended if missing. Expenses whose id already exists are
    /// skipped; the others are re-added as they were.
    pub fn restore_participant(
        &mut self,
        removed: RemovedParticipant,
    ) -> ResultEngine<&[String]> {
        let name = normalize_name(&removed.name)
            .ok_or_else(|| EngineError::InvalidInput("participant name is required".to_string()))?;
        if !self.has_participant(&name) {
            self.participants.push(name);
        }

        for expense in removed.expenses {
            if self.expenses.iter().any(|e| e.id == expense.id) {
                continue;
            }
            self.restore_expense(expense)?;
        }
        Ok(&self.participants)
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> &Settings {
        if let Some(event) = patch.event {
            self.settings.event = event;
        }
        if let Some(currency) = patch.currency {
            self.settings.currency = currency;
        }
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(names: &[&str]) -> Snapshot {
        let mut snapshot = Snapshot::default();
        snapshot.set_participants(names.iter().copied());
        snapshot
    }

    fn draft(payer: &str, cents: i64, split: Option<&[&str]>) -> ExpenseDraft {
        ExpenseDraft {
            payer: payer.to_string(),
            amount: MoneyCents::new(cents),
            description: "dinner".to_string(),
            date: "2025-01-01".to_string(),
            split: split.map(|s| s.iter().map(ToString::to_string).collect()),
        }
    }

    #[test]
    fn set_participants_drops_orphaned_expenses() {
        let mut snapshot = group(&["A", "B", "C"]);
        snapshot.add_expense(draft("A", 100, None)).unwrap();
        snapshot.add_expense(draft("B", 200, None)).unwrap();

        let participants = snapshot.set_participants([" B ", "C", "C", ""]).to_vec();

        assert_eq!(participants, vec!["B", "C"]);
        assert_eq!(snapshot.expenses.len(), 1);
        assert_eq!(snapshot.expenses[0].payer, "B");
        assert_eq!(snapshot.expenses[0].split, vec!["B", "C"]);
    }

    #[test]
    fn add_expense_defaults_split_to_everyone() {
        let mut snapshot = group(&["A", "B"]);
        let expense = snapshot.add_expense(draft("A", 1000, None)).unwrap();
        assert_eq!(expense.split, vec!["A", "B"]);
    }

    #[test]
    fn add_expense_normalizes_split() {
        let mut snapshot = group(&["A", "B", "C"]);
        let expense = snapshot
            .add_expense(draft("A", 1000, Some(&["C", "X", " C", "A"])))
            .unwrap();
        assert_eq!(expense.split, vec!["C", "A"]);

        let expense = snapshot
            .add_expense(draft("A", 1000, Some(&["X"])))
            .unwrap();
        assert_eq!(expense.split, vec!["A", "B", "C"]);
    }

    #[test]
    fn add_expense_validates_payer_and_amount() {
        let mut snapshot = group(&["A"]);
        assert_eq!(
            snapshot.add_expense(draft("Z", 100, None)).unwrap_err(),
            EngineError::UnknownParticipant("Z".to_string())
        );
        assert!(matches!(
            snapshot.add_expense(draft("A", 0, None)),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(matches!(
            snapshot.add_expense(draft("A", -5, None)),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(snapshot.expenses.is_empty());
    }

    #[test]
    fn update_expense_applies_only_given_fields() {
        let mut snapshot = group(&["A", "B"]);
        let id = snapshot.add_expense(draft("A", 1000, None)).unwrap().id;

        let updated = snapshot
            .update_expense(
                id,
                ExpensePatch {
                    payer: Some("B".to_string()),
                    amount: Some(MoneyCents::new(250)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.payer, "B");
        assert_eq!(updated.amount.cents(), 250);
        assert_eq!(updated.description, "dinner");
        assert_eq!(updated.split, vec!["A", "B"]);
    }

    #[test]
    fn update_expense_rejects_bad_patch_without_partial_writes() {
        let mut snapshot = group(&["A", "B"]);
        let id = snapshot.add_expense(draft("A", 1000, None)).unwrap().id;

        let err = snapshot
            .update_expense(
                id,
                ExpensePatch {
                    description: Some("changed".to_string()),
                    payer: Some("Z".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert_eq!(err, EngineError::UnknownParticipant("Z".to_string()));
        assert_eq!(snapshot.expenses[0].description, "dinner");
    }

    #[test]
    fn missing_expense_is_not_found() {
        let mut snapshot = group(&["A"]);
        let id = Uuid::new_v4();
        assert_eq!(
            snapshot.delete_expense(id).unwrap_err(),
            EngineError::KeyNotFound(id.to_string())
        );
        assert!(matches!(
            snapshot.update_expense(id, ExpensePatch::default()),
            Err(EngineError::KeyNotFound(_))
        ));
    }

    #[test]
    fn delete_then_restore_expense() {
        let mut snapshot = group(&["A", "B"]);
        let id = snapshot.add_expense(draft("A", 1000, None)).unwrap().id;

        let removed = snapshot.delete_expense(id).unwrap();
        assert!(snapshot.expenses.is_empty());

        snapshot.restore_expense(removed.clone()).unwrap();
        assert_eq!(snapshot.expenses, vec![removed.clone()]);

        assert_eq!(
            snapshot.restore_expense(removed).unwrap_err(),
            EngineError::ExistingKey(id.to_string())
        );
    }

    #[test]
    fn rename_updates_payers_and_splits() {
        let mut snapshot = group(&["A", "B"]);
        snapshot.add_expense(draft("A", 1000, None)).unwrap();
        snapshot.add_expense(draft("B", 500, Some(&["A"]))).unwrap();

        let participants = snapshot.rename_participant("A", "Anna").unwrap().to_vec();

        assert_eq!(participants, vec!["Anna", "B"]);
        assert_eq!(snapshot.expenses[0].payer, "Anna");
        assert_eq!(snapshot.expenses[0].split, vec!["Anna", "B"]);
        assert_eq!(snapshot.expenses[1].split, vec!["Anna"]);
    }

    #[test]
    fn rename_validates_names() {
        let mut snapshot = group(&["A", "B"]);
        assert!(matches!(
            snapshot.rename_participant("", "X"),
            Err(EngineError::InvalidInput(_))
        ));
        assert_eq!(
            snapshot.rename_participant("Z", "X").unwrap_err(),
            EngineError::KeyNotFound("Z".to_string())
        );
        assert_eq!(
            snapshot.rename_participant("A", "B").unwrap_err(),
            EngineError::ExistingKey("B".to_string())
        );
        assert_eq!(snapshot.rename_participant("A", "A").unwrap(), ["A", "B"]);
    }

    #[test]
    fn delete_then_restore_participant() {
        let mut snapshot = group(&["A", "B", "C"]);
        snapshot.add_expense(draft("A", 1000, None)).unwrap();
        snapshot.add_expense(draft("B", 600, Some(&["A", "B"]))).unwrap();

        let removed = snapshot.delete_participant("A").unwrap();

        assert_eq!(snapshot.participants, vec!["B", "C"]);
        assert_eq!(removed.expenses.len(), 1);
        assert_eq!(snapshot.expenses.len(), 1);
        assert_eq!(snapshot.expenses[0].split, vec!["B"]);

        let participants = snapshot.restore_participant(removed).unwrap().to_vec();

        assert_eq!(participants, vec!["B", "C", "A"]);
        assert_eq!(snapshot.expenses.len(), 2);
        assert_eq!(snapshot.expenses[1].payer, "A");
        assert_eq!(snapshot.expenses[1].split, vec!["A", "B", "C"]);
    }

    #[test]
    fn delete_unknown_participant_is_not_found() {
        let mut snapshot = group(&["A"]);
        assert_eq!(
            snapshot.delete_participant("B").unwrap_err(),
            EngineError::KeyNotFound("B".to_string())
        );
    }

    #[test]
    fn restore_participant_skips_existing_expenses() {
        let mut snapshot = group(&["A"]);
        let existing = snapshot.add_expense(draft("A", 100, None)).unwrap().clone();

        snapshot
            .restore_participant(RemovedParticipant {
                name: "A".to_string(),
                expenses: vec![existing],
            })
            .unwrap();

        assert_eq!(snapshot.participants, vec!["A"]);
        assert_eq!(snapshot.expenses.len(), 1);
    }

    #[test]
    fn settings_patch_keeps_missing_fields() {
        let mut snapshot = Snapshot::default();
        assert_eq!(snapshot.settings.currency, "CAD");

        let settings = snapshot.update_settings(SettingsPatch {
            event: Some("Ski trip".to_string()),
            currency: None,
        });

        assert_eq!(settings.event, "Ski trip");
        assert_eq!(settings.currency, "CAD");
    }
}
