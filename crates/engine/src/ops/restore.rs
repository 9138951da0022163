use crate::{Expense, ResultEngine, ledger::RemovedParticipant};

use super::Engine;

impl Engine {
    /// Put a deleted expense back under its original id.
    pub async fn restore_expense(&self, expense: Expense) -> ResultEngine<Expense> {
        self.mutate(|snapshot| snapshot.restore_expense(expense).cloned())
            .await
    }

    /// Put a deleted participant back, together with the expenses they paid.
    pub async fn restore_participant(
        &self,
        removed: RemovedParticipant,
    ) -> ResultEngine<Vec<String>> {
        self.mutate(|snapshot| snapshot.restore_participant(removed).map(<[String]>::to_vec))
            .await
    }
}
