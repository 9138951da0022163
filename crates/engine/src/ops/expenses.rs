use uuid::Uuid;

use crate::{
    Expense, ResultEngine,
    ledger::{ExpenseDraft, ExpensePatch},
};

use super::Engine;

impl Engine {
    pub async fn expenses(&self) -> ResultEngine<Vec<Expense>> {
        Ok(self.store.load().await?.expenses)
    }

    /// Record a new expense and return it with its generated id.
    pub async fn add_expense(&self, draft: ExpenseDraft) -> ResultEngine<Expense> {
        self.mutate(|snapshot| snapshot.add_expense(draft).cloned())
            .await
    }

    pub async fn update_expense(&self, id: Uuid, patch: ExpensePatch) -> ResultEngine<Expense> {
        self.mutate(|snapshot| snapshot.update_expense(id, patch).cloned())
            .await
    }

    /// Delete an expense and return it, so it can be restored later.
    pub async fn delete_expense(&self, id: Uuid) -> ResultEngine<Expense> {
        self.mutate(|snapshot| snapshot.delete_expense(id)).await
    }
}
