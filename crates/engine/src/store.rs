//! Snapshot persistence.
//!
//! The engine reads the whole group and writes it back as a unit, through a
//! [`Repository`].

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait};
use tokio::sync::RwLock;

use crate::{
    Expense, ResultEngine, Settings, expense_splits, expenses, ledger::Snapshot, participants,
    settings::{self, SETTINGS_ROW_ID},
};

/// Load/save access to the group snapshot.
#[async_trait]
pub trait Repository: Send + Sync + std::fmt::Debug {
    /// Read a consistent snapshot.
    async fn load(&self) -> ResultEngine<Snapshot>;

    /// Replace the stored snapshot with `snapshot`.
    async fn save(&self, snapshot: &Snapshot) -> ResultEngine<()>;
}

/// Volatile repository, mostly useful for tests.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    snapshot: RwLock<Snapshot>,
}

impl MemoryRepository {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn load(&self) -> ResultEngine<Snapshot> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> ResultEngine<()> {
        *self.snapshot.write().await = snapshot.clone();
        Ok(())
    }
}

/// SQL repository backed by sea-orm.
///
/// Each `load` and `save` runs inside a single database transaction, so a
/// reader never observes half of a write.
#[derive(Debug, Clone)]
pub struct DatabaseRepository {
    database: DatabaseConnection,
}

impl DatabaseRepository {
    /// The schema is expected to be migrated already (see the `migration` crate).
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

fn position(idx: usize) -> i32 {
    i32::try_from(idx).unwrap_or(i32::MAX)
}

#[async_trait]
impl Repository for DatabaseRepository {
    async fn load(&self) -> ResultEngine<Snapshot> {
        let db_tx = self.database.begin().await?;

        let participants: Vec<String> = participants::Entity::find()
            .order_by_asc(participants::Column::Position)
            .all(&db_tx)
            .await?
            .into_iter()
            .map(|model| model.name)
            .collect();

        let mut splits: HashMap<String, Vec<String>> = HashMap::new();
        for row in expense_splits::Entity::find()
            .order_by_asc(expense_splits::Column::ExpenseId)
            .order_by_asc(expense_splits::Column::Position)
            .all(&db_tx)
            .await?
        {
            splits.entry(row.expense_id).or_default().push(row.participant);
        }

        let expenses = expenses::Entity::find()
            .order_by_asc(expenses::Column::Position)
            .all(&db_tx)
            .await?
            .into_iter()
            .map(|model| {
                let split = splits.remove(&model.id).unwrap_or_default();
                Expense::try_from((model, split))
            })
            .collect::<ResultEngine<Vec<_>>>()?;

        let settings = settings::Entity::find_by_id(SETTINGS_ROW_ID)
            .one(&db_tx)
            .await?
            .map(Settings::from)
            .unwrap_or_default();

        db_tx.commit().await?;

        Ok(Snapshot {
            participants,
            expenses,
            settings,
        })
    }

    async fn save(&self, snapshot: &Snapshot) -> ResultEngine<()> {
        let db_tx = self.database.begin().await?;

        expense_splits::Entity::delete_many().exec(&db_tx).await?;
        expenses::Entity::delete_many().exec(&db_tx).await?;
        participants::Entity::delete_many().exec(&db_tx).await?;

        if !snapshot.participants.is_empty() {
            let rows = snapshot
                .participants
                .iter()
                .enumerate()
                .map(|(idx, name)| participants::ActiveModel {
                    name: ActiveValue::Set(name.clone()),
                    position: ActiveValue::Set(position(idx)),
                });
            participants::Entity::insert_many(rows).exec(&db_tx).await?;
        }

        if !snapshot.expenses.is_empty() {
            let rows = snapshot
                .expenses
                .iter()
                .enumerate()
                .map(|(idx, expense)| expenses::ActiveModel::from_expense(expense, position(idx)));
            expenses::Entity::insert_many(rows).exec(&db_tx).await?;
        }

        let split_rows: Vec<expense_splits::ActiveModel> = snapshot
            .expenses
            .iter()
            .flat_map(|expense| {
                let expense_id = expense.id.to_string();
                expense
                    .split
                    .iter()
                    .enumerate()
                    .map(move |(idx, member)| expense_splits::ActiveModel {
                        expense_id: ActiveValue::Set(expense_id.clone()),
                        position: ActiveValue::Set(position(idx)),
                        participant: ActiveValue::Set(member.clone()),
                    })
            })
            .collect();
        if !split_rows.is_empty() {
            expense_splits::Entity::insert_many(split_rows)
                .exec(&db_tx)
                .await?;
        }

        let settings_model: settings::ActiveModel = (&snapshot.settings).into();
        if settings::Entity::find_by_id(SETTINGS_ROW_ID)
            .one(&db_tx)
            .await?
            .is_some()
        {
            settings::Entity::update(settings_model).exec(&db_tx).await?;
        } else {
            settings::Entity::insert(settings_model).exec(&db_tx).await?;
        }

        db_tx.commit().await?;
        Ok(())
    }
}
