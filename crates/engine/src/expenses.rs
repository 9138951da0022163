//! The module contains the `Expense` struct and its storage model.

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{MoneyCents, ResultEngine, util::parse_uuid};

/// An expense paid by one participant and shared by a split of the group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    /// Stable identifier, also used to restore a deleted expense.
    pub id: Uuid,
    pub payer: String,
    pub amount: MoneyCents,
    pub description: String,
    /// Free text, exactly as entered by the user.
    pub date: String,
    /// Participants sharing the cost, in insertion order.
    ///
    /// An empty split means "everyone" when the report is computed.
    pub split: Vec<String>,
}

impl Expense {
    pub fn new(
        payer: String,
        amount: MoneyCents,
        description: String,
        date: String,
        split: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            payer,
            amount,
            description,
            date,
            split,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub position: i32,
    pub payer: String,
    pub amount_minor: i64,
    pub description: String,
    pub date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expense_splits::Entity")]
    ExpenseSplits,
}

impl Related<super::expense_splits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseSplits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn from_expense(expense: &Expense, position: i32) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            position: ActiveValue::Set(position),
            payer: ActiveValue::Set(expense.payer.clone()),
            amount_minor: ActiveValue::Set(expense.amount.cents()),
            description: ActiveValue::Set(expense.description.clone()),
            date: ActiveValue::Set(expense.date.clone()),
        }
    }
}

impl TryFrom<(Model, Vec<String>)> for Expense {
    type Error = crate::EngineError;

    fn try_from((model, split): (Model, Vec<String>)) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "expense")?,
            payer: model.payer,
            amount: MoneyCents::new(model.amount_minor),
            description: model.description,
            date: model.date,
            split,
        })
    }
}
