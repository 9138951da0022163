//! Initial schema migration.
//!
//! It creates the complete schema for divvy:
//!
//! - `participants`: group members, ordered by `position`
//! - `expenses`: recorded expenses, amounts in minor units
//! - `expense_splits`: who shares each expense
//! - `settings`: a single row with event name and currency label

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Participants {
    Table,
    Name,
    Position,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Position,
    Payer,
    AmountMinor,
    Description,
    Date,
}

#[derive(Iden)]
enum ExpenseSplits {
    Table,
    ExpenseId,
    Position,
    Participant,
}

#[derive(Iden)]
enum Settings {
    Table,
    Id,
    Event,
    Currency,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participants::Name)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Participants::Position).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Position).integer().not_null())
                    .col(ColumnDef::new(Expenses::Payer).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::Description)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Expenses::Date)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExpenseSplits::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ExpenseSplits::ExpenseId).string().not_null())
                    .col(ColumnDef::new(ExpenseSplits::Position).integer().not_null())
                    .col(
                        ColumnDef::new(ExpenseSplits::Participant)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ExpenseSplits::ExpenseId)
                            .col(ExpenseSplits::Position),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expense_splits-expense_id")
                            .from(ExpenseSplits::Table, ExpenseSplits::ExpenseId)
                            .to(Expenses::Table, Expenses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Settings::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Settings::Event)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Settings::Currency)
                            .string()
                            .not_null()
                            .default("CAD"),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExpenseSplits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Participants::Table).to_owned())
            .await?;
        Ok(())
    }
}
