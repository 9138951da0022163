//! Expense splitting and debt settlement.
//!
//! The heart of the crate is [`build_report`]: given the participants of a
//! group and the expenses they recorded, it computes what each participant
//! paid, what their share is, and a deterministic list of payments that
//! settles every balance. All amounts are integer cents ([`MoneyCents`]).
//!
//! Around it:
//! - [`Snapshot`] holds the group and implements the record-keeping operations
//!   (participants, expenses, settings, restore from trash);
//! - [`Repository`] loads and saves snapshots ([`MemoryRepository`],
//!   [`DatabaseRepository`]);
//! - [`Engine`] is the async service used by the server and the CLI.

pub use allocation::{Share, allocate, resolve_split};
pub use error::EngineError;
pub use expenses::Expense;
pub use ledger::{ExpenseDraft, ExpensePatch, RemovedParticipant, Snapshot};
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use participants::{normalize_name, normalize_names};
pub use report::{MemberSummary, Report, build_report};
pub use settings::{DEFAULT_CURRENCY, Settings, SettingsPatch};
pub use settlement::{Payment, settle};
pub use store::{DatabaseRepository, MemoryRepository, Repository};

/// Re-exported so callers can build decimal amounts without a direct dependency.
pub use rust_decimal::Decimal;

mod allocation;
mod error;
mod expense_splits;
mod expenses;
mod ledger;
mod money;
mod ops;
mod participants;
mod report;
mod settings;
mod settlement;
mod store;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
