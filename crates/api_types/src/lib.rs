use serde::{Deserialize, Serialize};

/// `{"ok": true}` body for endpoints with nothing else to say.
#[derive(Debug, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
}

/// Error body: `{"ok": false, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

pub mod amount {
    use super::*;

    /// A monetary amount in major units, as sent by clients.
    ///
    /// Clients send either a JSON number (`10.5`) or a string (`"10,50"`).
    /// Numbers are kept as their textual form so they can be parsed as
    /// decimals without going through binary floating point.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum Amount {
        Number(serde_json::Number),
        Text(String),
    }

    impl Amount {
        /// The decimal text of this amount.
        pub fn as_text(&self) -> String {
            match self {
                Self::Number(number) => number.to_string(),
                Self::Text(text) => text.clone(),
            }
        }
    }

    impl From<String> for Amount {
        fn from(value: String) -> Self {
            Self::Text(value)
        }
    }
}

pub mod participant {
    use super::*;
    use crate::expense::ExpenseRecord;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ParticipantsSet {
        #[serde(default)]
        pub names: Vec<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ParticipantRename {
        #[serde(default)]
        pub old: String,
        #[serde(default)]
        pub new: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ParticipantsResponse {
        pub ok: bool,
        pub participants: Vec<String>,
    }

    /// A deleted participant and the expenses removed with them.
    ///
    /// This is also the `item` accepted by `/api/restore` with
    /// `"type": "participant"`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RemovedParticipant {
        pub name: String,
        #[serde(default)]
        pub expenses: Vec<ExpenseRecord>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ParticipantDeleted {
        pub ok: bool,
        pub participants: Vec<String>,
        pub removed: RemovedParticipant,
    }
}

pub mod expense {
    use super::*;
    use crate::amount::Amount;

    /// An expense as exchanged with clients and stored in JSON exports.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseRecord {
        /// Expense id (UUID). Required when restoring.
        #[serde(default)]
        pub id: String,
        pub payer: String,
        pub amount: Amount,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub date: String,
        /// Participants sharing the cost. Missing or empty means everyone.
        #[serde(default)]
        pub split: Vec<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub payer: String,
        pub amount: Amount,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub date: String,
        /// If absent, the whole group shares the expense.
        pub split: Option<Vec<String>>,
    }

    /// Partial update: absent fields are left unchanged.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub payer: Option<String>,
        pub amount: Option<Amount>,
        pub description: Option<String>,
        pub date: Option<String>,
        pub split: Option<Vec<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseResponse {
        pub ok: bool,
        pub expense: ExpenseRecord,
    }
}

pub mod restore {
    use super::*;

    /// Body of `/api/restore`.
    ///
    /// `item` is decoded according to `type`: an
    /// [`ExpenseRecord`](crate::expense::ExpenseRecord) for `"expense"`, a
    /// [`RemovedParticipant`](crate::participant::RemovedParticipant) for
    /// `"participant"`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RestoreRequest {
        #[serde(rename = "type", default)]
        pub kind: String,
        pub item: Option<serde_json::Value>,
    }
}

pub mod settings {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SettingsView {
        pub event: String,
        pub currency: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SettingsUpdate {
        pub event: Option<String>,
        pub currency: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettingsResponse {
        pub ok: bool,
        pub settings: SettingsView,
    }
}

pub mod data {
    use super::*;
    use crate::expense::ExpenseRecord;

    fn default_currency() -> String {
        "CAD".to_string()
    }

    /// Whole group state, as returned by `/api/data` and used for JSON
    /// import/export. Missing keys take their defaults so older files load.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct DataFile {
        #[serde(default)]
        pub participants: Vec<String>,
        #[serde(default)]
        pub expenses: Vec<ExpenseRecord>,
        #[serde(default)]
        pub event: String,
        #[serde(default = "default_currency")]
        pub currency: String,
    }
}

pub mod report {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;

    use super::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MemberFigures {
        pub paid_cents: i64,
        pub share_cents: i64,
        pub balance_cents: i64,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PaymentView {
        pub from: String,
        pub to: String,
        pub amount_cents: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReportResponse {
        pub ok: bool,
        pub total_cents: i64,
        /// Average spend per participant in cents, serialized as a decimal string.
        pub per_head_cents: Decimal,
        pub summary: BTreeMap<String, MemberFigures>,
        /// Settling payments, in the order they were generated.
        pub payments: Vec<PaymentView>,
    }
}
