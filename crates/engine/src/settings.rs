//! Group settings: the event name and the currency label shown next to amounts.
//!
//! The currency is a display label only; the engine never converts amounts.

use sea_orm::entity::{ActiveValue, prelude::*};

pub const DEFAULT_CURRENCY: &str = "CAD";

/// Primary key of the single settings row.
pub(crate) const SETTINGS_ROW_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub event: String,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            event: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Partial update of [`Settings`]; `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub event: Option<String>,
    pub currency: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub event: String,
    pub currency: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Settings {
    fn from(model: Model) -> Self {
        Self {
            event: model.event,
            currency: model.currency,
        }
    }
}

impl From<&Settings> for ActiveModel {
    fn from(settings: &Settings) -> Self {
        Self {
            id: ActiveValue::Set(SETTINGS_ROW_ID),
            event: ActiveValue::Set(settings.event.clone()),
            currency: ActiveValue::Set(settings.currency.clone()),
        }
    }
}
