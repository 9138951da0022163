//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] thrown when an amount cannot be parsed or is out of range.
//! - [`NoParticipants`] thrown when a report is requested for an empty group.
//! - [`UnknownParticipant`] thrown when a payer is not part of the group.
//! - [`KeyNotFound`] thrown when an item is not found.
//! - [`Unbalanced`] thrown when settlement leaves money unassigned (a defect).
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`NoParticipants`]: EngineError::NoParticipants
//!  [`UnknownParticipant`]: EngineError::UnknownParticipant
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Unbalanced`]: EngineError::Unbalanced
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("No participants")]
    NoParticipants,
    #[error("Invalid split: {0}")]
    InvalidSplit(String),
    #[error("\"{0}\" is not a participant")]
    UnknownParticipant(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unbalanced settlement: {0}")]
    Unbalanced(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::NoParticipants, Self::NoParticipants) => true,
            (Self::InvalidSplit(a), Self::InvalidSplit(b)) => a == b,
            (Self::UnknownParticipant(a), Self::UnknownParticipant(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::Unbalanced(a), Self::Unbalanced(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
