//! Error types for the trip board engine.

use shared::domain::PointId;
use thiserror::Error;

/// Contract violations raised by [`crate::PointsStore`]. These indicate a caller bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no trip point with id {0} in store")]
    UnknownPoint(PointId),
    #[error("trip point {0} is already in store")]
    DuplicatePoint(PointId),
}

#[derive(Debug, Error)]
pub enum BoardError {
    /// A store mutation was attempted with an id the store does not hold.
    #[error("store invariant violated: {0}")]
    Store(#[from] StoreError),

    /// No presenter is rendered for this point in the current view.
    #[error("trip point {0} is not in the current view")]
    UnknownPoint(PointId),

    /// The point has a save or delete in flight; its controls are disabled.
    #[error("trip point {0} has a pending operation")]
    PointBusy(PointId),

    /// The point is not in edit mode.
    #[error("trip point {0} is not being edited")]
    NotEditing(PointId),

    #[error("no creation form is open")]
    NoCreationForm,

    #[error("the creation form has a pending submit")]
    CreationBusy,

    #[error("invalid draft: {0}")]
    InvalidDraft(String),

    #[error("trip points are still loading")]
    Loading,

    #[error("board is hidden")]
    Hidden,
}
