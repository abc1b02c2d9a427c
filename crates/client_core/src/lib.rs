//! Client-side synchronization engine for the trip board.
//!
//! [`PointsStore`] and [`FilterStore`] own canonical state and notify observers on every
//! mutation. [`Board`] derives the filtered, sorted list from them, keeps one
//! [`PointPresenter`] per listed point (plus a [`CreationPresenter`] while the new-point form is
//! open) and sends user actions through a [`PointsApi`], touching the store only once the
//! service confirms.

use anyhow::Result;
use async_trait::async_trait;
use shared::domain::{Destination, OfferGroup, PointDetails, TripPoint};

pub mod board;
pub mod catalog;
pub mod creation_presenter;
pub mod draft;
pub mod error;
pub mod filter_store;
pub mod memory_api;
pub mod observer;
pub mod pipeline;
pub mod point_presenter;
pub mod points_store;
pub mod render;
pub mod settings;
pub mod summary;

pub use board::{Board, EditTarget, UserAction};
pub use catalog::Catalog;
pub use creation_presenter::CreationPresenter;
pub use draft::DraftEdit;
pub use error::{BoardError, StoreError};
pub use filter_store::FilterStore;
pub use memory_api::{InMemoryPointsApi, Seed};
pub use observer::{Observable, ObserverId};
pub use pipeline::{Clock, FixedClock, SystemClock};
pub use point_presenter::{PendingView, PointPresenter};
pub use points_store::PointsStore;
pub use render::{
    Component, ComponentKey, Container, DisplayMode, RenderPosition, Renderer, Screen, ViewState,
};
pub use settings::BoardSettings;
pub use summary::TripSummary;

/// Remote persistence for trip points. Any `Err` is treated as a plain failure signal.
#[async_trait]
pub trait PointsApi: Send + Sync {
    async fn fetch_points(&self) -> Result<Vec<TripPoint>>;
    async fn fetch_destinations(&self) -> Result<Vec<Destination>>;
    async fn fetch_offers(&self) -> Result<Vec<OfferGroup>>;
    /// Persists a draft and returns it with its assigned id.
    async fn create_point(&self, draft: PointDetails) -> Result<TripPoint>;
    async fn update_point(&self, point: TripPoint) -> Result<TripPoint>;
    async fn delete_point(&self, point: TripPoint) -> Result<()>;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
