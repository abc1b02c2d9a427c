//! In-process persistence service used by the terminal front end and the tests.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{Destination, OfferGroup, PointDetails, PointId, TripPoint},
    error::ApiException,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::PointsApi;

/// Initial content of an [`InMemoryPointsApi`], loadable from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub points: Vec<TripPoint>,
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub offers: Vec<OfferGroup>,
}

struct ServiceState {
    points: Vec<TripPoint>,
    next_id: i64,
}

/// Keeps points in memory and assigns ids on create. Failures can be scheduled with
/// [`InMemoryPointsApi::fail_next`]; each scheduled failure rejects one mutating call.
pub struct InMemoryPointsApi {
    destinations: Vec<Destination>,
    offers: Vec<OfferGroup>,
    state: Mutex<ServiceState>,
    pending_failures: AtomicUsize,
    fail_fetch: bool,
    latency: Duration,
}

impl InMemoryPointsApi {
    pub fn new(seed: Seed) -> Self {
        let next_id = seed
            .points
            .iter()
            .map(|point| point.id.0)
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            destinations: seed.destinations,
            offers: seed.offers,
            state: Mutex::new(ServiceState {
                points: seed.points,
                next_id,
            }),
            pending_failures: AtomicUsize::new(0),
            fail_fetch: false,
            latency: Duration::ZERO,
        }
    }

    /// Every call sleeps this long before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes the initial fetch reject.
    pub fn with_failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub fn fail_next(&self, count: usize) {
        self.pending_failures.fetch_add(count, Ordering::SeqCst);
    }

    pub async fn points(&self) -> Vec<TripPoint> {
        self.state.lock().await.points.clone()
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn take_failure(&self, operation: &str) -> Result<()> {
        let took = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if took {
            warn!(operation, "injected persistence failure");
            return Err(ApiException::unavailable(operation).into());
        }
        Ok(())
    }
}

#[async_trait]
impl PointsApi for InMemoryPointsApi {
    async fn fetch_points(&self) -> Result<Vec<TripPoint>> {
        self.delay().await;
        if self.fail_fetch {
            return Err(ApiException::unavailable("fetch").into());
        }
        Ok(self.points().await)
    }

    async fn fetch_destinations(&self) -> Result<Vec<Destination>> {
        self.delay().await;
        Ok(self.destinations.clone())
    }

    async fn fetch_offers(&self) -> Result<Vec<OfferGroup>> {
        self.delay().await;
        Ok(self.offers.clone())
    }

    async fn create_point(&self, draft: PointDetails) -> Result<TripPoint> {
        self.delay().await;
        self.take_failure("create")?;
        let mut state = self.state.lock().await;
        let point = TripPoint::new(PointId(state.next_id), draft);
        state.next_id += 1;
        state.points.push(point.clone());
        info!(point_id = %point.id, "point created");
        Ok(point)
    }

    async fn update_point(&self, point: TripPoint) -> Result<TripPoint> {
        self.delay().await;
        self.take_failure("update")?;
        let mut state = self.state.lock().await;
        let slot = state
            .points
            .iter_mut()
            .find(|existing| existing.id == point.id)
            .ok_or_else(|| ApiException::not_found("update", point.id))?;
        *slot = point.clone();
        Ok(point)
    }

    async fn delete_point(&self, point: TripPoint) -> Result<()> {
        self.delay().await;
        self.take_failure("delete")?;
        let mut state = self.state.lock().await;
        let before = state.points.len();
        state.points.retain(|existing| existing.id != point.id);
        if state.points.len() == before {
            return Err(ApiException::not_found("delete", point.id).into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/memory_api_tests.rs"]
mod tests;
