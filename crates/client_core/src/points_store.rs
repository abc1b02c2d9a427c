//! Canonical collection of trip points.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shared::{
    domain::{PointId, TripPoint},
    protocol::UpdateKind,
};
use tracing::debug;

use crate::{
    error::StoreError,
    observer::{Observable, ObserverId, Observers},
};

/// Owns the trip points and fans every mutation out to its observers.
///
/// Observers are notified after the write lock is released, so a callback may read the store.
#[derive(Default)]
pub struct PointsStore {
    points: RwLock<Vec<TripPoint>>,
    observers: Observers<TripPoint>,
}

impl PointsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current collection.
    pub fn points(&self) -> Vec<TripPoint> {
        self.read().clone()
    }

    pub fn get(&self, id: PointId) -> Option<TripPoint> {
        self.read().iter().find(|point| point.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Replaces the whole collection, typically with [`UpdateKind::Init`] after the first load.
    pub fn set_points(&self, kind: UpdateKind, points: Vec<TripPoint>) -> Result<(), StoreError> {
        let mut unique: Vec<TripPoint> = Vec::with_capacity(points.len());
        for point in points {
            if unique.iter().any(|existing| existing.id == point.id) {
                return Err(StoreError::DuplicatePoint(point.id));
            }
            unique.push(point);
        }
        debug!(update_kind = ?kind, count = unique.len(), "points replaced");
        *self.write() = unique;
        self.observers.notify(kind, None);
        Ok(())
    }

    /// Inserts a persisted point at the front of the collection.
    pub fn add_point(&self, kind: UpdateKind, point: TripPoint) -> Result<(), StoreError> {
        {
            let mut points = self.write();
            if points.iter().any(|existing| existing.id == point.id) {
                return Err(StoreError::DuplicatePoint(point.id));
            }
            points.insert(0, point.clone());
        }
        debug!(update_kind = ?kind, point_id = %point.id, "point added");
        self.observers.notify(kind, Some(&point));
        Ok(())
    }

    pub fn update_point(&self, kind: UpdateKind, point: TripPoint) -> Result<(), StoreError> {
        {
            let mut points = self.write();
            let slot = points
                .iter_mut()
                .find(|existing| existing.id == point.id)
                .ok_or(StoreError::UnknownPoint(point.id))?;
            *slot = point.clone();
        }
        debug!(update_kind = ?kind, point_id = %point.id, "point updated");
        self.observers.notify(kind, Some(&point));
        Ok(())
    }

    pub fn delete_point(&self, kind: UpdateKind, point: &TripPoint) -> Result<(), StoreError> {
        {
            let mut points = self.write();
            let index = points
                .iter()
                .position(|existing| existing.id == point.id)
                .ok_or(StoreError::UnknownPoint(point.id))?;
            points.remove(index);
        }
        debug!(update_kind = ?kind, point_id = %point.id, "point deleted");
        self.observers.notify(kind, Some(point));
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<TripPoint>> {
        self.points.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<TripPoint>> {
        self.points.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Observable for PointsStore {
    type Payload = TripPoint;

    fn add_observer<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(UpdateKind, Option<&TripPoint>) + Send + Sync + 'static,
    {
        self.observers.add(callback)
    }

    fn remove_observer(&self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    fn notify(&self, kind: UpdateKind, payload: Option<&TripPoint>) {
        self.observers.notify(kind, payload);
    }
}

#[cfg(test)]
#[path = "tests/points_store_tests.rs"]
mod tests;
