//! Sort and filter pipelines over trip points, plus the clock they read "now" from.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use shared::{
    domain::TripPoint,
    protocol::{FilterKind, SortKind},
};

pub type Comparator = fn(&TripPoint, &TripPoint) -> Ordering;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn comparator_for(sort: SortKind) -> Comparator {
    match sort {
        SortKind::Day => by_day,
        SortKind::Time => by_duration,
        SortKind::Price => by_price,
    }
}

fn by_day(a: &TripPoint, b: &TripPoint) -> Ordering {
    a.details.date_from.cmp(&b.details.date_from)
}

fn by_duration(a: &TripPoint, b: &TripPoint) -> Ordering {
    b.details.duration().cmp(&a.details.duration())
}

fn by_price(a: &TripPoint, b: &TripPoint) -> Ordering {
    b.details.base_price.cmp(&a.details.base_price)
}

/// Points that started in the past and end in the future belong to both `Future` and `Past`.
pub fn predicate_for(filter: FilterKind, now: DateTime<Utc>) -> impl Fn(&TripPoint) -> bool {
    move |point: &TripPoint| {
        let details = &point.details;
        let in_progress = details.date_from < now && details.date_to > now;
        match filter {
            FilterKind::Everything => true,
            FilterKind::Future => details.date_from >= now || in_progress,
            FilterKind::Past => details.date_to < now || in_progress,
        }
    }
}

/// Filters a copy of `points`, then sorts it stably. The input is never touched.
pub fn derive_view(
    points: &[TripPoint],
    filter: FilterKind,
    sort: SortKind,
    now: DateTime<Utc>,
) -> Vec<TripPoint> {
    let keep = predicate_for(filter, now);
    let mut view: Vec<TripPoint> = points.iter().filter(|&point| keep(point)).cloned().collect();
    view.sort_by(comparator_for(sort));
    view
}
