//! Trip summary shown in the header: route, date span and total cost.

use chrono::{DateTime, Utc};
use shared::domain::TripPoint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSummary {
    pub route: String,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub total_cost: u64,
}

/// Summarizes `points` in chronological order. Routes longer than `max_cities` collapse to
/// `first — … — last`.
pub fn summarize(points: &[TripPoint], max_cities: usize) -> Option<TripSummary> {
    let mut ordered: Vec<&TripPoint> = points.iter().collect();
    ordered.sort_by_key(|point| point.details.date_from);

    let first = ordered.first()?;
    let date_from = first.details.date_from;
    let date_to = ordered
        .iter()
        .map(|point| point.details.date_to)
        .max()
        .unwrap_or(first.details.date_to);

    let cities: Vec<&str> = ordered
        .iter()
        .map(|point| point.details.destination.as_str())
        .collect();
    let route = match cities.as_slice() {
        [first_city, .., last_city] if cities.len() > max_cities.max(2) => {
            format!("{first_city} — … — {last_city}")
        }
        _ => cities.join(" — "),
    };

    Some(TripSummary {
        route,
        date_from,
        date_to,
        total_cost: ordered.iter().map(|point| point.details.total_price()).sum(),
    })
}
