use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(PointId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointType {
    Taxi,
    Bus,
    Train,
    Ship,
    Drive,
    Flight,
    CheckIn,
    Sightseeing,
    Restaurant,
}

impl PointType {
    pub const ALL: [PointType; 9] = [
        PointType::Taxi,
        PointType::Bus,
        PointType::Train,
        PointType::Ship,
        PointType::Drive,
        PointType::Flight,
        PointType::CheckIn,
        PointType::Sightseeing,
        PointType::Restaurant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PointType::Taxi => "taxi",
            PointType::Bus => "bus",
            PointType::Train => "train",
            PointType::Ship => "ship",
            PointType::Drive => "drive",
            PointType::Flight => "flight",
            PointType::CheckIn => "check-in",
            PointType::Sightseeing => "sightseeing",
            PointType::Restaurant => "restaurant",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// A selectable add-on for a trip point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offer {
    pub title: String,
    pub price: u32,
}

impl Offer {
    pub fn new(title: impl Into<String>, price: u32) -> Self {
        Self {
            title: title.into(),
            price,
        }
    }
}

/// Every field of a trip point except its identity. A creation draft is exactly this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointDetails {
    #[serde(rename = "type")]
    pub point_type: PointType,
    pub destination: String,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub base_price: u32,
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl PointDetails {
    pub fn duration(&self) -> Duration {
        self.date_to - self.date_from
    }

    /// Base price plus every selected offer.
    pub fn total_price(&self) -> u64 {
        u64::from(self.base_price)
            + self
                .offers
                .iter()
                .map(|offer| u64::from(offer.price))
                .sum::<u64>()
    }

    pub fn has_offer(&self, title: &str) -> bool {
        self.offers.iter().any(|offer| offer.title == title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPoint {
    pub id: PointId,
    #[serde(flatten)]
    pub details: PointDetails,
}

impl TripPoint {
    pub fn new(id: PointId, details: PointDetails) -> Self {
        Self { id, details }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Offers available for one point type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferGroup {
    #[serde(rename = "type")]
    pub point_type: PointType,
    pub offers: Vec<Offer>,
}
