use shared::domain::{Destination, Offer, OfferGroup, PointType};

/// Destinations and per-type offers loaded from the persistence service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub destinations: Vec<Destination>,
    pub offers: Vec<OfferGroup>,
}

impl Catalog {
    pub fn new(destinations: Vec<Destination>, offers: Vec<OfferGroup>) -> Self {
        Self {
            destinations,
            offers,
        }
    }

    pub fn offers_for(&self, point_type: PointType) -> &[Offer] {
        self.offers
            .iter()
            .find(|group| group.point_type == point_type)
            .map(|group| group.offers.as_slice())
            .unwrap_or_default()
    }

    pub fn has_destination(&self, name: &str) -> bool {
        self.destinations.iter().any(|destination| destination.name == name)
    }

    pub fn destination_names(&self) -> Vec<String> {
        self.destinations
            .iter()
            .map(|destination| destination.name.clone())
            .collect()
    }

    pub fn first_destination(&self) -> Option<&Destination> {
        self.destinations.first()
    }
}
