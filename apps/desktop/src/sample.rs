use chrono::{DateTime, Duration, Utc};
use client_core::Seed;
use shared::domain::{
    Destination, Offer, OfferGroup, PointDetails, PointId, PointType, TripPoint,
};

/// A small trip around `now`: one leg already over, one under way, the rest ahead.
pub fn sample_seed(now: DateTime<Utc>) -> Seed {
    let destinations = [
        ("Amsterdam", "Canals, bikes and the Rijksmuseum."),
        ("Geneva", "Lakeside city at the foot of the Alps."),
        ("Chamonix", "Mountain town below Mont Blanc."),
        ("Turin", "Arcades, coffee and the Egyptian Museum."),
    ]
    .into_iter()
    .map(|(name, description)| Destination {
        name: name.into(),
        description: description.into(),
    })
    .collect();

    let offers = vec![
        OfferGroup {
            point_type: PointType::Taxi,
            offers: vec![Offer::new("Upgrade to business", 120), Offer::new("Child seat", 10)],
        },
        OfferGroup {
            point_type: PointType::Flight,
            offers: vec![
                Offer::new("Add luggage", 50),
                Offer::new("Choose seats", 5),
                Offer::new("Add meal", 15),
            ],
        },
        OfferGroup {
            point_type: PointType::Train,
            offers: vec![Offer::new("First class", 40)],
        },
        OfferGroup {
            point_type: PointType::CheckIn,
            offers: vec![Offer::new("Add breakfast", 25)],
        },
    ];

    let leg = |id: i64, point_type, destination: &str, start_hours: i64, hours: i64, price| {
        let date_from = now + Duration::hours(start_hours);
        TripPoint::new(
            PointId(id),
            PointDetails {
                point_type,
                destination: destination.into(),
                date_from,
                date_to: date_from + Duration::hours(hours),
                base_price: price,
                offers: Vec::new(),
                is_favorite: false,
            },
        )
    };

    let mut flight = leg(2, PointType::Flight, "Geneva", -2, 4, 180);
    flight.details.offers.push(Offer::new("Add luggage", 50));
    let mut hotel = leg(4, PointType::CheckIn, "Chamonix", 30, 40, 320);
    hotel.details.is_favorite = true;

    Seed {
        points: vec![
            leg(1, PointType::Taxi, "Amsterdam", -6, 1, 35),
            flight,
            leg(3, PointType::Train, "Chamonix", 26, 2, 60),
            hotel,
            leg(5, PointType::Drive, "Turin", 76, 4, 90),
        ],
        destinations,
        offers,
    }
}
