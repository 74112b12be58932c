//! Restaurant domain model

/// Booking availability shown in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestaurantStatus {
    Available,
    FullyBooked,
    Open,
}

impl RestaurantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::FullyBooked => "Fully Booked",
            Self::Open => "Open",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Fully Booked" => Self::FullyBooked,
            "Open" => Self::Open,
            _ => Self::Available,
        }
    }
}

/// A catalog entry. `average_rating` and `total_reviews` are denormalized
/// aggregates maintained by review inserts.
#[derive(Debug, Clone)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub cuisine_type: String,
    pub location: String,
    pub price_range: String,
    pub average_rating: f64,
    pub total_reviews: i32,
    pub image_url: Option<String>,
    pub status: RestaurantStatus,
}

/// The restaurant fields embedded in a reservation listing.
#[derive(Debug, Clone)]
pub struct RestaurantSummary {
    pub name: String,
    pub location: String,
    pub cuisine_type: String,
    pub image_url: Option<String>,
}
