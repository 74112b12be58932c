//! Reservation domain model

use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Cancelled" => Self::Cancelled,
            _ => Self::Confirmed,
        }
    }
}

/// A confirmed table booking.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: i32,
    pub user_id: String,
    pub restaurant_id: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub party_size: i32,
    pub status: ReservationStatus,
}

/// Validated input for a new booking. Date and time are already parsed,
/// status is assigned on insert.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: String,
    pub restaurant_id: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub party_size: i32,
}
