//! Reservation service
//!
//! The single entry point for creating bookings, shared by the HTTP
//! endpoint and the concierge tool-call branch so both paths validate
//! identically.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::reservation::{NewReservation, Reservation};
use crate::domain::restaurant::RestaurantSummary;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Validate and persist a booking. Every argument is optional at the
    /// boundary; anything missing or malformed is a validation error.
    pub async fn create(
        &self,
        user_id: &str,
        restaurant_id: Option<i32>,
        date: Option<&str>,
        time: Option<&str>,
        party_size: Option<i64>,
    ) -> DomainResult<Reservation> {
        let (Some(restaurant_id), Some(date), Some(time), Some(party_size)) =
            (restaurant_id, date, time, party_size)
        else {
            return Err(DomainError::validation(
                "Restaurant, date, time and party size are all required.",
            ));
        };

        let reservation_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| DomainError::validation("Invalid reservation date. Expected YYYY-MM-DD."))?;

        let reservation_time = NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .map_err(|_| DomainError::validation("Invalid reservation time. Expected HH:MM."))?;

        if party_size < 1 || party_size > i64::from(i32::MAX) {
            return Err(DomainError::validation(
                "Party size must be a positive number.",
            ));
        }

        self.repos
            .reservations()
            .create(NewReservation {
                user_id: user_id.to_string(),
                restaurant_id,
                reservation_date,
                reservation_time,
                party_size: party_size as i32,
            })
            .await
    }

    /// A user's bookings with restaurant details, most recent first.
    pub async fn list_for_user(
        &self,
        user_id: &str,
    ) -> DomainResult<Vec<(Reservation, RestaurantSummary)>> {
        self.repos.reservations().find_for_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::{
        connect_memory, seed_restaurant, seed_user,
    };
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    async fn service() -> ReservationService {
        let db = connect_memory().await;
        seed_user(&db, "u1", "u1@example.com").await;
        seed_restaurant(&db, 7, "Santoku", "Japanese").await;
        ReservationService::new(Arc::new(SeaOrmRepositoryProvider::new(db)))
    }

    #[tokio::test]
    async fn create_persists_a_confirmed_booking() {
        let svc = service().await;

        let created = svc
            .create("u1", Some(7), Some("2026-09-01"), Some("19:30"), Some(4))
            .await
            .unwrap();
        assert_eq!(created.restaurant_id, 7);
        assert_eq!(created.party_size, 4);

        let listed = svc.list_for_user("u1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].1.name, "Santoku");
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let svc = service().await;

        let err = svc
            .create("u1", Some(7), None, Some("19:30"), Some(2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn malformed_date_is_rejected() {
        let svc = service().await;

        let err = svc
            .create("u1", Some(7), Some("tomorrow"), Some("19:30"), Some(2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn malformed_time_is_rejected() {
        let svc = service().await;

        let err = svc
            .create("u1", Some(7), Some("2026-09-01"), Some("half past"), Some(2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn non_positive_party_size_is_rejected() {
        let svc = service().await;

        let err = svc
            .create("u1", Some(7), Some("2026-09-01"), Some("19:30"), Some(0))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
