//! Reservation repository interface

use async_trait::async_trait;

use super::model::{NewReservation, Reservation};
use crate::domain::error::DomainResult;
use crate::domain::restaurant::RestaurantSummary;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn create(&self, reservation: NewReservation) -> DomainResult<Reservation>;

    /// A user's bookings with the restaurant details embedded, most recent
    /// reservation date first.
    async fn find_for_user(
        &self,
        user_id: &str,
    ) -> DomainResult<Vec<(Reservation, RestaurantSummary)>>;
}
