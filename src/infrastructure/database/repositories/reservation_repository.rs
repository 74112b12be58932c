//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::domain::reservation::{
    NewReservation, Reservation, ReservationRepository, ReservationStatus,
};
use crate::domain::restaurant::RestaurantSummary;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{reservation, restaurant};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        user_id: m.user_id,
        restaurant_id: m.restaurant_id,
        reservation_date: m.reservation_date,
        reservation_time: m.reservation_time,
        party_size: m.party_size,
        status: ReservationStatus::from_str(&m.status),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create(&self, r: NewReservation) -> DomainResult<Reservation> {
        debug!(
            "Creating reservation: user={} restaurant={} date={}",
            r.user_id, r.restaurant_id, r.reservation_date
        );

        let model = reservation::ActiveModel {
            id: NotSet,
            user_id: Set(r.user_id),
            restaurant_id: Set(r.restaurant_id),
            reservation_date: Set(r.reservation_date),
            reservation_time: Set(r.reservation_time),
            party_size: Set(r.party_size),
            status: Set(ReservationStatus::Confirmed.as_str().to_string()),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_for_user(
        &self,
        user_id: &str,
    ) -> DomainResult<Vec<(Reservation, RestaurantSummary)>> {
        let rows = reservation::Entity::find()
            .filter(reservation::Column::UserId.eq(user_id))
            .order_by_desc(reservation::Column::ReservationDate)
            .order_by_desc(reservation::Column::ReservationTime)
            .find_also_related(restaurant::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut out = Vec::with_capacity(rows.len());
        for (model, rest) in rows {
            let rest = rest.ok_or_else(|| {
                DomainError::Storage(format!(
                    "reservation {} references missing restaurant {}",
                    model.id, model.restaurant_id
                ))
            })?;
            out.push((
                model_to_domain(model),
                RestaurantSummary {
                    name: rest.name,
                    location: rest.location,
                    cuisine_type: rest.cuisine_type,
                    image_url: rest.image_url,
                },
            ));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    use crate::infrastructure::database::repositories::test_support::{
        connect_memory, seed_restaurant, seed_user,
    };

    fn booking(user_id: &str, restaurant_id: i32, date: &str) -> NewReservation {
        NewReservation {
            user_id: user_id.to_string(),
            restaurant_id,
            reservation_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            reservation_time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            party_size: 2,
        }
    }

    #[tokio::test]
    async fn create_assigns_confirmed_status() {
        let db = connect_memory().await;
        seed_user(&db, "u1", "u1@example.com").await;
        seed_restaurant(&db, 1, "Bistro Nima", "French").await;
        let repo = SeaOrmReservationRepository::new(db);

        let created = repo.create(booking("u1", 1, "2026-09-01")).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.status, ReservationStatus::Confirmed);
        assert_eq!(created.party_size, 2);
    }

    #[tokio::test]
    async fn find_for_user_embeds_restaurant_newest_date_first() {
        let db = connect_memory().await;
        seed_user(&db, "u1", "u1@example.com").await;
        seed_user(&db, "u2", "u2@example.com").await;
        seed_restaurant(&db, 1, "Bistro Nima", "French").await;
        let repo = SeaOrmReservationRepository::new(db);

        repo.create(booking("u1", 1, "2026-09-01")).await.unwrap();
        repo.create(booking("u1", 1, "2026-09-15")).await.unwrap();
        repo.create(booking("u2", 1, "2026-09-20")).await.unwrap();

        let listed = repo.find_for_user("u1").await.unwrap();
        assert_eq!(listed.len(), 2);
        let (first, summary) = &listed[0];
        assert_eq!(first.reservation_date.to_string(), "2026-09-15");
        assert_eq!(summary.name, "Bistro Nima");
        assert_eq!(summary.cuisine_type, "French");
    }
}
