//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::ai_interaction::AiInteractionRepository;
use crate::domain::favorite::FavoriteRepository;
use crate::domain::menu::MenuRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::restaurant::RestaurantRepository;
use crate::domain::review::ReviewRepository;
use crate::domain::user::UserRepository;

use super::ai_interaction_repository::SeaOrmAiInteractionRepository;
use super::favorite_repository::SeaOrmFavoriteRepository;
use super::menu_repository::SeaOrmMenuRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::restaurant_repository::SeaOrmRestaurantRepository;
use super::review_repository::SeaOrmReviewRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let user = repos.users().find_by_email("ama@example.com").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    restaurants: SeaOrmRestaurantRepository,
    menus: SeaOrmMenuRepository,
    reservations: SeaOrmReservationRepository,
    reviews: SeaOrmReviewRepository,
    favorites: SeaOrmFavoriteRepository,
    ai_interactions: SeaOrmAiInteractionRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            restaurants: SeaOrmRestaurantRepository::new(db.clone()),
            menus: SeaOrmMenuRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            reviews: SeaOrmReviewRepository::new(db.clone()),
            favorites: SeaOrmFavoriteRepository::new(db.clone()),
            ai_interactions: SeaOrmAiInteractionRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn restaurants(&self) -> &dyn RestaurantRepository {
        &self.restaurants
    }

    fn menus(&self) -> &dyn MenuRepository {
        &self.menus
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn reviews(&self) -> &dyn ReviewRepository {
        &self.reviews
    }

    fn favorites(&self) -> &dyn FavoriteRepository {
        &self.favorites
    }

    fn ai_interactions(&self) -> &dyn AiInteractionRepository {
        &self.ai_interactions
    }
}
