//! Unified access point for all repositories.

use crate::domain::ai_interaction::AiInteractionRepository;
use crate::domain::favorite::FavoriteRepository;
use crate::domain::menu::MenuRepository;
use crate::domain::reservation::ReservationRepository;
use crate::domain::restaurant::RestaurantRepository;
use crate::domain::review::ReviewRepository;
use crate::domain::user::UserRepository;

/// Hands out repository instances so services depend on one seam instead
/// of seven constructor parameters.
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn restaurants(&self) -> &dyn RestaurantRepository;
    fn menus(&self) -> &dyn MenuRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn reviews(&self) -> &dyn ReviewRepository;
    fn favorites(&self) -> &dyn FavoriteRepository;
    fn ai_interactions(&self) -> &dyn AiInteractionRepository;
}
