pub mod model;
pub mod repository;

pub use model::{Restaurant, RestaurantStatus, RestaurantSummary};
pub use repository::RestaurantRepository;
