pub mod catalog_context;
pub mod concierge;
pub mod reservation;

pub use catalog_context::RestaurantContextCache;
pub use concierge::{ConciergeReply, ConciergeService, FALLBACK_REPLY};
pub use reservation::ReservationService;
