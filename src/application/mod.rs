//! Application layer: services orchestrating the domain, plus outbound
//! ports.

pub mod ports;
pub mod services;

pub use ports::{ConciergeModel, ModelError, ModelReply, ReservationCall};
pub use services::{ConciergeService, ReservationService, RestaurantContextCache};
