pub mod model;
pub mod repository;

pub use model::{NewReview, Review, ReviewDigest, ReviewWithAuthor};
pub use repository::ReviewRepository;
