pub mod model;
pub mod repository;

pub use model::{Menu, MenuItem, MenuUpdate, NewMenu};
pub use repository::MenuRepository;
