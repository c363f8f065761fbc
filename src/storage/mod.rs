pub mod seed;
pub mod store;

pub use seed::{seed_roles, seed_users};
pub use store::EntityStore;
