//! Token revocation blacklist entity.

pub mod model;

pub use model::Blacklist;
