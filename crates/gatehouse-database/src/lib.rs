//! # gatehouse-database
//!
//! PostgreSQL connection management and concrete repository implementations
//! for the Gatehouse entities. The repositories implement the collaborator
//! traits the auth core consumes.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
