//! # gatehouse-service
//!
//! Business logic services for Gatehouse: the typed per-request context and
//! user management on top of the repositories and the auth core.

pub mod context;
pub mod user;

pub use context::RequestContext;
pub use user::UserService;
