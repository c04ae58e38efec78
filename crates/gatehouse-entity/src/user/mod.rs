//! User entity, role enumeration, and login credentials.

pub mod model;
pub mod role;

pub use model::{CreateUser, Credentials, User};
pub use role::Role;
