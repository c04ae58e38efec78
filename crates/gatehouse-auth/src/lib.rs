//! # gatehouse-auth
//!
//! Authentication and authorization core for the Gatehouse identity service.
//!
//! ## Modules
//!
//! - `jwt` — signed token claims and the encode/decode codec
//! - `password` — Argon2id credential hashing and verification
//! - `session` — in-memory (profile, role) session derived from a login or a token
//! - `aggregate` — the per-request auth aggregate and its lifecycle
//! - `service` — login/logout/validate orchestration
//! - `traits` — narrow collaborator contracts for user lookup and revocation

pub mod aggregate;
pub mod error;
pub mod jwt;
pub mod password;
pub mod service;
pub mod session;
pub mod traits;

pub use aggregate::Auth;
pub use error::AuthError;
pub use jwt::{Claims, TokenCodec};
pub use password::PasswordHasher;
pub use service::AuthService;
pub use session::Session;
pub use traits::{RevocationLedger, UserDirectory};
