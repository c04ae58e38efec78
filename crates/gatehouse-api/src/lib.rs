//! # gatehouse-api
//!
//! HTTP API layer for Gatehouse: DTOs, error mapping, the role-gate
//! middleware, handlers, and the router.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
