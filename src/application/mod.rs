//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (book, charge) change state; query handlers (verify,
//! confirm, ticket, offer) only read it.

pub mod handlers;

pub use handlers::*;
