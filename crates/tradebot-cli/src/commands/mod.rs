//! Subcommand implementations.

pub mod auth;
pub mod destinations;
pub mod request;
pub mod sources;
