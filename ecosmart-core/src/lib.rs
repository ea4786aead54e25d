//! Core types and service wiring for the EcoSmart recycling center locator.

/// Environment-driven configuration for endpoints, search policy, and logging.
pub mod config;
/// Great-circle distance helpers.
pub mod geo;
/// Material categories and recycling tag normalization.
pub mod materials;
/// Domain models shared by all providers.
pub mod model;
/// Bundle of ports implementing a single data provider.
pub mod plugin;
/// Traits describing the provider interfaces.
pub mod ports;
/// High-level locator facade used by clients.
pub mod service;

pub use config::*;
pub use geo::*;
pub use materials::*;
pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use service::*;
