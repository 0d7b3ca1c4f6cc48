//! Application layer - Use cases and orchestration
//!
//! Defines the ports through which journeys, transit itineraries, places and
//! nearby stops are fetched, and the services that turn provider outcomes
//! into ranked route sets and stop indexes.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
