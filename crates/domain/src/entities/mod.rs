//! Domain entities - Route candidates and nearby stops

mod route;
mod stop;

pub use route::{Leg, Route, Step};
pub use stop::{Stop, StopIndex, StopKind};
