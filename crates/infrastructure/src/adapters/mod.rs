//! Adapters implementing application ports

mod geocoding_adapter;
mod poi_adapter;
mod routing_adapter;
mod transit_adapter;

pub use geocoding_adapter::GeocodingAdapter;
pub use poi_adapter::PoiAdapter;
pub use routing_adapter::RoutingAdapter;
pub use transit_adapter::TransitAdapter;
