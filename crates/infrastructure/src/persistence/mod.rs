//! Persistence adapters

mod error;
mod home_store;

pub use error::HomeStoreError;
pub use home_store::{FileHomeStore, default_home_path};
