//! Home preference port

use async_trait::async_trait;
use domain::Location;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Persistence of the user's home location
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HomeStorePort: Send + Sync {
    /// Stored home, `None` when unset
    async fn load(&self) -> Result<Option<Location>, ApplicationError>;

    /// Replace the stored home
    async fn save(&self, home: &Location) -> Result<(), ApplicationError>;

    /// Forget the stored home
    async fn clear(&self) -> Result<(), ApplicationError>;
}
