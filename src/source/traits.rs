//! Trait for dashboard API access

use crate::types::DashboardDescriptor;
use async_trait::async_trait;

/// Source of dashboard metadata and content
///
/// Implementations perform a single attempt per call; retries are not part
/// of the contract.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// List every folder and dashboard visible to the API user
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the response is not a descriptor list.
    async fn search(&self) -> crate::Result<Vec<DashboardDescriptor>>;

    /// Fetch the raw JSON document of one dashboard
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or times out, or the server
    /// answers with a non-success status.
    async fn fetch_dashboard(&self, descriptor: &DashboardDescriptor) -> crate::Result<Vec<u8>>;

    /// Human-readable name for logging
    fn name(&self) -> &str;
}
