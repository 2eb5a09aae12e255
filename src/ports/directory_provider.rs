//! Directory provider port - lawyer lookup by location and specialty.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::analysis::DirectoryEntry;

use super::ProviderError;

/// Port for the lawyer-directory lookup.
///
/// Errors from this provider degrade to an empty list at the gateway;
/// they never fail the analysis pipeline.
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    /// Finds professionals near `location` practicing `specialty`.
    ///
    /// Implementations return at most a handful of entries; the gateway
    /// additionally truncates to its configured maximum.
    async fn find_lawyers(
        &self,
        location: &str,
        specialty: &str,
        timeout: Duration,
    ) -> Result<Vec<DirectoryEntry>, ProviderError>;
}
