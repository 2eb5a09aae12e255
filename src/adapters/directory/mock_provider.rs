//! Mock directory provider for tests.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::analysis::DirectoryEntry;
use crate::ports::{DirectoryProvider, ProviderError};

/// Directory provider returning a scripted outcome and recording calls.
pub struct MockDirectoryProvider {
    result: Result<Vec<DirectoryEntry>, ProviderError>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockDirectoryProvider {
    pub fn returning(entries: Vec<DirectoryEntry>) -> Self {
        Self {
            result: Ok(entries),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: ProviderError) -> Self {
        Self {
            result: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// (location, specialty) pairs received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DirectoryProvider for MockDirectoryProvider {
    async fn find_lawyers(
        &self,
        location: &str,
        specialty: &str,
        _timeout: Duration,
    ) -> Result<Vec<DirectoryEntry>, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((location.to_string(), specialty.to_string()));
        self.result.clone()
    }
}
