//! Mock AI providers for tests and local development.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::analysis::AuditPayload;
use crate::domain::intake::IntakeSession;
use crate::ports::{AuditProvider, ExtractedFields, FieldExtractor, ProviderError};

/// Audit provider returning a scripted outcome and recording calls.
pub struct MockAuditProvider {
    result: Result<AuditPayload, ProviderError>,
    calls: Mutex<u32>,
}

impl MockAuditProvider {
    /// Always succeeds with the given payload.
    pub fn returning(payload: AuditPayload) -> Self {
        Self {
            result: Ok(payload),
            calls: Mutex::new(0),
        }
    }

    /// Always fails with the given error.
    pub fn failing(err: ProviderError) -> Self {
        Self {
            result: Err(err),
            calls: Mutex::new(0),
        }
    }

    /// Number of audit calls received.
    pub fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl AuditProvider for MockAuditProvider {
    async fn run_audit(
        &self,
        _session: &IntakeSession,
        _timeout: Duration,
    ) -> Result<AuditPayload, ProviderError> {
        *self.calls.lock().unwrap() += 1;
        self.result.clone()
    }
}

/// Field extractor returning a scripted outcome and recording calls.
pub struct MockFieldExtractor {
    result: Result<ExtractedFields, ProviderError>,
    calls: Mutex<u32>,
}

impl MockFieldExtractor {
    pub fn returning(fields: ExtractedFields) -> Self {
        Self {
            result: Ok(fields),
            calls: Mutex::new(0),
        }
    }

    pub fn failing(err: ProviderError) -> Self {
        Self {
            result: Err(err),
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl FieldExtractor for MockFieldExtractor {
    async fn extract_fields(
        &self,
        _message: &str,
        _timeout: Duration,
    ) -> Result<ExtractedFields, ProviderError> {
        *self.calls.lock().unwrap() += 1;
        self.result.clone()
    }
}
