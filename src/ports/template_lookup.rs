//! Template lookup port - document-template metadata.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Human-facing template metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: String,
    pub title: String,
    pub category: String,
}

/// Port for resolving a recommended template id to its metadata.
///
/// Only used to attach a human-readable title to an analysis; an unknown
/// id simply yields `None`.
#[async_trait]
pub trait TemplateLookup: Send + Sync {
    async fn get_template(&self, id: &str) -> Option<TemplateSummary>;
}
