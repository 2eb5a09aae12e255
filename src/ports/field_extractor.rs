//! Field extractor port - model-assisted answer mining from free text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ProviderError;

/// The small fixed shape the extraction prompt asks for.
///
/// Every field is optional; the model only fills what the message
/// actually supports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedFields {
    /// Legal domain, ideally one of the catalog's category options.
    pub category: Option<String>,
    /// Urgency on the 1-10 scale.
    pub urgency: Option<f64>,
    /// City or region mentioned in the message.
    pub location: Option<String>,
    /// Opposing party (employer, landlord, merchant…).
    pub opposing_party: Option<String>,
    /// Amount at stake in euros.
    pub amount_at_stake: Option<f64>,
}

impl ExtractedFields {
    /// Whether no field was extracted at all.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.urgency.is_none()
            && self.location.is_none()
            && self.opposing_party.is_none()
            && self.amount_at_stake.is_none()
    }
}

/// Port for the model-assisted extraction pass.
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    /// Extracts the fixed-shape fields from one user message.
    async fn extract_fields(
        &self,
        message: &str,
        timeout: Duration,
    ) -> Result<ExtractedFields, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fields_are_empty() {
        assert!(ExtractedFields::default().is_empty());
    }

    #[test]
    fn lenient_deserialization_ignores_extra_keys() {
        let fields: ExtractedFields = serde_json::from_str(
            r#"{"category": "Droit du travail", "confidence": 0.9, "urgency": 7}"#,
        )
        .unwrap();
        assert_eq!(fields.category.as_deref(), Some("Droit du travail"));
        assert_eq!(fields.urgency, Some(7.0));
        assert!(fields.location.is_none());
    }
}
