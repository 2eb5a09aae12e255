//! Static template catalog.
//!
//! The document-template service owns the real catalog; this adapter
//! carries the metadata the analysis pipeline needs to attach a title to
//! a recommendation.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::ports::{TemplateLookup, TemplateSummary};

/// Fixed in-process template metadata.
#[derive(Debug, Default)]
pub struct StaticTemplateCatalog {
    templates: HashMap<String, TemplateSummary>,
}

impl StaticTemplateCatalog {
    /// Empty catalog; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in catalog of common French legal documents.
    pub fn builtin() -> Self {
        let entries = [
            (
                "mise-en-demeure-salaire",
                "Mise en demeure pour salaires impayés",
                "Droit du travail",
            ),
            (
                "contestation-licenciement",
                "Contestation de licenciement",
                "Droit du travail",
            ),
            (
                "restitution-depot-garantie",
                "Demande de restitution du dépôt de garantie",
                "Droit immobilier",
            ),
            (
                "conges-payes-reclamation",
                "Réclamation de congés payés",
                "Droit du travail",
            ),
            (
                "retractation-achat",
                "Lettre de rétractation d'un achat",
                "Droit de la consommation",
            ),
            (
                "requete-pension-alimentaire",
                "Requête en fixation de pension alimentaire",
                "Droit de la famille",
            ),
        ];

        Self {
            templates: entries
                .into_iter()
                .map(|(id, title, category)| {
                    (
                        id.to_string(),
                        TemplateSummary {
                            id: id.to_string(),
                            title: title.to_string(),
                            category: category.to_string(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Adds or replaces one template (test helper).
    pub fn with_template(mut self, summary: TemplateSummary) -> Self {
        self.templates.insert(summary.id.clone(), summary);
        self
    }
}

#[async_trait]
impl TemplateLookup for StaticTemplateCatalog {
    async fn get_template(&self, id: &str) -> Option<TemplateSummary> {
        self.templates.get(id).cloned()
    }
}
