//! HTTP chat-completions adapter for the audit and extraction ports.
//!
//! Speaks the OpenAI-compatible chat-completions shape. Both calls demand
//! a single JSON object from the model and run the repair pass before
//! declaring the output malformed. Missing credentials short-circuit to
//! `not_configured` without any network I/O.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::analysis::AuditPayload;
use crate::domain::intake::IntakeSession;
use crate::ports::{AuditProvider, ExtractedFields, FieldExtractor, ProviderError};

use super::json_repair::repair_and_parse;

const AUDIT_SYSTEM_PROMPT: &str = "Tu es un assistant juridique. À partir des informations \
d'un dossier, réponds avec UN SEUL objet JSON, sans aucun texte autour, avec les clés : \
summary, category, urgency (1-10), complexity (Low|Medium|High), actions (liste de chaînes), \
needs_lawyer (booléen), recommended_specialty, recommended_template_id (ou null), \
problem_statement, risks (liste de chaînes), estimated_cost_min_eur, estimated_cost_max_eur, \
next_step.";

const EXTRACT_SYSTEM_PROMPT: &str = "Tu extrais des informations d'un message. Réponds avec \
UN SEUL objet JSON, sans aucun texte autour, avec uniquement les clés présentes dans le \
message parmi : category, urgency (1-10), location, opposing_party, amount_at_stake. \
N'invente aucune valeur.";

/// Configuration for the HTTP chat-completions provider.
#[derive(Debug, Clone)]
pub struct HttpAiConfig {
    /// API key; `None` disables the provider.
    api_key: Option<Secret<String>>,
    /// Model identifier (e.g. "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Default per-call timeout, capped by the caller's budget.
    pub timeout: Duration,
}

impl HttpAiConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(Secret::new(api_key.into())),
            ..Self::unconfigured()
        }
    }

    /// Creates a configuration without credentials; every call reports
    /// `not_configured`.
    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout: Duration::from_millis(5000),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the default timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}

/// Chat-completions client implementing the audit and extraction ports.
pub struct HttpAiProvider {
    config: HttpAiConfig,
    client: Client,
}

impl HttpAiProvider {
    pub fn new(config: HttpAiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    /// Sends one completion request and returns the assistant message.
    async fn complete(
        &self,
        system_prompt: &str,
        user_content: String,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        let Some(api_key) = self.config.api_key() else {
            return Err(ProviderError::NotConfigured);
        };

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_content,
                },
            ],
            temperature: 0.2,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Upstream(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream(format!("{}: {}", status, body)));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::Malformed("empty choices array".to_string()))
    }

    /// Renders the answer set as the user message for the audit prompt.
    fn render_answers(session: &IntakeSession) -> String {
        let mut lines: Vec<String> = session
            .answers()
            .iter()
            .map(|(id, value)| format!("{}: {}", id, value.render()))
            .collect();
        lines.sort();
        format!("Dossier :\n{}", lines.join("\n"))
    }
}

#[async_trait]
impl AuditProvider for HttpAiProvider {
    async fn run_audit(
        &self,
        session: &IntakeSession,
        timeout: Duration,
    ) -> Result<AuditPayload, ProviderError> {
        let content = Self::render_answers(session);
        let raw = self.complete(AUDIT_SYSTEM_PROMPT, content, timeout).await?;
        repair_and_parse(&raw)
    }
}

#[async_trait]
impl FieldExtractor for HttpAiProvider {
    async fn extract_fields(
        &self,
        message: &str,
        timeout: Duration,
    ) -> Result<ExtractedFields, ProviderError> {
        let raw = self
            .complete(EXTRACT_SYSTEM_PROMPT, message.to_string(), timeout)
            .await?;
        repair_and_parse(&raw)
    }
}

// Wire shapes for the chat-completions API.

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
