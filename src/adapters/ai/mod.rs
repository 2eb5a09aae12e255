//! AI provider adapters.
//!
//! - `HttpAiProvider` - chat-completions client for audit and extraction
//! - `MockAuditProvider` / `MockFieldExtractor` - scripted outcomes for tests
//! - `json_repair` - best-effort JSON recovery from model prose

pub mod json_repair;

mod http_provider;
mod mock_provider;

pub use http_provider::{HttpAiConfig, HttpAiProvider};
pub use mock_provider::{MockAuditProvider, MockFieldExtractor};
