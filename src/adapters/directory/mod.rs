//! Directory provider adapters.

mod http_provider;
mod mock_provider;

pub use http_provider::{HttpDirectoryConfig, HttpDirectoryProvider};
pub use mock_provider::MockDirectoryProvider;
