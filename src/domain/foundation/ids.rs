//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::IntakeError;

/// Maximum accepted length for a caller-supplied session id.
const MAX_SESSION_ID_LEN: usize = 128;

/// Opaque identifier for an intake session.
///
/// Callers may bring their own id (e.g. a device-scoped token); the server
/// generates a UUID when none is supplied. The inner string is validated,
/// never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a new random SessionId.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Validates and wraps a caller-supplied id.
    pub fn new(id: impl Into<String>) -> Result<Self, IntakeError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IntakeError::validation(
                "session_id",
                "session id must not be empty",
            ));
        }
        if id.len() > MAX_SESSION_ID_LEN {
            return Err(IntakeError::validation(
                "session_id",
                format!("session id exceeds {} characters", MAX_SESSION_ID_LEN),
            ));
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
