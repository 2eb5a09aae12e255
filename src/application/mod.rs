//! Application layer - one handler per use case.

pub mod handlers;

use thiserror::Error;

use crate::domain::foundation::IntakeError;
use crate::ports::SessionStoreError;

/// Errors surfaced by application handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller input error; maps to a 4xx response.
    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// Infrastructure error; maps to a 5xx response.
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}
