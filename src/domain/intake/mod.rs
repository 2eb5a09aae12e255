//! Intake - The guided question/answer flow.
//!
//! A static catalog of questions, a per-caller session accumulating
//! answers, a flow controller that decides what to ask next, and a
//! best-effort extractor that mines free text for answers.

mod catalog;
mod extractor;
mod flow;
mod question;
mod session;

pub use catalog::{standard_catalog, Catalog, CatalogError};
pub use extractor::FreeformExtractor;
pub use flow::FlowController;
pub use question::{Question, QuestionKind, ValidationRule, Visibility};
pub use session::{AnswerValue, IntakeSession};
