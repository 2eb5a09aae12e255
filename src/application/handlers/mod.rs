//! Use-case handlers for the intake and analysis flows.

mod record_answer;
mod run_analysis;
mod start_intake;
mod submit_message;

pub use record_answer::{RecordAnswerCommand, RecordAnswerHandler, RecordAnswerResult};
pub use run_analysis::{RunAnalysisCommand, RunAnalysisHandler};
pub use start_intake::{StartIntakeCommand, StartIntakeHandler, StartIntakeResult};
pub use submit_message::{SubmitMessageCommand, SubmitMessageHandler, SubmitMessageResult};
