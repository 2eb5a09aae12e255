//! Intake HTTP endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnswerRequest, IntakeStepResponse, MessageRequest, QuestionDto, StartIntakeRequest,
    StartIntakeResponse,
};
pub use handlers::IntakeHandlers;
pub use routes::intake_routes;
