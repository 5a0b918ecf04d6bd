//! Core types for the flowpoll survey platform.
//!
//! This crate provides the foundational types shared by every flowpoll crate:
//! - `Survey`, `Question` and `Choice` - the branching question graph
//! - `Response` and `Answer` - a respondent's completed walk through a survey
//! - `User` - a respondent registration
//! - `Error` - the shared error taxonomy (validation, edit lock, duplicates,
//!   missing references, cycles, storage)

mod id;
pub use id::{ChoiceId, QuestionId, ResponseId, SurveyId, UserId};

mod survey;
pub use survey::{Choice, Question, Survey};

mod response;
pub use response::{Answer, Response};

mod user;
pub use user::User;

mod error;
pub use error::Error;
