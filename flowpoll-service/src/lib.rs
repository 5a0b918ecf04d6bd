//! Application operations: everything a frontend or admin panel calls.
//!
//! Each module is a set of free functions over a [`flowpoll_store::JsonStore`]
//! handle. Validation and business rules live here; the store stays a dumb
//! file cabinet and the graph crate stays pure.

pub mod admin;
pub mod registration;
pub mod responses;
pub mod stats;
pub mod surveys;

pub use admin::verify_admin;
pub use registration::{create_user, load_user};
pub use responses::{create_response, load_responses_for};
pub use stats::{OptionStat, QuestionStat, question_stats};
pub use surveys::{delete_survey, load_survey, save_survey};
