//! Question-flow graph engine for flowpoll.
//!
//! A survey is a directed graph: each choice of a question may carry an edge
//! to another question, and questions without an applicable edge fall back
//! to the next unreferenced question in list order. This crate owns
//! everything that walks or mutates that graph:
//!
//! - [`referenced_ids`] / [`entry_question`] / [`fallback_after`] - the
//!   graph-shape queries shared by authoring and traversal
//! - [`builder`] - authoring mutations with referential-integrity repair
//! - [`SurveyRun`] - the respondent-facing traversal state machine with
//!   progress estimation
//! - [`reconstruct_flow`] - replays a completed response into an ordered,
//!   complete trace for review

mod model;
pub use model::{entry_question, fallback_after, referenced_ids};

pub mod builder;
pub use builder::{ChoiceSpec, QuestionSpec};

mod progress;
pub use progress::estimate_remaining;

mod traversal;
pub use traversal::{Step, SurveyRun};

mod reconstruct;
pub use reconstruct::{FlowNode, reconstruct_flow};
