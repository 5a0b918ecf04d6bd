use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ChoiceId, QuestionId, ResponseId, SurveyId, UserId};

/// A single answered question: which choice was selected where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub option_id: ChoiceId,
}

impl Answer {
    pub fn new(question_id: QuestionId, option_id: ChoiceId) -> Self {
        Self {
            question_id,
            option_id,
        }
    }
}

/// A completed walk through a survey.
///
/// Created atomically at completion and never mutated afterwards. The
/// respondent's name is snapshotted at submission time so later changes to
/// the user record do not rewrite history. `survey_id` and `user_id` are
/// weak references; deleting a survey leaves its responses in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub id: ResponseId,
    pub survey_id: SurveyId,
    pub user_id: UserId,
    pub name: String,
    pub surname: String,
    pub answers: Vec<Answer>,
    pub completed_at: DateTime<Utc>,
}

impl Response {
    /// Create a response with a fresh id, stamped now.
    pub fn new(
        survey_id: SurveyId,
        user_id: UserId,
        name: impl Into<String>,
        surname: impl Into<String>,
        answers: Vec<Answer>,
    ) -> Self {
        Self {
            id: ResponseId::generate(),
            survey_id,
            user_id,
            name: name.into(),
            surname: surname.into(),
            answers,
            completed_at: Utc::now(),
        }
    }

    /// The answer recorded for a question, if any.
    pub fn answer_for(&self, question: &QuestionId) -> Option<&Answer> {
        self.answers
            .iter()
            .find(|answer| &answer.question_id == question)
    }
}
