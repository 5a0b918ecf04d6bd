use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ChoiceId, QuestionId, SurveyId};

/// A single selectable answer of a question.
///
/// `next_question_id` is the outgoing edge of the question graph: the
/// question shown after this choice is selected, or `None` when selecting
/// this choice ends the survey (subject to the fallback sequence rule).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,

    /// Display label shown to the respondent.
    pub text: String,

    /// Explicit edge to the next question, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_question_id: Option<QuestionId>,
}

impl Choice {
    /// Create a choice with a fresh id and no outgoing edge.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ChoiceId::generate(),
            text: text.into(),
            next_question_id: None,
        }
    }

    /// Create a choice with a fresh id pointing at `next`.
    pub fn leading_to(text: impl Into<String>, next: QuestionId) -> Self {
        Self {
            id: ChoiceId::generate(),
            text: text.into(),
            next_question_id: Some(next),
        }
    }
}

/// A question in a survey: a prompt plus one or more choices.
///
/// `next_question_map` mirrors each choice's `next_question_id` for O(1)
/// lookup by choice id. It is derived, never edited directly; every
/// constructor and mutation path rebuilds it from the choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,

    /// The prompt shown to the respondent.
    pub text: String,

    /// Ordered choices. Order matters for display only, not for traversal.
    pub options: Vec<Choice>,

    /// Derived lookup: choice id to that choice's `next_question_id`.
    #[serde(default)]
    pub next_question_map: BTreeMap<ChoiceId, Option<QuestionId>>,
}

impl Question {
    /// Create a question with a fresh id. The next-question map is derived
    /// from the given choices.
    pub fn new(text: impl Into<String>, options: Vec<Choice>) -> Self {
        Self::with_id(QuestionId::generate(), text, options)
    }

    /// Create a question with a known id (editing, deserial sources).
    pub fn with_id(id: QuestionId, text: impl Into<String>, options: Vec<Choice>) -> Self {
        let mut question = Self {
            id,
            text: text.into(),
            options,
            next_question_map: BTreeMap::new(),
        };
        question.rebuild_next_map();
        question
    }

    /// Recompute `next_question_map` from the choices. Must be called after
    /// any mutation of `options` before the question is considered valid.
    pub fn rebuild_next_map(&mut self) {
        self.next_question_map = self
            .options
            .iter()
            .map(|choice| (choice.id.clone(), choice.next_question_id.clone()))
            .collect();
    }

    /// Check that the derived map matches the per-choice edges.
    pub fn next_map_in_sync(&self) -> bool {
        self.next_question_map.len() == self.options.len()
            && self.options.iter().all(|choice| {
                self.next_question_map.get(&choice.id) == Some(&choice.next_question_id)
            })
    }

    /// Look up a choice by id.
    pub fn choice(&self, id: &ChoiceId) -> Option<&Choice> {
        self.options.iter().find(|choice| &choice.id == id)
    }

    /// The explicit next question for a choice, if the choice exists and
    /// carries an edge.
    pub fn next_question_id(&self, choice: &ChoiceId) -> Option<&QuestionId> {
        self.next_question_map.get(choice)?.as_ref()
    }
}

/// A survey: an ordered list of questions forming a directed graph.
///
/// The list order is the fallback linear sequence used when a selected
/// choice has no explicit `next_question_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Survey {
    /// Create a survey with a fresh id, stamped now.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: SurveyId::generate(),
            title: title.into(),
            description: description.into(),
            questions,
            created_at: now,
            updated_at: now,
        }
    }

    /// Look up a question by id.
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }

    /// Position of a question in the fallback sequence.
    pub fn position_of(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|question| &question.id == id)
    }

    /// All question ids in fallback-sequence order.
    pub fn all_question_ids(&self) -> impl Iterator<Item = &QuestionId> {
        self.questions.iter().map(|question| &question.id)
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_question_derives_next_map() {
        let target = QuestionId::generate();
        let question = Question::new(
            "Do you hunt migratory birds?",
            vec![
                Choice::leading_to("Yes", target.clone()),
                Choice::new("No"),
            ],
        );

        assert!(question.next_map_in_sync());
        let yes = question.options[0].id.clone();
        let no = question.options[1].id.clone();
        assert_eq!(question.next_question_id(&yes), Some(&target));
        assert_eq!(question.next_question_id(&no), None);
    }

    #[test]
    fn stale_next_map_is_detected() {
        let mut question = Question::new("Season?", vec![Choice::new("Winter")]);
        question.options[0].next_question_id = Some(QuestionId::generate());
        assert!(!question.next_map_in_sync());

        question.rebuild_next_map();
        assert!(question.next_map_in_sync());
    }

    #[test]
    fn survey_round_trips_through_json() {
        let survey = Survey::new(
            "Hunting habits",
            "Annual survey",
            vec![Question::new("License type?", vec![Choice::new("Big game")])],
        );

        let json = serde_json::to_string(&survey).unwrap();
        let back: Survey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, survey);
        assert!(back.questions[0].next_map_in_sync());
    }
}
