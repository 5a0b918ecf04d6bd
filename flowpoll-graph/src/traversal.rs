//! Respondent-facing traversal of a survey graph.
//!
//! One [`SurveyRun`] tracks a single attempt: the question currently shown,
//! the answers given so far, the sequence of questions visited, and an
//! estimate of how many questions the whole walk will take. Each answered
//! choice either follows its explicit edge, falls back to the next
//! unreferenced question in list order, or completes the run.

use std::collections::HashSet;

use flowpoll_types::{Answer, ChoiceId, Error, Question, QuestionId, Survey};

use crate::model::{entry_question_with, fallback_after, referenced_ids};
use crate::progress::estimate_remaining;

/// Outcome of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The run moved to another question.
    Advanced,
    /// No next question exists; the run is complete.
    Complete,
}

/// State machine for one in-progress attempt at a survey.
#[derive(Debug)]
pub struct SurveyRun<'a> {
    survey: &'a Survey,
    referenced: HashSet<QuestionId>,
    /// Question ids visited so far, including the current one.
    sequence: Vec<QuestionId>,
    answers: Vec<Answer>,
    /// Index into `sequence` of the question currently shown.
    index: usize,
    /// Estimated total questions for the whole walk; `None` when the
    /// estimate hit a cycle and is unavailable.
    total_expected: Option<usize>,
    complete: bool,
    stepped_back: bool,
}

impl<'a> SurveyRun<'a> {
    /// Begin a run at the survey's entry question.
    pub fn start(survey: &'a Survey) -> Result<Self, Error> {
        let referenced = referenced_ids(survey);
        let entry = entry_question_with(survey, &referenced)
            .ok_or_else(|| Error::validation("survey has no questions"))?;
        let entry_id = entry.id.clone();
        let total_expected = Self::estimate(survey, &entry_id, &referenced, 0);
        Ok(Self {
            survey,
            referenced,
            sequence: vec![entry_id],
            answers: Vec::new(),
            index: 0,
            total_expected,
            complete: false,
            stepped_back: false,
        })
    }

    /// The question currently shown, or `None` once the run is complete.
    pub fn current_question(&self) -> Option<&Question> {
        if self.complete {
            return None;
        }
        self.survey.question(&self.sequence[self.index])
    }

    /// Answer the current question with `choice_id`.
    ///
    /// An explicit edge whose target no longer exists degrades to the
    /// fallback rule (and is logged) instead of failing the run.
    pub fn answer(&mut self, choice_id: &ChoiceId) -> Result<Step, Error> {
        if self.complete {
            return Err(Error::validation("survey run is already complete"));
        }
        let current_id = self.sequence[self.index].clone();
        let question = self
            .survey
            .question(&current_id)
            .ok_or_else(|| Error::not_found("question", current_id.as_str()))?;
        let choice = question.choice(choice_id).ok_or_else(|| {
            Error::validation(format!(
                "question {current_id} has no choice {choice_id}"
            ))
        })?;

        let mut next = None;
        if let Some(target) = &choice.next_question_id {
            if self.survey.question(target).is_some() {
                next = Some(target.clone());
            } else {
                log::warn!(
                    "choice {choice_id} points at missing question {target}; using fallback order"
                );
            }
        }
        if next.is_none() {
            next = fallback_after(self.survey, &current_id, &self.referenced)
                .map(|question| question.id.clone());
        }

        self.answers.push(Answer::new(current_id, choice_id.clone()));
        self.stepped_back = false;

        match next {
            Some(next_id) => {
                // A re-answer after stepping back discards the old forward path.
                self.sequence.truncate(self.index + 1);
                self.sequence.push(next_id.clone());
                self.index += 1;
                self.total_expected =
                    Self::estimate(self.survey, &next_id, &self.referenced, self.index);
                Ok(Step::Advanced)
            }
            None => {
                self.complete = true;
                Ok(Step::Complete)
            }
        }
    }

    /// Undo the most recent answer. Only a single step back is allowed;
    /// answering again re-enables it.
    pub fn step_back(&mut self) -> Result<(), Error> {
        if self.stepped_back {
            return Err(Error::validation("only one step back is allowed"));
        }
        if self.answers.is_empty() {
            return Err(Error::validation("no answer to step back from"));
        }
        self.answers.pop();
        if self.complete {
            // The terminal answer never advanced the position.
            self.complete = false;
        } else {
            self.index -= 1;
            self.sequence.truncate(self.index + 1);
        }
        self.stepped_back = true;
        Ok(())
    }

    /// Approximate completion percentage.
    ///
    /// An estimate only: branching can make it exceed 100 or move
    /// non-monotonically, and it is `None` while no estimate is available.
    pub fn progress_percent(&self) -> Option<f64> {
        let total = self.total_expected?;
        if total == 0 {
            return None;
        }
        Some((self.index + 1) as f64 / total as f64 * 100.0)
    }

    /// Zero-based position of the current question in the walk.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Estimated total questions, when known.
    pub fn total_expected(&self) -> Option<usize> {
        self.total_expected
    }

    /// Question ids visited so far, including the current one.
    pub fn question_sequence(&self) -> &[QuestionId] {
        &self.sequence
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Consume the run, yielding the recorded answers for submission.
    pub fn into_answers(self) -> Vec<Answer> {
        self.answers
    }

    fn estimate(
        survey: &Survey,
        from: &QuestionId,
        referenced: &HashSet<QuestionId>,
        answered: usize,
    ) -> Option<usize> {
        match estimate_remaining(survey, from, referenced) {
            Ok(remaining) => Some(answered + remaining),
            Err(Error::Cycle(at)) => {
                log::warn!("progress estimate hit a cycle at question {at}; total unknown");
                None
            }
            Err(error) => {
                log::warn!("progress estimate failed: {error}");
                None
            }
        }
    }
}
