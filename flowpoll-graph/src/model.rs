//! Shape queries over the question graph.
//!
//! A question is *referenced* when some choice anywhere in the survey points
//! at it. Unreferenced questions form the fallback linear sequence; the
//! entry question is the first of them in list order.

use std::collections::HashSet;

use flowpoll_types::{Question, QuestionId, Survey};

/// The set of question ids targeted by any choice's explicit edge.
pub fn referenced_ids(survey: &Survey) -> HashSet<QuestionId> {
    survey
        .questions
        .iter()
        .flat_map(|question| question.options.iter())
        .filter_map(|choice| choice.next_question_id.clone())
        .collect()
}

/// The question a fresh run starts at.
///
/// Deterministic: the first question in list order that no edge points at.
/// When every question is referenced the first question in list order is
/// used, so a survey mid-edit still yields a usable walk. `None` only for
/// an empty survey.
pub fn entry_question(survey: &Survey) -> Option<&Question> {
    let referenced = referenced_ids(survey);
    entry_question_with(survey, &referenced)
}

pub(crate) fn entry_question_with<'a>(
    survey: &'a Survey,
    referenced: &HashSet<QuestionId>,
) -> Option<&'a Question> {
    survey
        .questions
        .iter()
        .find(|question| !referenced.contains(&question.id))
        .or_else(|| survey.questions.first())
}

/// The fallback question after `after`: the next question strictly later in
/// list order that is not the target of any explicit edge.
pub fn fallback_after<'a>(
    survey: &'a Survey,
    after: &QuestionId,
    referenced: &HashSet<QuestionId>,
) -> Option<&'a Question> {
    let position = survey.position_of(after)?;
    survey.questions[position + 1..]
        .iter()
        .find(|question| !referenced.contains(&question.id))
}
