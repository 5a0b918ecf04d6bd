//! Authoring mutations over the question graph.
//!
//! Every mutation keeps the graph referentially intact: removing a question
//! clears every edge that pointed at it, edits rebuild the derived
//! next-question map, and [`validate`] is the gate a survey must pass
//! before it is persisted.

use std::collections::{HashMap, HashSet};

use flowpoll_types::{Choice, ChoiceId, Error, Question, QuestionId, Survey};

use crate::model::{fallback_after, referenced_ids};

/// Authoring input for one choice.
#[derive(Debug, Clone)]
pub struct ChoiceSpec {
    pub text: String,
    pub next_question_id: Option<QuestionId>,
}

impl ChoiceSpec {
    /// A choice that ends the survey (no explicit edge).
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_question_id: None,
        }
    }

    /// A choice with an explicit edge to `next`.
    pub fn leading_to(text: impl Into<String>, next: QuestionId) -> Self {
        Self {
            text: text.into(),
            next_question_id: Some(next),
        }
    }
}

/// Authoring input for one question.
#[derive(Debug, Clone)]
pub struct QuestionSpec {
    pub text: String,
    pub options: Vec<ChoiceSpec>,
}

impl QuestionSpec {
    pub fn new(text: impl Into<String>, options: Vec<ChoiceSpec>) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }
}

/// Append a new question built from `spec`. Returns the fresh id.
///
/// Rejected when the prompt is blank, no choices are given, any choice text
/// is blank after trimming, or an edge targets a question that does not
/// exist in this survey.
pub fn add_question(survey: &mut Survey, spec: QuestionSpec) -> Result<QuestionId, Error> {
    let question = build_question(survey, QuestionId::generate(), spec, None)?;
    let id = question.id.clone();
    survey.questions.push(question);
    Ok(id)
}

/// Replace the question `id` with one built from `spec`, preserving the id
/// and its position in the fallback sequence. Choices whose text survives
/// the edit keep their ids, so answers and in-flight runs stay addressable.
pub fn edit_question(survey: &mut Survey, id: &QuestionId, spec: QuestionSpec) -> Result<(), Error> {
    let position = survey
        .position_of(id)
        .ok_or_else(|| Error::not_found("question", id.as_str()))?;
    let previous = survey.questions[position].clone();
    let question = build_question(survey, id.clone(), spec, Some(&previous))?;
    survey.questions[position] = question;
    Ok(())
}

/// Delete the question `id` and repair the graph: every remaining choice
/// whose edge pointed at the removed question has that edge cleared.
pub fn remove_question(survey: &mut Survey, id: &QuestionId) -> Result<(), Error> {
    let position = survey
        .position_of(id)
        .ok_or_else(|| Error::not_found("question", id.as_str()))?;
    survey.questions.remove(position);

    let mut repaired = 0;
    for question in &mut survey.questions {
        let mut changed = false;
        for choice in &mut question.options {
            if choice.next_question_id.as_ref() == Some(id) {
                choice.next_question_id = None;
                changed = true;
                repaired += 1;
            }
        }
        if changed {
            question.rebuild_next_map();
        }
    }
    if repaired > 0 {
        log::info!("removed question {id}, cleared {repaired} edge(s) pointing at it");
    }
    Ok(())
}

/// Move the question `id` to `new_index` in the fallback sequence.
///
/// Repositioning never touches explicit edges; they are order-independent.
pub fn reorder_question(
    survey: &mut Survey,
    id: &QuestionId,
    new_index: usize,
) -> Result<(), Error> {
    let position = survey
        .position_of(id)
        .ok_or_else(|| Error::not_found("question", id.as_str()))?;
    if new_index >= survey.questions.len() {
        return Err(Error::validation(format!(
            "position {new_index} is out of range for {} questions",
            survey.questions.len()
        )));
    }
    let question = survey.questions.remove(position);
    survey.questions.insert(new_index, question);
    Ok(())
}

/// Full structural validation, the gate before a survey is persisted.
///
/// Checks, in order: non-blank title/description, at least one question,
/// unique question ids, per-question invariants (blank prompts or choice
/// texts, empty choice lists, duplicate choice ids, a stale derived map),
/// no dangling edges, and termination of the edge + fallback relation.
pub fn validate(survey: &Survey) -> Result<(), Error> {
    if survey.title.trim().is_empty() {
        return Err(Error::validation("survey title must not be empty"));
    }
    if survey.description.trim().is_empty() {
        return Err(Error::validation("survey description must not be empty"));
    }
    if survey.questions.is_empty() {
        return Err(Error::validation("survey must contain at least one question"));
    }

    let mut seen = HashSet::new();
    for question in &survey.questions {
        if !seen.insert(&question.id) {
            return Err(Error::validation(format!(
                "duplicate question id {}",
                question.id
            )));
        }
        validate_question(question)?;
    }

    for question in &survey.questions {
        for choice in &question.options {
            if let Some(target) = &choice.next_question_id {
                if survey.question(target).is_none() {
                    return Err(Error::validation(format!(
                        "choice '{}' of question {} references missing question {target}",
                        choice.text, question.id
                    )));
                }
            }
        }
    }

    validate_acyclic(survey)
}

fn validate_question(question: &Question) -> Result<(), Error> {
    if question.text.trim().is_empty() {
        return Err(Error::validation("question text must not be empty"));
    }
    if question.options.is_empty() {
        return Err(Error::validation(format!(
            "question {} must have at least one choice",
            question.id
        )));
    }
    let mut seen = HashSet::new();
    for choice in &question.options {
        if choice.text.trim().is_empty() {
            return Err(Error::validation(format!(
                "question {} has a choice with empty text",
                question.id
            )));
        }
        if !seen.insert(&choice.id) {
            return Err(Error::validation(format!(
                "question {} has duplicate choice id {}",
                question.id, choice.id
            )));
        }
    }
    if !question.next_map_in_sync() {
        return Err(Error::validation(format!(
            "question {} has a stale next-question map",
            question.id
        )));
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    OnPath,
    Done,
}

/// Depth-first search over explicit edges plus the fallback edge from each
/// question. Fallback edges always move forward in list order, so any cycle
/// involves an explicit back edge; the search still follows both so a loop
/// through a mixed path is caught.
fn validate_acyclic(survey: &Survey) -> Result<(), Error> {
    let referenced = referenced_ids(survey);
    let mut marks: HashMap<QuestionId, Mark> = HashMap::new();
    for question in &survey.questions {
        visit(survey, &referenced, &question.id, &mut marks)?;
    }
    Ok(())
}

fn visit(
    survey: &Survey,
    referenced: &HashSet<QuestionId>,
    id: &QuestionId,
    marks: &mut HashMap<QuestionId, Mark>,
) -> Result<(), Error> {
    match marks.get(id) {
        Some(Mark::OnPath) => return Err(Error::Cycle(id.clone())),
        Some(Mark::Done) => return Ok(()),
        None => {}
    }
    marks.insert(id.clone(), Mark::OnPath);

    if let Some(question) = survey.question(id) {
        for choice in &question.options {
            if let Some(target) = &choice.next_question_id {
                if survey.question(target).is_some() {
                    visit(survey, referenced, target, marks)?;
                }
            }
        }
        if let Some(next) = fallback_after(survey, id, referenced) {
            let next_id = next.id.clone();
            visit(survey, referenced, &next_id, marks)?;
        }
    }

    marks.insert(id.clone(), Mark::Done);
    Ok(())
}

fn build_question(
    survey: &Survey,
    id: QuestionId,
    spec: QuestionSpec,
    previous: Option<&Question>,
) -> Result<Question, Error> {
    let text = spec.text.trim().to_owned();
    if text.is_empty() {
        return Err(Error::validation("question text must not be empty"));
    }
    if spec.options.is_empty() {
        return Err(Error::validation("question must have at least one choice"));
    }

    let mut reused: HashSet<&ChoiceId> = HashSet::new();
    let mut choices = Vec::with_capacity(spec.options.len());
    for option in spec.options {
        let choice_text = option.text.trim().to_owned();
        if choice_text.is_empty() {
            return Err(Error::validation("choice text must not be empty"));
        }
        if let Some(target) = &option.next_question_id {
            if target == &id {
                return Err(Error::validation(format!(
                    "question {id} cannot reference itself"
                )));
            }
            if survey.question(target).is_none() {
                return Err(Error::validation(format!(
                    "choice '{choice_text}' references missing question {target}"
                )));
            }
        }
        // A choice whose text survives the edit keeps its id; recorded
        // answers and in-flight runs keep resolving it.
        let survivor = previous.and_then(|question| {
            question
                .options
                .iter()
                .find(|choice| choice.text == choice_text && !reused.contains(&choice.id))
        });
        let choice_id = match survivor {
            Some(choice) => {
                reused.insert(&choice.id);
                choice.id.clone()
            }
            None => ChoiceId::generate(),
        };
        choices.push(Choice {
            id: choice_id,
            text: choice_text,
            next_question_id: option.next_question_id,
        });
    }

    Ok(Question::with_id(id, text, choices))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> Survey {
        let mut survey = Survey::new("Draft", "builder fixture", Vec::new());
        for text in ["Q1", "Q2", "Q3"] {
            add_question(
                &mut survey,
                QuestionSpec::new(text, vec![ChoiceSpec::new("yes"), ChoiceSpec::new("no")]),
            )
            .unwrap();
        }
        survey
    }

    #[test]
    fn add_rejects_blank_input() {
        let mut survey = draft();
        assert!(
            add_question(&mut survey, QuestionSpec::new("  ", vec![ChoiceSpec::new("a")]))
                .unwrap_err()
                .is_validation()
        );
        assert!(
            add_question(&mut survey, QuestionSpec::new("Q4", vec![]))
                .unwrap_err()
                .is_validation()
        );
        assert!(
            add_question(&mut survey, QuestionSpec::new("Q4", vec![ChoiceSpec::new(" ")]))
                .unwrap_err()
                .is_validation()
        );
        assert_eq!(survey.len(), 3);
    }

    #[test]
    fn add_rejects_edge_to_missing_question() {
        let mut survey = draft();
        let err = add_question(
            &mut survey,
            QuestionSpec::new(
                "Q4",
                vec![ChoiceSpec::leading_to("jump", QuestionId::generate())],
            ),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn edit_preserves_id_and_position() {
        let mut survey = draft();
        let q2 = survey.questions[1].id.clone();
        edit_question(
            &mut survey,
            &q2,
            QuestionSpec::new("Q2 reworded", vec![ChoiceSpec::new("maybe")]),
        )
        .unwrap();

        assert_eq!(survey.questions[1].id, q2);
        assert_eq!(survey.questions[1].text, "Q2 reworded");
        assert_eq!(survey.questions[1].options.len(), 1);
        assert!(survey.questions[1].next_map_in_sync());
    }

    #[test]
    fn edit_keeps_ids_of_surviving_choices() {
        let mut survey = draft();
        let q1 = survey.questions[0].id.clone();
        let yes = survey.questions[0].options[0].id.clone();
        let no = survey.questions[0].options[1].id.clone();

        // Reword the prompt and swap one choice; the surviving choice and
        // its edge addressing must not churn.
        edit_question(
            &mut survey,
            &q1,
            QuestionSpec::new(
                "Q1 reworded",
                vec![ChoiceSpec::new("yes"), ChoiceSpec::new("unsure")],
            ),
        )
        .unwrap();

        assert_eq!(survey.questions[0].options[0].id, yes);
        assert_ne!(survey.questions[0].options[1].id, no);
        assert!(survey.questions[0].next_map_in_sync());
    }

    #[test]
    fn remove_clears_edges_pointing_at_removed_question() {
        let mut survey = draft();
        let q2 = survey.questions[1].id.clone();
        let q1 = survey.questions[0].id.clone();
        edit_question(
            &mut survey,
            &q1,
            QuestionSpec::new(
                "Q1",
                vec![ChoiceSpec::leading_to("skip ahead", q2.clone()), ChoiceSpec::new("no")],
            ),
        )
        .unwrap();

        remove_question(&mut survey, &q2).unwrap();

        assert_eq!(survey.len(), 2);
        for question in &survey.questions {
            for choice in &question.options {
                assert_ne!(choice.next_question_id.as_ref(), Some(&q2));
            }
            assert!(question.next_map_in_sync());
        }
    }

    #[test]
    fn remove_missing_question_is_not_found() {
        let mut survey = draft();
        let err = remove_question(&mut survey, &QuestionId::generate()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn reorder_moves_without_touching_edges() {
        let mut survey = draft();
        let q3 = survey.questions[2].id.clone();
        let q1 = survey.questions[0].id.clone();
        edit_question(
            &mut survey,
            &q1,
            QuestionSpec::new("Q1", vec![ChoiceSpec::leading_to("jump", q3.clone())]),
        )
        .unwrap();

        let last = survey.questions[2].id.clone();
        reorder_question(&mut survey, &last, 0).unwrap();

        assert_eq!(survey.questions[0].id, last);
        let moved_q1 = survey.question(&q1).unwrap();
        assert_eq!(
            moved_q1.options[0].next_question_id.as_ref(),
            Some(&q3),
            "explicit edges are order-independent"
        );
    }

    #[test]
    fn reorder_out_of_range_is_rejected() {
        let mut survey = draft();
        let q1 = survey.questions[0].id.clone();
        assert!(reorder_question(&mut survey, &q1, 7).unwrap_err().is_validation());
    }

    #[test]
    fn validate_accepts_a_well_formed_survey() {
        let survey = draft();
        validate(&survey).unwrap();
    }

    #[test]
    fn validate_rejects_dangling_edge() {
        let mut survey = draft();
        survey.questions[0].options[0].next_question_id = Some(QuestionId::generate());
        survey.questions[0].rebuild_next_map();
        assert!(validate(&survey).unwrap_err().is_validation());
    }

    #[test]
    fn validate_rejects_stale_next_map() {
        let mut survey = draft();
        let q2 = survey.questions[1].id.clone();
        // Mutate the edge without rebuilding the derived map.
        survey.questions[0].options[0].next_question_id = Some(q2);
        assert!(validate(&survey).unwrap_err().is_validation());
    }

    #[test]
    fn validate_rejects_cycles() {
        let mut survey = draft();
        let q1 = survey.questions[0].id.clone();
        let q2 = survey.questions[1].id.clone();
        survey.questions[0].options[0].next_question_id = Some(q2);
        survey.questions[0].rebuild_next_map();
        survey.questions[1].options[0].next_question_id = Some(q1);
        survey.questions[1].rebuild_next_map();

        assert!(validate(&survey).unwrap_err().is_cycle());
    }

    #[test]
    fn validate_rejects_blank_title() {
        let mut survey = draft();
        survey.title = "   ".into();
        assert!(validate(&survey).unwrap_err().is_validation());
    }
}
