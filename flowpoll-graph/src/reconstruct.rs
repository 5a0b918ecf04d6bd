//! Replays a completed response against its survey graph.
//!
//! A graph walk does not guarantee visiting every question, and stored
//! responses can reference edges that no longer resolve, so reconstruction
//! runs in two phases: walk the edges actually taken from the entry
//! question, then append every question the walk never reached, in list
//! order. Every question of the survey appears exactly once in the output.

use std::collections::HashSet;

use flowpoll_types::{Question, QuestionId, Response, Survey};

use crate::model::entry_question;

/// One entry of a reconstructed flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode {
    pub question_id: QuestionId,
    pub question_text: String,
    /// Whether the response holds an answer for this question.
    pub answered: bool,
    /// Text of the selected choice, when answered and still resolvable.
    pub answer_text: Option<String>,
    /// The explicit edge the selected choice carried, if any.
    pub next_question_id: Option<QuestionId>,
    /// 1-based position in the displayed flow.
    pub display_index: usize,
}

/// Rebuild the ordered flow a respondent took through `survey`.
pub fn reconstruct_flow(survey: &Survey, response: &Response) -> Vec<FlowNode> {
    let mut flow: Vec<FlowNode> = Vec::with_capacity(survey.len());
    let mut visited: HashSet<QuestionId> = HashSet::new();

    // Phase 1: follow the edges the answers actually took.
    let mut cursor = entry_question(survey).map(|question| question.id.clone());
    while let Some(id) = cursor.take() {
        // Guard against graphs that loop back on themselves.
        if !visited.insert(id.clone()) {
            log::warn!("flow reconstruction revisited question {id}; stopping walk");
            break;
        }
        let Some(question) = survey.question(&id) else {
            break;
        };

        let node = node_for(question, response, flow.len() + 1);
        let next = node.next_question_id.clone();
        let answered = node.answered;
        flow.push(node);

        if !answered {
            break;
        }
        match next {
            Some(target) if survey.question(&target).is_some() => cursor = Some(target),
            Some(target) => {
                log::warn!("flow reconstruction hit missing question {target}; stopping walk");
            }
            None => {}
        }
    }

    // Phase 2: append everything the walk never reached, in list order.
    for question in &survey.questions {
        if visited.contains(&question.id) {
            continue;
        }
        flow.push(node_for(question, response, flow.len() + 1));
    }

    flow
}

fn node_for(question: &Question, response: &Response, display_index: usize) -> FlowNode {
    let answer = response.answer_for(&question.id);
    let selected = answer.and_then(|answer| question.choice(&answer.option_id));
    FlowNode {
        question_id: question.id.clone(),
        question_text: question.text.clone(),
        answered: answer.is_some(),
        answer_text: selected.map(|choice| choice.text.clone()),
        next_question_id: selected.and_then(|choice| choice.next_question_id.clone()),
        display_index,
    }
}
