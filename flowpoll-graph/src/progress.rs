//! Remaining-path estimation.
//!
//! Branching makes the total number of questions path-dependent, so the
//! progress shown to a respondent is an estimate: the depth of the longest
//! explicit branch from the current question, compared against the length
//! of the fallback chain, whichever is larger. The estimate is recomputed
//! on every transition and may shrink or grow as branches are taken.

use std::collections::HashSet;

use flowpoll_types::{Error, QuestionId, Survey};

use crate::model::fallback_after;

/// Number of questions expected from `from` to the end of the survey,
/// counting `from` itself.
///
/// Recursion over the explicit edges carries the current path as a visited
/// set; revisiting a question on the same path means the graph loops and
/// the estimate is abandoned with [`Error::Cycle`]. Callers degrade that to
/// an "unknown progress" sentinel rather than failing the whole request.
pub fn estimate_remaining(
    survey: &Survey,
    from: &QuestionId,
    referenced: &HashSet<QuestionId>,
) -> Result<usize, Error> {
    let mut path = HashSet::new();
    estimate(survey, from, referenced, &mut path)
}

fn estimate(
    survey: &Survey,
    from: &QuestionId,
    referenced: &HashSet<QuestionId>,
    path: &mut HashSet<QuestionId>,
) -> Result<usize, Error> {
    if !path.insert(from.clone()) {
        return Err(Error::Cycle(from.clone()));
    }

    let Some(question) = survey.question(from) else {
        // Dangling reference: contributes nothing beyond the caller's hop.
        path.remove(from);
        return Ok(0);
    };

    let mut total = 1;

    // Longest explicit branch.
    for choice in &question.options {
        if let Some(target) = &choice.next_question_id {
            if survey.question(target).is_none() {
                log::warn!("choice {} points at missing question {target}", choice.id);
                continue;
            }
            let branch = estimate(survey, target, referenced, path)?;
            total = total.max(1 + branch);
        }
    }

    // Fallback chain: successive unreferenced questions in list order.
    let mut chain = 0;
    let mut cursor = from.clone();
    while let Some(next) = fallback_after(survey, &cursor, referenced) {
        chain += 1;
        cursor = next.id.clone();
    }
    total = total.max(1 + chain);

    path.remove(from);
    Ok(total)
}
