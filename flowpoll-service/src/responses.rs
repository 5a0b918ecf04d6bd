//! Response submission and retrieval.

use flowpoll_store::JsonStore;
use flowpoll_types::{Answer, Error, Response, SurveyId, UserId};

/// All stored responses for one survey.
pub fn load_responses_for(store: &JsonStore, survey_id: &SurveyId) -> Result<Vec<Response>, Error> {
    store.responses_for(survey_id)
}

/// Record a completed walk through a survey.
///
/// One response per `(survey, user)` pair; a second submission is rejected
/// with [`Error::Duplicate`] and the stored one is untouched. The name is
/// snapshotted into the response so later user edits do not rewrite it.
pub fn create_response(
    store: &JsonStore,
    survey_id: &SurveyId,
    user_id: &UserId,
    name: &str,
    surname: &str,
    answers: Vec<Answer>,
) -> Result<Response, Error> {
    let name = name.trim();
    let surname = surname.trim();
    if name.is_empty() || surname.is_empty() {
        return Err(Error::validation("name and surname are required"));
    }
    if answers.is_empty() {
        return Err(Error::validation("a response must answer at least one question"));
    }
    if store.survey(survey_id)?.is_none() {
        return Err(Error::not_found("survey", survey_id.as_str()));
    }

    let existing = store.responses_for(survey_id)?;
    if existing.iter().any(|response| &response.user_id == user_id) {
        return Err(Error::duplicate(format!(
            "user {user_id} already submitted a response for survey {survey_id}"
        )));
    }

    let response = Response::new(survey_id.clone(), user_id.clone(), name, surname, answers);
    store.push_response(&response)?;
    Ok(response)
}
