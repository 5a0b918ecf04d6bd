//! Survey lifecycle: load, save with the edit lock, delete.

use chrono::Utc;

use flowpoll_graph::builder;
use flowpoll_store::JsonStore;
use flowpoll_types::{Error, Survey, SurveyId};

/// Load a survey or fail with [`Error::NotFound`].
pub fn load_survey(store: &JsonStore, id: &SurveyId) -> Result<Survey, Error> {
    store
        .survey(id)?
        .ok_or_else(|| Error::not_found("survey", id.as_str()))
}

/// Validate and persist a survey.
///
/// A survey that already has responses is frozen: editing it would
/// invalidate the stored answers, so the save is rejected with
/// [`Error::EditLocked`]. The lock is checked before validation; a locked
/// survey reports the lock no matter what the payload looks like. On an
/// update the original `created_at` is kept and only `updated_at` is
/// stamped.
pub fn save_survey(store: &JsonStore, mut survey: Survey) -> Result<Survey, Error> {
    if !store.responses_for(&survey.id)?.is_empty() {
        return Err(Error::EditLocked(survey.id));
    }

    builder::validate(&survey)?;

    if let Some(existing) = store.survey(&survey.id)? {
        survey.created_at = existing.created_at;
    }
    survey.updated_at = Utc::now();

    store.put_survey(&survey)?;
    Ok(survey)
}

/// Delete a survey. Its responses are left in place; they keep their own
/// snapshot of everything needed for display.
pub fn delete_survey(store: &JsonStore, id: &SurveyId) -> Result<(), Error> {
    if !store.remove_survey(id)? {
        return Err(Error::not_found("survey", id.as_str()));
    }
    Ok(())
}
