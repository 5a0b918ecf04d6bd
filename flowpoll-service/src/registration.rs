//! Respondent registration.
//!
//! A person registers once per survey. Identity is the
//! `(national_id, hunting_license, survey_id)` triple, so the same person
//! can take part in several surveys but never twice in the same one.

use flowpoll_store::JsonStore;
use flowpoll_types::{Error, SurveyId, User, UserId};

/// Register a respondent for a survey.
pub fn create_user(
    store: &JsonStore,
    name: &str,
    surname: &str,
    national_id: &str,
    hunting_license: &str,
    survey_id: &SurveyId,
) -> Result<User, Error> {
    let name = format_name(name);
    let surname = format_name(surname);
    let national_id = national_id.trim();
    let hunting_license = hunting_license.trim();

    if name.is_empty() || surname.is_empty() {
        return Err(Error::validation("name and surname are required"));
    }
    if national_id.is_empty() || hunting_license.is_empty() {
        return Err(Error::validation(
            "national id and hunting license are required",
        ));
    }
    if !national_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::validation("national id must contain digits only"));
    }
    if store.survey(survey_id)?.is_none() {
        return Err(Error::not_found("survey", survey_id.as_str()));
    }

    let users = store.users()?;
    let already = users.iter().any(|user| {
        user.national_id == national_id
            && user.hunting_license == hunting_license
            && &user.survey_id == survey_id
    });
    if already {
        return Err(Error::duplicate(format!(
            "identity already registered for survey {survey_id}"
        )));
    }

    let user = User::new(name, surname, national_id, hunting_license, survey_id.clone());
    store.push_user(&user)?;
    Ok(user)
}

/// Load a registration or fail with [`Error::NotFound`].
pub fn load_user(store: &JsonStore, id: &UserId) -> Result<User, Error> {
    store
        .user(id)?
        .ok_or_else(|| Error::not_found("user", id.as_str()))
}

/// Normalize a display name: trim, then titlecase each word.
fn format_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
