use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{SurveyId, UserId};

/// A respondent registration for one survey.
///
/// Registrations are immutable; the same person may register once per
/// survey, keyed by the `(national_id, hunting_license, survey_id)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub surname: String,
    pub national_id: String,
    pub hunting_license: String,
    pub survey_id: SurveyId,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a registration with a fresh id, stamped now.
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        national_id: impl Into<String>,
        hunting_license: impl Into<String>,
        survey_id: SurveyId,
    ) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            surname: surname.into(),
            national_id: national_id.into(),
            hunting_license: hunting_license.into(),
            survey_id,
            created_at: Utc::now(),
        }
    }
}
