use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares an opaque string identifier newtype.
///
/// Ids are serialized transparently so the on-disk JSON matches the flat
/// string ids the data files use.
macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a survey.
    SurveyId
);
string_id!(
    /// Identifier of a question, unique within its survey.
    QuestionId
);
string_id!(
    /// Identifier of a choice, unique within its question.
    ChoiceId
);
string_id!(
    /// Identifier of a completed response.
    ResponseId
);
string_id!(
    /// Identifier of a registered respondent.
    UserId
);
