use serde::{Deserialize, Serialize};

/// The whole application state, seeded by the caller of `boot`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub count: i64,
    pub loading: bool,
    pub profile: Option<Profile>,
    /// Last failure reported by the profile service.
    pub error: Option<String>,
    pub greeting: Option<String>,
    pub welcomed: bool,
}

/// A user profile as returned by the profile service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
}

impl Profile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
