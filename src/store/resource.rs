use serde::Serialize;

/// Load state of one logical resource (a genre bucket, the search results,
/// one show's episodes, one show's details).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum Resource {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

impl Resource {
    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Resource::Error(message) => Some(message),
            _ => None,
        }
    }
}
