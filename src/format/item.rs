use serde::{Deserialize, Serialize};

/// An action opening a URL in the host's browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlAction {
    pub label: String,
    pub url: String,
}

impl UrlAction {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// One launcher result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub text: String,
    pub subtext: String,
    /// Text the host puts into its input field on tab completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<String>,
    #[serde(default)]
    pub actions: Vec<UrlAction>,
}
