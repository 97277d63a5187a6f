use serde::{Deserialize, Serialize};

/// Color theme proposed by the generative model
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSuggestion {
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub style: String, // e.g. "futuristic", "minimalist"
}

impl ThemeSuggestion {
    /// Name of the first empty field, if any
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("primaryColor", &self.primary_color),
            ("secondaryColor", &self.secondary_color),
            ("backgroundColor", &self.background_color),
            ("style", &self.style),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Envelope the model is asked to answer with
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ThemeEnvelope {
    pub qr_code_theme: ThemeSuggestion,
}
