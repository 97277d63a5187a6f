use serde::{Deserialize, Serialize};

use crate::models::theme::ThemeSuggestion;
use crate::utils::color::is_svg_safe_color;

pub const DEFAULT_PRIMARY_COLOR: &str = "#1F9481";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
/// Background value standing in for "no background"
pub const TRANSPARENT: &str = "transparent";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    pub primary_color: String,
    pub background_color: String,
}

/// Partial edit coming from the color pickers
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationUpdate {
    pub primary_color: Option<String>,
    pub background_color: Option<String>,
    pub transparent_background: Option<bool>,
}

impl CustomizationUpdate {
    pub fn is_empty(&self) -> bool {
        self.primary_color.is_none()
            && self.background_color.is_none()
            && self.transparent_background.is_none()
    }

    /// First provided color that cannot be rendered, if any
    pub fn invalid_color(&self) -> Option<&str> {
        [&self.primary_color, &self.background_color]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|color| !is_svg_safe_color(color))
    }
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }
}

impl Customization {
    /// Shallow merge; the transparency toggle is applied last.
    pub fn update(&mut self, update: CustomizationUpdate) {
        if let Some(primary) = update.primary_color {
            self.primary_color = primary;
        }
        if let Some(background) = update.background_color {
            self.background_color = background;
        }
        match update.transparent_background {
            Some(true) => self.background_color = TRANSPARENT.to_string(),
            // Unchecking reverts to white, not to the previous color
            Some(false) => self.background_color = DEFAULT_BACKGROUND_COLOR.to_string(),
            None => {}
        }
    }

    /// Overwrites the two consumed colors; secondary color and style are ignored.
    pub fn apply_theme(&mut self, suggestion: &ThemeSuggestion) {
        self.primary_color = suggestion.primary_color.clone();
        self.background_color = suggestion.background_color.clone();
    }

    pub fn is_transparent(&self) -> bool {
        self.background_color.eq_ignore_ascii_case(TRANSPARENT)
    }

    /// Background as the color picker shows it. The transparent marker is not a color.
    pub fn picker_background(&self) -> &str {
        if self.is_transparent() {
            DEFAULT_BACKGROUND_COLOR
        } else {
            &self.background_color
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_startup_colors() {
        let c = Customization::default();
        assert_eq!(c.primary_color, "#1F9481");
        assert_eq!(c.background_color, "#ffffff");
        assert!(!c.is_transparent());
    }

    #[test]
    fn update_merges_only_present_fields() {
        let mut c = Customization::default();
        c.update(CustomizationUpdate {
            primary_color: Some("#000000".into()),
            ..Default::default()
        });
        assert_eq!(c.primary_color, "#000000");
        assert_eq!(c.background_color, "#ffffff");
    }

    #[test]
    fn transparent_toggle_round_trip_reverts_to_white() {
        let mut c = Customization::default();
        c.update(CustomizationUpdate {
            background_color: Some("#ff0000".into()),
            ..Default::default()
        });
        c.update(CustomizationUpdate {
            transparent_background: Some(true),
            ..Default::default()
        });
        assert!(c.is_transparent());
        assert_eq!(c.picker_background(), "#ffffff");

        c.update(CustomizationUpdate {
            transparent_background: Some(false),
            ..Default::default()
        });
        assert_eq!(c.background_color, "#ffffff");
    }

    #[test]
    fn apply_theme_ignores_secondary_and_style() {
        let mut c = Customization::default();
        c.apply_theme(&ThemeSuggestion {
            primary_color: "#0a0a0a".into(),
            secondary_color: "#ff00ff".into(),
            background_color: "#fafafa".into(),
            style: "futuristic".into(),
        });
        assert_eq!(
            c,
            Customization {
                primary_color: "#0a0a0a".into(),
                background_color: "#fafafa".into(),
            }
        );
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(CustomizationUpdate::default().is_empty());
    }
}
