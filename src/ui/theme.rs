use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_dim: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl Theme {
    /// User themes dir first, bundled themes second.
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("ascend")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                if let Ok(theme) = toml::from_str::<Theme>(content) {
                    return Some(theme);
                }
            }
        }

        None
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("dusk").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1b1b26".to_string(),
            fg: "#d5d8e8".to_string(),
            text_dim: "#5a5e78".to_string(),
            accent: "#8fb7f0".to_string(),
            accent_dim: "#41455e".to_string(),
            border: "#41455e".to_string(),
            border_focused: "#8fb7f0".to_string(),
            header_bg: "#2b2d3f".to_string(),
            header_fg: "#d5d8e8".to_string(),
            bar_filled: "#8fb7f0".to_string(),
            bar_empty: "#2b2d3f".to_string(),
            success: "#a3dba0".to_string(),
            warning: "#ebd396".to_string(),
            error: "#ef93a5".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color {
        Self::parse_color(&self.bg)
    }
    pub fn fg(&self) -> Color {
        Self::parse_color(&self.fg)
    }
    pub fn text_dim(&self) -> Color {
        Self::parse_color(&self.text_dim)
    }
    pub fn accent(&self) -> Color {
        Self::parse_color(&self.accent)
    }
    pub fn accent_dim(&self) -> Color {
        Self::parse_color(&self.accent_dim)
    }
    pub fn border(&self) -> Color {
        Self::parse_color(&self.border)
    }
    pub fn border_focused(&self) -> Color {
        Self::parse_color(&self.border_focused)
    }
    pub fn header_bg(&self) -> Color {
        Self::parse_color(&self.header_bg)
    }
    pub fn header_fg(&self) -> Color {
        Self::parse_color(&self.header_fg)
    }
    pub fn bar_filled(&self) -> Color {
        Self::parse_color(&self.bar_filled)
    }
    pub fn bar_empty(&self) -> Color {
        Self::parse_color(&self.bar_empty)
    }
    pub fn success(&self) -> Color {
        Self::parse_color(&self.success)
    }
    pub fn warning(&self) -> Color {
        Self::parse_color(&self.warning)
    }
    pub fn error(&self) -> Color {
        Self::parse_color(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_themes_parse() {
        let names = Theme::available_themes();
        assert!(names.contains(&"dusk".to_string()));
        for name in names {
            assert!(Theme::load(&name).is_some(), "theme {name} failed to load");
        }
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(
            ThemeColors::parse_color("#ff0080"),
            Color::Rgb(255, 0, 128)
        );
        assert_eq!(ThemeColors::parse_color("garbage"), Color::White);
    }
}
