use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::catalog::GrowthArea;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Completions per day the dashboard counts toward "today's goal".
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,
    /// How many challenges the daily suggestion list offers.
    #[serde(default = "default_suggestion_count")]
    pub suggestion_count: usize,
    /// Growth-area keys drawn first when suggesting; empty means no bias.
    #[serde(default)]
    pub focus_areas: Vec<String>,
}

fn default_theme() -> String {
    "dusk".to_string()
}
fn default_daily_goal() -> u32 {
    3
}
fn default_suggestion_count() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            daily_goal: default_daily_goal(),
            suggestion_count: default_suggestion_count(),
            focus_areas: Vec::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ascend")
            .join("config.toml")
    }

    /// Clamp numeric fields and drop focus keys that name no growth area.
    /// Call after deserialization to absorb stale or hand-edited configs.
    pub fn normalize(&mut self) {
        self.daily_goal = self.daily_goal.clamp(1, 10);
        self.suggestion_count = self.suggestion_count.clamp(3, 10);
        self.focus_areas
            .retain(|key| GrowthArea::from_key(key).is_some());
        self.focus_areas.dedup();
    }

    pub fn focus_areas(&self) -> Vec<GrowthArea> {
        self.focus_areas
            .iter()
            .filter_map(|key| GrowthArea::from_key(key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "dusk");
        assert_eq!(config.daily_goal, 3);
        assert_eq!(config.suggestion_count, 5);
        assert!(config.focus_areas.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_the_rest() {
        let config: Config = toml::from_str(
            r#"
theme = "paper"
focus_areas = ["mindfulness"]
"#,
        )
        .unwrap();
        assert_eq!(config.theme, "paper");
        assert_eq!(config.focus_areas, vec!["mindfulness"]);
        assert_eq!(config.daily_goal, 3);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut config = Config::default();
        config.focus_areas = vec!["vitality".to_string(), "discipline".to_string()];
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.focus_areas, deserialized.focus_areas);
        assert_eq!(config.daily_goal, deserialized.daily_goal);
    }

    #[test]
    fn test_normalize_clamps_and_filters() {
        let mut config = Config {
            theme: "dusk".to_string(),
            daily_goal: 0,
            suggestion_count: 999,
            focus_areas: vec![
                "mindfulness".to_string(),
                "wizardry".to_string(),
                "vitality".to_string(),
            ],
        };
        config.normalize();
        assert_eq!(config.daily_goal, 1);
        assert_eq!(config.suggestion_count, 10);
        assert_eq!(config.focus_areas, vec!["mindfulness", "vitality"]);
    }

    #[test]
    fn test_focus_areas_resolve_to_enum() {
        let mut config = Config::default();
        config.focus_areas = vec!["confidence".to_string()];
        assert_eq!(config.focus_areas(), vec![GrowthArea::Confidence]);
    }
}
