pub mod pack;
pub mod suggest;

use std::collections::HashMap;
use std::fs;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::catalog::pack::Pack;

// --- Growth areas ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthArea {
    Confidence,
    Mindfulness,
    Discipline,
    Connection,
    Vitality,
    Creativity,
}

impl GrowthArea {
    pub fn to_key(self) -> &'static str {
        match self {
            GrowthArea::Confidence => "confidence",
            GrowthArea::Mindfulness => "mindfulness",
            GrowthArea::Discipline => "discipline",
            GrowthArea::Connection => "connection",
            GrowthArea::Vitality => "vitality",
            GrowthArea::Creativity => "creativity",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "confidence" => Some(GrowthArea::Confidence),
            "mindfulness" => Some(GrowthArea::Mindfulness),
            "discipline" => Some(GrowthArea::Discipline),
            "connection" => Some(GrowthArea::Connection),
            "vitality" => Some(GrowthArea::Vitality),
            "creativity" => Some(GrowthArea::Creativity),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GrowthArea::Confidence => "Confidence",
            GrowthArea::Mindfulness => "Mindfulness",
            GrowthArea::Discipline => "Discipline",
            GrowthArea::Connection => "Connection",
            GrowthArea::Vitality => "Vitality",
            GrowthArea::Creativity => "Creativity",
        }
    }

    pub fn all() -> &'static [GrowthArea] {
        &[
            GrowthArea::Confidence,
            GrowthArea::Mindfulness,
            GrowthArea::Discipline,
            GrowthArea::Connection,
            GrowthArea::Vitality,
            GrowthArea::Creativity,
        ]
    }
}

// --- Difficulty ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Light,
    Steady,
    Bold,
}

impl Difficulty {
    pub fn base_xp(self) -> u64 {
        match self {
            Difficulty::Light => 20,
            Difficulty::Steady => 35,
            Difficulty::Bold => 60,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Light => "Light",
            Difficulty::Steady => "Steady",
            Difficulty::Bold => "Bold",
        }
    }
}

// --- Challenges ---

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub area: GrowthArea,
    pub difficulty: Difficulty,
    pub prompt: String,
}

/// On-disk shape of a catalog file (embedded or user-provided).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub challenges: Vec<Challenge>,
    #[serde(default)]
    pub packs: Vec<Pack>,
}

#[derive(Embed)]
#[folder = "assets/catalog/"]
struct CatalogAssets;

pub struct Catalog {
    challenges: Vec<Challenge>,
    packs: Vec<Pack>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Load the user catalog if present and parseable, otherwise the
    /// embedded one. A malformed user file falls back rather than erroring:
    /// the app must always come up with a usable challenge set.
    pub fn load() -> Self {
        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("ascend").join("catalog.json");
            if let Ok(content) = fs::read_to_string(&user_path) {
                if let Ok(file) = serde_json::from_str::<CatalogFile>(&content) {
                    return Self::from_file(file);
                }
            }
        }
        Self::builtin()
    }

    pub fn builtin() -> Self {
        let file = CatalogAssets::get("core.json")
            .and_then(|f| serde_json::from_slice::<CatalogFile>(f.data.as_ref()).ok())
            .unwrap_or_default();
        Self::from_file(file)
    }

    /// Drop entries with empty or duplicate ids (first definition wins),
    /// and prune pack references to challenges that don't exist.
    pub fn from_file(file: CatalogFile) -> Self {
        let mut challenges: Vec<Challenge> = Vec::new();
        let mut by_id = HashMap::new();
        for challenge in file.challenges {
            if challenge.id.is_empty() || by_id.contains_key(&challenge.id) {
                continue;
            }
            by_id.insert(challenge.id.clone(), challenges.len());
            challenges.push(challenge);
        }

        let mut packs: Vec<Pack> = Vec::new();
        for mut pack in file.packs {
            if pack.id.is_empty() || packs.iter().any(|p| p.id == pack.id) {
                continue;
            }
            pack.challenge_ids.retain(|id| by_id.contains_key(id));
            if !pack.challenge_ids.is_empty() {
                packs.push(pack);
            }
        }

        Self {
            challenges,
            packs,
            by_id,
        }
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    pub fn get(&self, id: &str) -> Option<&Challenge> {
        self.by_id.get(id).map(|&i| &self.challenges[i])
    }

    pub fn pack(&self, id: &str) -> Option<&Pack> {
        self.packs.iter().find(|p| p.id == id)
    }

    /// Pack (if any) that lists the given challenge.
    pub fn pack_containing(&self, challenge_id: &str) -> Option<&Pack> {
        self.packs
            .iter()
            .find(|p| p.challenge_ids.iter().any(|id| id == challenge_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin();
        assert!(!catalog.challenges().is_empty());
        assert!(!catalog.packs().is_empty());
    }

    #[test]
    fn test_builtin_ids_resolve() {
        let catalog = Catalog::builtin();
        for challenge in catalog.challenges() {
            assert_eq!(catalog.get(&challenge.id).unwrap().id, challenge.id);
        }
        for pack in catalog.packs() {
            for id in &pack.challenge_ids {
                assert!(catalog.get(id).is_some(), "pack {} references missing {id}", pack.id);
            }
        }
    }

    #[test]
    fn test_duplicate_and_empty_ids_dropped() {
        let file: CatalogFile = serde_json::from_str(
            r#"{
                "challenges": [
                    {"id": "a", "title": "A", "area": "confidence", "difficulty": "light", "prompt": "one"},
                    {"id": "a", "title": "A again", "area": "vitality", "difficulty": "bold", "prompt": "two"},
                    {"id": "", "title": "Nameless", "area": "vitality", "difficulty": "bold", "prompt": "three"}
                ]
            }"#,
        )
        .unwrap();
        let catalog = Catalog::from_file(file);
        assert_eq!(catalog.challenges().len(), 1);
        assert_eq!(catalog.get("a").unwrap().title, "A");
    }

    #[test]
    fn test_pack_missing_references_pruned() {
        let file: CatalogFile = serde_json::from_str(
            r#"{
                "challenges": [
                    {"id": "a", "title": "A", "area": "confidence", "difficulty": "light", "prompt": "one"}
                ],
                "packs": [
                    {"id": "p", "name": "P", "description": "", "challenge_ids": ["a", "ghost"]},
                    {"id": "empty", "name": "E", "description": "", "challenge_ids": ["ghost"]}
                ]
            }"#,
        )
        .unwrap();
        let catalog = Catalog::from_file(file);
        assert_eq!(catalog.packs().len(), 1);
        assert_eq!(catalog.pack("p").unwrap().challenge_ids, vec!["a"]);
        assert!(catalog.pack("empty").is_none());
    }

    #[test]
    fn test_unknown_area_key_fails_parse() {
        let result = serde_json::from_str::<Challenge>(
            r#"{"id": "x", "title": "X", "area": "wizardry", "difficulty": "light", "prompt": ""}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_area_key_round_trip() {
        for &area in GrowthArea::all() {
            assert_eq!(GrowthArea::from_key(area.to_key()), Some(area));
        }
        assert_eq!(GrowthArea::from_key("wizardry"), None);
    }
}
