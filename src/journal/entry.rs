use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Challenge, Difficulty, GrowthArea};

/// One completed challenge. Title, area, and difficulty are denormalized so
/// history display and replay keep working if the catalog changes underneath.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletionEntry {
    pub challenge_id: String,
    pub title: String,
    pub area: GrowthArea,
    pub difficulty: Difficulty,
    pub xp_awarded: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub pack_id: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl CompletionEntry {
    pub fn new(challenge: &Challenge, xp_awarded: u64, pack_id: Option<String>) -> Self {
        Self {
            challenge_id: challenge.id.clone(),
            title: challenge.title.clone(),
            area: challenge.area,
            difficulty: challenge.difficulty,
            xp_awarded,
            timestamp: Utc::now(),
            pack_id,
            note: None,
        }
    }

    /// Local calendar day of the completion, for streak math.
    pub fn day(&self) -> chrono::NaiveDate {
        self.timestamp.date_naive()
    }
}
