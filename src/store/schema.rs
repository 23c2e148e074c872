use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::pack::PackProgress;
use crate::config::Config;
use crate::journal::entry::CompletionEntry;

const SCHEMA_VERSION: u32 = 1;

/// Journal cap. Bounds replay cost after a delete; XP accumulation itself is
/// unaffected because totals live in the profile.
pub const JOURNAL_LIMIT: usize = 1000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileData {
    pub schema_version: u32,
    pub total_xp: i64,
    pub total_completions: u32,
    pub streak_days: u32,
    pub best_streak: u32,
    pub last_entry_date: Option<String>,
    pub packs: HashMap<String, PackProgress>,
    /// Badge key -> when it was earned.
    pub badges: HashMap<String, DateTime<Utc>>,
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            total_xp: 0,
            total_completions: 0,
            streak_days: 0,
            best_streak: 0,
            last_entry_date: None,
            packs: HashMap::new(),
            badges: HashMap::new(),
        }
    }
}

impl ProfileData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JournalData {
    pub schema_version: u32,
    pub entries: Vec<CompletionEntry>,
}

impl Default for JournalData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            entries: Vec::new(),
        }
    }
}

pub const EXPORT_VERSION: u32 = 1;

/// Whole-profile export. The journal is the source of truth for rebuilds;
/// derived state (level, badge eligibility) is recomputed on import, never
/// shipped separately.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportData {
    pub ascend_export_version: u32,
    pub exported_at: DateTime<Utc>,
    pub config: Config,
    pub profile: ProfileData,
    pub journal: JournalData,
}
