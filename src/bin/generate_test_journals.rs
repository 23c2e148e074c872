//! Generates synthetic export files under test-journals/ for manually
//! exercising the UI at different progression stages:
//!
//!   cargo run --bin generate_test_journals
//!   cargo run -- --data-dir /tmp/ascend-test --import test-journals/03-pack-finisher.json

use std::collections::HashSet;
use std::fs;

use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use ascend::catalog::Catalog;
use ascend::config::Config;
use ascend::engine::xp;
use ascend::journal::entry::CompletionEntry;
use ascend::journal::replay::replay;
use ascend::store::schema::{EXPORT_VERSION, ExportData, JournalData, ProfileData};

/// Deterministic completion entry n days after the epoch start.
fn entry_on_day(
    catalog: &Catalog,
    rng: &mut SmallRng,
    day_offset: i64,
    streak_days: u32,
    pack_id: Option<&str>,
    challenge_idx: usize,
) -> CompletionEntry {
    let challenges = catalog.challenges();
    let challenge = &challenges[challenge_idx % challenges.len()];
    let base = Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap();
    let timestamp =
        base + Duration::days(day_offset) + Duration::minutes(rng.gen_range(0..600));

    CompletionEntry {
        challenge_id: challenge.id.clone(),
        title: challenge.title.clone(),
        area: challenge.area,
        difficulty: challenge.difficulty,
        xp_awarded: xp::award_for_challenge(challenge.difficulty, streak_days),
        timestamp,
        pack_id: pack_id.map(String::from),
        note: None,
    }
}

fn export_from(
    catalog: &Catalog,
    joined: &HashSet<String>,
    entries: Vec<CompletionEntry>,
) -> ExportData {
    let mut profile: ProfileData = replay(catalog, joined, &entries);
    // Availability normally comes from the app's refresh pass; mirror it so
    // imported fixtures look right immediately.
    let level = ascend::engine::leveling::level_for_xp(profile.total_xp).unwrap_or(1);
    for pack in catalog.packs() {
        let progress = profile.packs.entry(pack.id.clone()).or_default();
        ascend::catalog::pack::refresh_availability(pack.min_level, progress, level);
    }

    ExportData {
        ascend_export_version: EXPORT_VERSION,
        exported_at: Utc::now(),
        config: Config::default(),
        profile,
        journal: JournalData {
            entries,
            ..JournalData::default()
        },
    }
}

fn brand_new(catalog: &Catalog) -> ExportData {
    export_from(catalog, &HashSet::new(), Vec::new())
}

/// A week of daily practice, two challenges a day.
fn first_week(catalog: &Catalog) -> ExportData {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut entries = Vec::new();
    for day in 0..7 {
        let streak = day as u32 + 1;
        entries.push(entry_on_day(catalog, &mut rng, day, streak, None, day as usize));
        entries.push(entry_on_day(catalog, &mut rng, day, streak, None, day as usize + 7));
    }
    export_from(catalog, &HashSet::new(), entries)
}

/// The starter pack joined and finished across five days.
fn pack_finisher(catalog: &Catalog) -> ExportData {
    let mut rng = SmallRng::seed_from_u64(3);
    let pack = catalog.packs().first().expect("builtin catalog has packs");
    let joined: HashSet<String> = [pack.id.clone()].into_iter().collect();

    let mut entries = Vec::new();
    let ids: Vec<String> = pack.challenge_ids.clone();
    for (day, id) in ids.iter().enumerate() {
        let idx = catalog
            .challenges()
            .iter()
            .position(|c| &c.id == id)
            .unwrap();
        entries.push(entry_on_day(
            catalog,
            &mut rng,
            day as i64,
            day as u32 + 1,
            Some(&pack.id),
            idx,
        ));
    }
    export_from(catalog, &joined, entries)
}

/// Months of practice: 120 completions, streaks broken twice.
fn centurion(catalog: &Catalog) -> ExportData {
    let mut rng = SmallRng::seed_from_u64(4);
    let mut entries = Vec::new();
    let mut streak = 0u32;
    let mut day = 0i64;
    for i in 0..120 {
        // Skip a day now and then so the history shows broken streaks.
        if i == 40 || i == 90 {
            day += 2;
            streak = 0;
        } else {
            day += 1;
        }
        streak += 1;
        entries.push(entry_on_day(catalog, &mut rng, day, streak, None, i));
    }
    export_from(catalog, &HashSet::new(), entries)
}

fn main() -> Result<()> {
    let catalog = Catalog::builtin();
    fs::create_dir_all("test-journals")?;

    let fixtures: &[(&str, ExportData)] = &[
        ("01-brand-new", brand_new(&catalog)),
        ("02-first-week", first_week(&catalog)),
        ("03-pack-finisher", pack_finisher(&catalog)),
        ("04-centurion", centurion(&catalog)),
    ];

    for (name, export) in fixtures {
        let path = format!("test-journals/{name}.json");
        fs::write(&path, serde_json::to_string_pretty(export)?)?;
        println!(
            "{path}: {} entries, {} XP, level {}",
            export.journal.entries.len(),
            export.profile.total_xp,
            ascend::engine::leveling::level_for_xp(export.profile.total_xp).unwrap_or(1),
        );
    }

    Ok(())
}
