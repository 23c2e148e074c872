use std::collections::HashSet;

use crate::catalog::pack::{self, PackAdvance, PackProgress, PackStatus};
use crate::catalog::{Catalog, GrowthArea};
use crate::engine::leveling;
use crate::engine::{badges, streak};
use crate::journal::entry::CompletionEntry;
use crate::store::schema::ProfileData;

/// Rebuild a profile by folding the journal oldest->newest.
///
/// XP comes from the recorded awards, so totals survive catalog or
/// bonus-rule changes. Pack progress is re-derived from membership, exactly
/// as the live path does it, and badges are re-earned with each entry's
/// timestamp so earned dates reflect when the threshold was actually
/// crossed.
///
/// Joining a pack isn't journaled, so the caller passes the set of packs to
/// treat as joined; their completion lists are re-earned from the entries.
pub fn replay(
    catalog: &Catalog,
    joined_packs: &HashSet<String>,
    entries: &[CompletionEntry],
) -> ProfileData {
    let mut profile = ProfileData::default();
    for id in joined_packs {
        profile.packs.insert(
            id.clone(),
            PackProgress {
                status: PackStatus::InProgress,
                completed: Vec::new(),
            },
        );
    }

    let mut areas: HashSet<GrowthArea> = HashSet::new();
    for entry in entries {
        let up = streak::observe(
            streak::parse_day(profile.last_entry_date.as_deref()),
            profile.streak_days,
            profile.best_streak,
            entry.day(),
        );
        profile.streak_days = up.days;
        profile.best_streak = up.best;
        profile.last_entry_date = Some(streak::format_day(entry.day()));

        profile.total_xp += entry.xp_awarded as i64;
        profile.total_completions += 1;
        areas.insert(entry.area);

        for pack in catalog.packs() {
            let Some(progress) = profile.packs.get_mut(&pack.id) else {
                continue;
            };
            if pack::record_completion(pack, progress, &entry.challenge_id)
                == PackAdvance::JustCompleted
            {
                profile.total_xp += pack.bonus_xp as i64;
            }
        }

        let ctx = badges::BadgeContext {
            total_completions: profile.total_completions,
            best_streak: profile.best_streak,
            level: leveling::level_for_xp(profile.total_xp).unwrap_or(1),
            areas_completed: &areas,
            any_pack_complete: profile
                .packs
                .values()
                .any(|p| p.status == PackStatus::Complete),
        };
        for id in badges::evaluate(&ctx, &profile.badges) {
            profile.badges.insert(id.to_key().to_string(), entry.timestamp);
        }
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogFile, Challenge, Difficulty};
    use chrono::{TimeZone, Utc};

    fn make_catalog() -> Catalog {
        let challenges = ["a", "b", "c"]
            .into_iter()
            .map(|id| Challenge {
                id: id.to_string(),
                title: id.to_uppercase(),
                area: GrowthArea::Discipline,
                difficulty: Difficulty::Steady,
                prompt: String::new(),
            })
            .collect();
        Catalog::from_file(CatalogFile {
            challenges,
            packs: vec![crate::catalog::pack::Pack {
                id: "p".to_string(),
                name: "P".to_string(),
                description: String::new(),
                min_level: 1,
                bonus_xp: 100,
                challenge_ids: vec!["a".to_string(), "b".to_string()],
            }],
        })
    }

    fn make_entry(id: &str, day: u32, xp: u64, pack_id: Option<&str>) -> CompletionEntry {
        CompletionEntry {
            challenge_id: id.to_string(),
            title: id.to_uppercase(),
            area: GrowthArea::Discipline,
            difficulty: Difficulty::Steady,
            xp_awarded: xp,
            timestamp: Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap(),
            pack_id: pack_id.map(String::from),
            note: None,
        }
    }

    #[test]
    fn test_empty_journal_is_fresh_profile() {
        let catalog = make_catalog();
        let profile = replay(&catalog, &HashSet::new(), &[]);
        assert_eq!(profile.total_xp, 0);
        assert_eq!(profile.streak_days, 0);
        assert!(profile.badges.is_empty());
    }

    #[test]
    fn test_streaks_and_totals_fold_from_entries() {
        let catalog = make_catalog();
        let entries = vec![
            make_entry("a", 1, 35, None),
            make_entry("b", 2, 36, None),
            make_entry("c", 4, 35, None), // gap resets the streak
        ];
        let profile = replay(&catalog, &HashSet::new(), &entries);
        assert_eq!(profile.total_xp, 106);
        assert_eq!(profile.total_completions, 3);
        assert_eq!(profile.streak_days, 1);
        assert_eq!(profile.best_streak, 2);
        assert_eq!(profile.last_entry_date.as_deref(), Some("2026-03-04"));
    }

    #[test]
    fn test_pack_bonus_rederived_when_joined() {
        let catalog = make_catalog();
        let joined: HashSet<String> = ["p".to_string()].into_iter().collect();
        let entries = vec![
            make_entry("a", 1, 35, Some("p")),
            make_entry("b", 2, 36, Some("p")),
        ];
        let profile = replay(&catalog, &joined, &entries);
        assert_eq!(profile.total_xp, 35 + 36 + 100);
        assert_eq!(profile.packs.get("p").unwrap().status, PackStatus::Complete);
        assert!(profile.badges.contains_key("pack_finisher"));
    }

    #[test]
    fn test_pack_attribution_ignored_when_not_joined() {
        let catalog = make_catalog();
        let entries = vec![
            make_entry("a", 1, 35, Some("p")),
            make_entry("b", 2, 36, Some("p")),
        ];
        let profile = replay(&catalog, &HashSet::new(), &entries);
        assert_eq!(profile.total_xp, 71);
        assert!(profile.packs.is_empty());
    }

    #[test]
    fn test_badge_earned_at_uses_entry_timestamp() {
        let catalog = make_catalog();
        let entries = vec![make_entry("a", 1, 35, None)];
        let profile = replay(&catalog, &HashSet::new(), &entries);
        assert_eq!(
            profile.badges.get("first_step"),
            Some(&entries[0].timestamp)
        );
    }

    #[test]
    fn test_replay_is_deterministic() {
        let catalog = make_catalog();
        let entries = vec![
            make_entry("a", 1, 35, None),
            make_entry("b", 2, 36, None),
        ];
        let one = replay(&catalog, &HashSet::new(), &entries);
        let two = replay(&catalog, &HashSet::new(), &entries);
        assert_eq!(one.total_xp, two.total_xp);
        assert_eq!(one.streak_days, two.streak_days);
        assert_eq!(one.badges, two.badges);
    }
}
