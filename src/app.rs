use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::catalog::pack::{self, PackAdvance, PackStatus};
use crate::catalog::{Catalog, Challenge, GrowthArea, suggest};
use crate::config::Config;
use crate::engine::badges::{self, BadgeContext, BadgeId};
use crate::engine::leveling::{self, LevelState};
use crate::engine::{streak, xp};
use crate::journal::entry::CompletionEntry;
use crate::journal::replay;
use crate::store::json_store::JsonStore;
use crate::store::schema::{JOURNAL_LIMIT, JournalData, ProfileData};
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Challenges,
    CompletionSummary,
    Packs,
    Badges,
    Stats,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChallengeTab {
    Today,
    Browse,
}

/// What just happened, for the completion summary screen.
pub struct AwardSummary {
    pub entry: CompletionEntry,
    pub level_before: u32,
    pub level_after: u32,
    pub packs_completed: Vec<String>,
    pub pack_bonus: u64,
    pub new_badges: Vec<BadgeId>,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub catalog: Catalog,
    pub profile: ProfileData,
    pub journal: Vec<CompletionEntry>,
    pub store: Option<JsonStore>,
    pub should_quit: bool,
    /// Set when startup found and cleared leftovers of an interrupted import.
    pub recovered_backup_files: bool,
    pub challenge_tab: ChallengeTab,
    pub challenge_selected: usize,
    pub pack_selected: usize,
    pub stats_tab: usize,
    pub journal_selected: usize,
    pub journal_confirm_delete: bool,
    pub settings_selected: usize,
    pub last_award: Option<AwardSummary>,
}

impl App {
    pub fn new(data_dir: Option<PathBuf>) -> Self {
        let mut config = Config::load().unwrap_or_default();
        config.normalize();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);

        let store = match data_dir {
            Some(dir) => JsonStore::with_base_dir(dir).ok(),
            None => JsonStore::new().ok(),
        };
        let recovered_backup_files = store
            .as_ref()
            .map(|s| s.check_interrupted_import())
            .unwrap_or(false);

        let (profile, journal) = if let Some(ref s) = store {
            match s.load_profile() {
                // A ledger the leveling core rejects is as corrupt as a
                // schema mismatch; both reset to a fresh profile.
                Some(pd)
                    if !pd.needs_reset() && leveling::level_for_xp(pd.total_xp).is_ok() =>
                {
                    let journal = s.load_journal().entries;
                    (pd, journal)
                }
                _ => (ProfileData::default(), Vec::new()),
            }
        } else {
            (ProfileData::default(), Vec::new())
        };

        let mut app = Self {
            screen: AppScreen::Menu,
            config,
            theme,
            menu,
            catalog: Catalog::load(),
            profile,
            journal,
            store,
            should_quit: false,
            recovered_backup_files,
            challenge_tab: ChallengeTab::Today,
            challenge_selected: 0,
            pack_selected: 0,
            stats_tab: 0,
            journal_selected: 0,
            journal_confirm_delete: false,
            settings_selected: 0,
            last_award: None,
        };
        app.refresh_pack_availability();
        app
    }

    // --- Derived state ---

    pub fn level(&self) -> u32 {
        leveling::level_for_xp(self.profile.total_xp).unwrap_or(1)
    }

    pub fn level_state(&self) -> LevelState {
        leveling::level_state(self.profile.total_xp).unwrap_or_default()
    }

    pub fn completed_today(&self) -> HashSet<String> {
        let today = Utc::now().date_naive();
        self.journal
            .iter()
            .filter(|e| e.day() == today)
            .map(|e| e.challenge_id.clone())
            .collect()
    }

    pub fn completed_today_count(&self) -> u32 {
        let today = Utc::now().date_naive();
        self.journal.iter().filter(|e| e.day() == today).count() as u32
    }

    pub fn visible_challenges(&self) -> Vec<&Challenge> {
        match self.challenge_tab {
            ChallengeTab::Today => suggest::suggest(
                self.catalog.challenges(),
                Utc::now().date_naive(),
                &self.config.focus_areas(),
                self.config.suggestion_count,
                &self.completed_today(),
            ),
            ChallengeTab::Browse => {
                let mut all: Vec<&Challenge> = self.catalog.challenges().iter().collect();
                all.sort_by_key(|c| (c.area.to_key(), c.difficulty.base_xp()));
                all
            }
        }
    }

    pub fn area_counts(&self) -> HashMap<GrowthArea, u32> {
        let mut counts = HashMap::new();
        for entry in &self.journal {
            *counts.entry(entry.area).or_insert(0) += 1;
        }
        counts
    }

    // --- Challenge completion ---

    pub fn complete_selected(&mut self) {
        let id = self
            .visible_challenges()
            .get(self.challenge_selected)
            .map(|c| c.id.clone());
        if let Some(id) = id {
            self.complete_challenge(&id);
        }
    }

    pub fn complete_challenge(&mut self, id: &str) {
        let Some(challenge) = self.catalog.get(id).cloned() else {
            return;
        };
        let today = Utc::now().date_naive();
        let level_before = self.level();

        let up = streak::observe(
            streak::parse_day(self.profile.last_entry_date.as_deref()),
            self.profile.streak_days,
            self.profile.best_streak,
            today,
        );
        self.profile.streak_days = up.days;
        self.profile.best_streak = up.best;
        self.profile.last_entry_date = Some(streak::format_day(today));

        let awarded = xp::award_for_challenge(challenge.difficulty, up.days);
        self.profile.total_xp += awarded as i64;
        self.profile.total_completions += 1;

        // Attribute to every joined pack listing this challenge, paying the
        // bonus for each one it finishes.
        let mut entry_pack_id = None;
        let mut packs_completed = Vec::new();
        let mut pack_bonus = 0;
        for pack in self.catalog.packs() {
            let Some(progress) = self.profile.packs.get_mut(&pack.id) else {
                continue;
            };
            match pack::record_completion(pack, progress, id) {
                PackAdvance::JustCompleted => {
                    entry_pack_id = Some(pack.id.clone());
                    packs_completed.push(pack.name.clone());
                    pack_bonus += pack.bonus_xp;
                }
                PackAdvance::Progressed => entry_pack_id = Some(pack.id.clone()),
                PackAdvance::NotTracked => {}
            }
        }
        self.profile.total_xp += pack_bonus as i64;

        let entry = CompletionEntry::new(&challenge, awarded, entry_pack_id);
        self.journal.push(entry.clone());
        if self.journal.len() > JOURNAL_LIMIT {
            self.journal.remove(0);
        }

        self.refresh_pack_availability();
        let new_badges = self.evaluate_badges_at(Utc::now());
        let level_after = self.level();

        self.last_award = Some(AwardSummary {
            entry,
            level_before,
            level_after,
            packs_completed,
            pack_bonus,
            new_badges,
        });
        self.screen = AppScreen::CompletionSummary;
        self.save_data();
    }

    fn evaluate_badges_at(&mut self, at: DateTime<Utc>) -> Vec<BadgeId> {
        let areas: HashSet<GrowthArea> = self.journal.iter().map(|e| e.area).collect();
        let ctx = BadgeContext {
            total_completions: self.profile.total_completions,
            best_streak: self.profile.best_streak,
            level: self.level(),
            areas_completed: &areas,
            any_pack_complete: self
                .profile
                .packs
                .values()
                .any(|p| p.status == PackStatus::Complete),
        };
        let new = badges::evaluate(&ctx, &self.profile.badges);
        for id in &new {
            self.profile.badges.insert(id.to_key().to_string(), at);
        }
        new
    }

    // --- Packs ---

    pub fn refresh_pack_availability(&mut self) {
        let level = self.level();
        for pack in self.catalog.packs() {
            let progress = self.profile.packs.entry(pack.id.clone()).or_default();
            pack::refresh_availability(pack.min_level, progress, level);
        }
    }

    pub fn join_selected_pack(&mut self) {
        let Some(pack_id) = self
            .catalog
            .packs()
            .get(self.pack_selected)
            .map(|p| p.id.clone())
        else {
            return;
        };
        if let Some(progress) = self.profile.packs.get_mut(&pack_id) {
            pack::join(progress);
        }
        self.save_data();
    }

    // --- Journal maintenance ---

    pub fn delete_journal_entry(&mut self) {
        if self.journal.is_empty() {
            return;
        }
        // Journal tab shows newest first; convert display index back.
        let actual_idx = self.journal.len() - 1 - self.journal_selected;
        self.journal.remove(actual_idx);
        self.rebuild_from_journal();
        self.save_data();

        if !self.journal.is_empty() {
            let max_visible = self.journal.len().min(20) - 1;
            self.journal_selected = self.journal_selected.min(max_visible);
        } else {
            self.journal_selected = 0;
        }
    }

    /// Rebuild all derived profile state from the journal. Joined packs stay
    /// joined across a rebuild (joining isn't journaled); everything else is
    /// re-derived by the replay fold.
    pub fn rebuild_from_journal(&mut self) {
        let joined: HashSet<String> = self
            .profile
            .packs
            .iter()
            .filter(|(_, p)| {
                matches!(p.status, PackStatus::InProgress | PackStatus::Complete)
            })
            .map(|(id, _)| id.clone())
            .collect();

        self.profile = replay::replay(&self.catalog, &joined, &self.journal);
        self.refresh_pack_availability();
    }

    // --- Persistence ---

    pub fn save_data(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save_profile(&self.profile);
            let _ = store.save_journal(&JournalData {
                entries: self.journal.clone(),
                ..JournalData::default()
            });
        }
    }

    // --- Navigation ---

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
    }

    pub fn open_challenges(&mut self, tab: ChallengeTab) {
        self.challenge_tab = tab;
        self.challenge_selected = 0;
        self.screen = AppScreen::Challenges;
    }

    pub fn go_to_packs(&mut self) {
        self.pack_selected = 0;
        self.screen = AppScreen::Packs;
    }

    pub fn go_to_badges(&mut self) {
        self.screen = AppScreen::Badges;
    }

    pub fn go_to_stats(&mut self) {
        self.stats_tab = 0;
        self.journal_selected = 0;
        self.journal_confirm_delete = false;
        self.screen = AppScreen::Stats;
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    // --- Settings ---

    /// Settings rows: theme, daily goal, suggestion count, then one toggle
    /// row per growth area.
    pub const FIXED_SETTINGS_ROWS: usize = 3;

    pub fn settings_row_count() -> usize {
        Self::FIXED_SETTINGS_ROWS + GrowthArea::all().len()
    }

    pub fn settings_cycle(&mut self, forward: bool) {
        match self.settings_selected {
            0 => self.cycle_theme(forward),
            1 => {
                self.config.daily_goal = cycle_in_range(self.config.daily_goal, 1, 10, forward);
            }
            2 => {
                self.config.suggestion_count =
                    cycle_in_range(self.config.suggestion_count as u32, 3, 10, forward) as usize;
            }
            row => {
                if let Some(&area) = GrowthArea::all().get(row - Self::FIXED_SETTINGS_ROWS) {
                    let key = area.to_key().to_string();
                    if let Some(pos) = self.config.focus_areas.iter().position(|k| *k == key) {
                        self.config.focus_areas.remove(pos);
                    } else {
                        self.config.focus_areas.push(key);
                    }
                }
            }
        }
    }

    fn cycle_theme(&mut self, forward: bool) {
        let mut names = Theme::available_themes();
        names.sort();
        if names.is_empty() {
            return;
        }
        let current = names
            .iter()
            .position(|n| *n == self.config.theme)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % names.len()
        } else {
            (current + names.len() - 1) % names.len()
        };
        self.config.theme = names[next].clone();
        if let Some(theme) = Theme::load(&self.config.theme) {
            let theme: &'static Theme = Box::leak(Box::new(theme));
            self.theme = theme;
            self.menu.theme = theme;
        }
    }
}

fn cycle_in_range(value: u32, min: u32, max: u32, forward: bool) -> u32 {
    if forward {
        if value >= max { min } else { value + 1 }
    } else if value <= min {
        max
    } else {
        value - 1
    }
}
