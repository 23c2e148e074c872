use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::catalog::GrowthArea;

// --- Badge ids ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BadgeId {
    FirstStep,
    WeekStreak,
    MonthStreak,
    Committed,
    Centurion,
    RisingFive,
    AscendantTen,
    WellRounded,
    PackFinisher,
}

impl BadgeId {
    pub fn to_key(self) -> &'static str {
        match self {
            BadgeId::FirstStep => "first_step",
            BadgeId::WeekStreak => "week_streak",
            BadgeId::MonthStreak => "month_streak",
            BadgeId::Committed => "committed",
            BadgeId::Centurion => "centurion",
            BadgeId::RisingFive => "rising_five",
            BadgeId::AscendantTen => "ascendant_ten",
            BadgeId::WellRounded => "well_rounded",
            BadgeId::PackFinisher => "pack_finisher",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "first_step" => Some(BadgeId::FirstStep),
            "week_streak" => Some(BadgeId::WeekStreak),
            "month_streak" => Some(BadgeId::MonthStreak),
            "committed" => Some(BadgeId::Committed),
            "centurion" => Some(BadgeId::Centurion),
            "rising_five" => Some(BadgeId::RisingFive),
            "ascendant_ten" => Some(BadgeId::AscendantTen),
            "well_rounded" => Some(BadgeId::WellRounded),
            "pack_finisher" => Some(BadgeId::PackFinisher),
            _ => None,
        }
    }

    pub fn all() -> &'static [BadgeId] {
        &[
            BadgeId::FirstStep,
            BadgeId::WeekStreak,
            BadgeId::MonthStreak,
            BadgeId::Committed,
            BadgeId::Centurion,
            BadgeId::RisingFive,
            BadgeId::AscendantTen,
            BadgeId::WellRounded,
            BadgeId::PackFinisher,
        ]
    }
}

// --- Static definitions ---

pub struct BadgeDefinition {
    pub id: BadgeId,
    pub name: &'static str,
    pub blurb: &'static str,
}

pub const ALL_BADGES: &[BadgeDefinition] = &[
    BadgeDefinition {
        id: BadgeId::FirstStep,
        name: "First Step",
        blurb: "Complete your first challenge",
    },
    BadgeDefinition {
        id: BadgeId::WeekStreak,
        name: "Seven Sunrises",
        blurb: "Keep a 7-day streak",
    },
    BadgeDefinition {
        id: BadgeId::MonthStreak,
        name: "Full Orbit",
        blurb: "Keep a 30-day streak",
    },
    BadgeDefinition {
        id: BadgeId::Committed,
        name: "Committed",
        blurb: "Complete 25 challenges",
    },
    BadgeDefinition {
        id: BadgeId::Centurion,
        name: "Centurion",
        blurb: "Complete 100 challenges",
    },
    BadgeDefinition {
        id: BadgeId::RisingFive,
        name: "Rising Five",
        blurb: "Reach level 5",
    },
    BadgeDefinition {
        id: BadgeId::AscendantTen,
        name: "Ascendant",
        blurb: "Reach level 10",
    },
    BadgeDefinition {
        id: BadgeId::WellRounded,
        name: "Well Rounded",
        blurb: "Complete a challenge in every growth area",
    },
    BadgeDefinition {
        id: BadgeId::PackFinisher,
        name: "Pack Finisher",
        blurb: "Finish a challenge pack",
    },
];

pub fn definition(id: BadgeId) -> &'static BadgeDefinition {
    ALL_BADGES
        .iter()
        .find(|b| b.id == id)
        .expect("badge definition not found")
}

// --- Evaluation ---

/// Profile facts a badge check can look at. Built by the app after every
/// completion and during journal replay.
pub struct BadgeContext<'a> {
    pub total_completions: u32,
    pub best_streak: u32,
    pub level: u32,
    pub areas_completed: &'a HashSet<GrowthArea>,
    pub any_pack_complete: bool,
}

fn requirement_met(id: BadgeId, ctx: &BadgeContext) -> bool {
    match id {
        BadgeId::FirstStep => ctx.total_completions >= 1,
        BadgeId::WeekStreak => ctx.best_streak >= 7,
        BadgeId::MonthStreak => ctx.best_streak >= 30,
        BadgeId::Committed => ctx.total_completions >= 25,
        BadgeId::Centurion => ctx.total_completions >= 100,
        BadgeId::RisingFive => ctx.level >= 5,
        BadgeId::AscendantTen => ctx.level >= 10,
        BadgeId::WellRounded => GrowthArea::all()
            .iter()
            .all(|area| ctx.areas_completed.contains(area)),
        BadgeId::PackFinisher => ctx.any_pack_complete,
    }
}

/// Badges satisfied by `ctx` that are not in `earned` yet. Earned badges
/// are permanent; a shrinking context never revokes one here (rebuilds
/// start from an empty map instead).
pub fn evaluate(ctx: &BadgeContext, earned: &HashMap<String, DateTime<Utc>>) -> Vec<BadgeId> {
    BadgeId::all()
        .iter()
        .filter(|id| !earned.contains_key(id.to_key()) && requirement_met(**id, ctx))
        .copied()
        .collect()
}
