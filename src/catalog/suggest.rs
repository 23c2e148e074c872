use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::catalog::{Challenge, GrowthArea};

/// Seed the picker from the calendar day so "today's challenges" stay stable
/// across app restarts within the same day.
fn daily_seed(day: NaiveDate) -> u64 {
    day.num_days_from_ce() as u64
}

/// Pick `count` suggestions for the day.
///
/// Focus-area challenges are drawn first, the rest fill up the remainder.
/// Challenges already completed today are excluded so the list drains as the
/// user works through it.
pub fn suggest<'a>(
    challenges: &'a [Challenge],
    day: NaiveDate,
    focus_areas: &[GrowthArea],
    count: usize,
    completed_today: &HashSet<String>,
) -> Vec<&'a Challenge> {
    let mut rng = SmallRng::seed_from_u64(daily_seed(day));

    let mut focused: Vec<&Challenge> = Vec::new();
    let mut rest: Vec<&Challenge> = Vec::new();
    for challenge in challenges {
        if completed_today.contains(&challenge.id) {
            continue;
        }
        if focus_areas.contains(&challenge.area) {
            focused.push(challenge);
        } else {
            rest.push(challenge);
        }
    }
    focused.shuffle(&mut rng);
    rest.shuffle(&mut rng);

    focused.into_iter().chain(rest).take(count).collect()
}
