use thiserror::Error;

/// Ceiling on the displayable level. Bounds the threshold search for
/// pathological inputs; XP itself keeps accumulating past it.
pub const LEVEL_CAP: u32 = 1000;

const BASE_XP: f64 = 100.0;
const CURVE_EXPONENT: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LevelingError {
    #[error("total XP cannot be negative (got {0})")]
    NegativeXp(i64),
    #[error("level {0} is outside the valid range 1..={LEVEL_CAP}")]
    InvalidLevel(u32),
}

/// Derived view of a profile's total XP.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelState {
    pub level: u32,
    pub xp_into_level: u64,
    pub xp_to_next_level: u64,
    pub fraction: f64,
}

impl Default for LevelState {
    /// The state of a fresh zero-XP profile.
    fn default() -> Self {
        Self {
            level: 1,
            xp_into_level: 0,
            xp_to_next_level: 100,
            fraction: 0.0,
        }
    }
}

/// XP required to advance from `level` to `level + 1`.
///
/// Rounding happens per level step; cumulative thresholds are sums of these
/// rounded spans, so the same thresholds are reproduced on every call.
pub fn xp_to_advance(level: u32) -> u64 {
    (BASE_XP * f64::from(level).powf(CURVE_EXPONENT)).round() as u64
}

/// Total XP needed to *reach* `level`. Level 1 costs nothing.
pub fn cumulative_xp_for_level(level: u32) -> Result<u64, LevelingError> {
    if level == 0 || level > LEVEL_CAP {
        return Err(LevelingError::InvalidLevel(level));
    }
    Ok((1..level).map(xp_to_advance).sum())
}

/// Largest level whose cumulative threshold is at or below `total_xp`.
///
/// Negative XP means the caller handed us a corrupted ledger; that is an
/// error, not something to clamp away.
pub fn level_for_xp(total_xp: i64) -> Result<u32, LevelingError> {
    if total_xp < 0 {
        return Err(LevelingError::NegativeXp(total_xp));
    }
    let total = total_xp as u64;

    let mut level = 1;
    let mut threshold = 0u64;
    while level < LEVEL_CAP {
        let next = threshold + xp_to_advance(level);
        if total < next {
            break;
        }
        threshold = next;
        level += 1;
    }
    Ok(level)
}

/// Intra-level progress for a `(total_xp, level)` pair.
///
/// `level` must already equal `level_for_xp(total_xp)`; taking it as an
/// argument avoids re-walking the thresholds when the caller has both.
pub fn progress_within_level(total_xp: i64, level: u32) -> Result<LevelState, LevelingError> {
    if total_xp < 0 {
        return Err(LevelingError::NegativeXp(total_xp));
    }
    let floor = cumulative_xp_for_level(level)?;
    let span = xp_to_advance(level);
    let xp_into_level = (total_xp as u64).saturating_sub(floor);
    let fraction = (xp_into_level as f64 / span as f64).clamp(0.0, 1.0);
    Ok(LevelState {
        level,
        xp_into_level,
        xp_to_next_level: span,
        fraction,
    })
}

/// Convenience for display code: level plus intra-level progress in one call.
pub fn level_state(total_xp: i64) -> Result<LevelState, LevelingError> {
    let level = level_for_xp(total_xp)?;
    progress_within_level(total_xp, level)
}

pub fn level_title(level: u32) -> &'static str {
    match level {
        1..=2 => "Seedling",
        3..=4 => "Pathfinder",
        5..=7 => "Striver",
        8..=11 => "Climber",
        12..=16 => "Trailblazer",
        17..=24 => "Luminary",
        _ => "Summit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_three_spans() {
        // round(100 * 1^1.5) = 100, round(100 * 2^1.5) = 283,
        // round(100 * 3^1.5) = 520
        assert_eq!(xp_to_advance(1), 100);
        assert_eq!(xp_to_advance(2), 283);
        assert_eq!(xp_to_advance(3), 520);
    }

    #[test]
    fn test_cumulative_thresholds() {
        assert_eq!(cumulative_xp_for_level(1).unwrap(), 0);
        assert_eq!(cumulative_xp_for_level(2).unwrap(), 100);
        assert_eq!(cumulative_xp_for_level(3).unwrap(), 383);
        assert_eq!(cumulative_xp_for_level(4).unwrap(), 903);
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for_xp(0).unwrap(), 1);
        assert_eq!(level_for_xp(99).unwrap(), 1);
        assert_eq!(level_for_xp(100).unwrap(), 2);
        assert_eq!(level_for_xp(382).unwrap(), 2);
        assert_eq!(level_for_xp(383).unwrap(), 3);
        assert_eq!(level_for_xp(903).unwrap(), 4);
    }

    #[test]
    fn test_progress_at_320_xp() {
        let level = level_for_xp(320).unwrap();
        assert_eq!(level, 2);
        let state = progress_within_level(320, level).unwrap();
        assert_eq!(state.xp_into_level, 220);
        assert_eq!(state.xp_to_next_level, 283);
        assert!((state.fraction - 220.0 / 283.0).abs() < 1e-9);
    }

    #[test]
    fn test_fresh_profile_state() {
        let state = level_state(0).unwrap();
        assert_eq!(state.level, 1);
        assert_eq!(state.xp_into_level, 0);
        assert_eq!(state.xp_to_next_level, 100);
        assert_eq!(state.fraction, 0.0);
    }

    #[test]
    fn test_exact_threshold_starts_next_level_at_zero() {
        let state = level_state(903).unwrap();
        assert_eq!(state.level, 4);
        assert_eq!(state.xp_into_level, 0);
        assert_eq!(state.fraction, 0.0);
    }

    #[test]
    fn test_monotone_and_round_trip_bound() {
        let mut prev = 1;
        for xp in 0..5000 {
            let level = level_for_xp(xp).unwrap();
            assert!(level >= prev, "level dropped at xp={xp}");
            prev = level;

            let floor = cumulative_xp_for_level(level).unwrap();
            let ceiling = cumulative_xp_for_level(level + 1).unwrap();
            assert!(floor as i64 <= xp && xp < ceiling as i64, "bound broken at xp={xp}");
        }
    }

    #[test]
    fn test_negative_xp_is_an_error() {
        assert_eq!(level_for_xp(-1), Err(LevelingError::NegativeXp(-1)));
        assert_eq!(
            progress_within_level(-42, 1),
            Err(LevelingError::NegativeXp(-42))
        );
    }

    #[test]
    fn test_invalid_level_is_an_error() {
        assert_eq!(
            cumulative_xp_for_level(0),
            Err(LevelingError::InvalidLevel(0))
        );
        assert_eq!(
            cumulative_xp_for_level(LEVEL_CAP + 1),
            Err(LevelingError::InvalidLevel(LEVEL_CAP + 1))
        );
    }

    #[test]
    fn test_search_stops_at_cap() {
        assert_eq!(level_for_xp(i64::MAX).unwrap(), LEVEL_CAP);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(level_for_xp(123_456), level_for_xp(123_456));
        assert_eq!(level_state(123_456), level_state(123_456));
    }
}
