use serde::{Deserialize, Serialize};

/// A bundle of challenges worked through together, with a bonus payout when
/// every member is done.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pack {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default = "default_min_level")]
    pub min_level: u32,
    #[serde(default = "default_bonus_xp")]
    pub bonus_xp: u64,
    pub challenge_ids: Vec<String>,
}

fn default_min_level() -> u32 {
    1
}

fn default_bonus_xp() -> u64 {
    100
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackStatus {
    Locked,
    Available,
    InProgress,
    Complete,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PackProgress {
    pub status: PackStatus,
    /// Ids completed while the pack was joined, in completion order.
    pub completed: Vec<String>,
}

impl Default for PackProgress {
    fn default() -> Self {
        Self {
            status: PackStatus::Locked,
            completed: Vec::new(),
        }
    }
}

/// Outcome of attributing one challenge completion to a pack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackAdvance {
    /// Not joined, not a member, or already counted.
    NotTracked,
    Progressed,
    /// This completion finished the pack; the bonus is due exactly once.
    JustCompleted,
}

impl Pack {
    /// First listed challenge not yet completed. Members can be completed in
    /// any order; this is what the UI suggests next.
    pub fn next_challenge<'a>(&'a self, progress: &PackProgress) -> Option<&'a str> {
        self.challenge_ids
            .iter()
            .find(|id| !progress.completed.contains(id))
            .map(String::as_str)
    }

    pub fn is_satisfied(&self, progress: &PackProgress) -> bool {
        self.challenge_ids
            .iter()
            .all(|id| progress.completed.contains(id))
    }
}

/// Transition Available -> InProgress. Joining is explicit; a pack never
/// starts itself.
pub fn join(progress: &mut PackProgress) {
    if progress.status == PackStatus::Available {
        progress.status = PackStatus::InProgress;
        progress.completed.clear();
    }
}

/// Unlock packs whose level gate the user has reached.
pub fn refresh_availability(min_level: u32, progress: &mut PackProgress, level: u32) {
    if progress.status == PackStatus::Locked && level >= min_level {
        progress.status = PackStatus::Available;
    }
}

/// Attribute one completed challenge to a joined pack.
pub fn record_completion(pack: &Pack, progress: &mut PackProgress, challenge_id: &str) -> PackAdvance {
    if progress.status != PackStatus::InProgress {
        return PackAdvance::NotTracked;
    }
    if !pack.challenge_ids.iter().any(|id| id == challenge_id) {
        return PackAdvance::NotTracked;
    }
    if progress.completed.iter().any(|id| id == challenge_id) {
        return PackAdvance::NotTracked;
    }

    progress.completed.push(challenge_id.to_string());
    if pack.is_satisfied(progress) {
        progress.status = PackStatus::Complete;
        PackAdvance::JustCompleted
    } else {
        PackAdvance::Progressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_pack() -> Pack {
        Pack {
            id: "foundations".to_string(),
            name: "Foundations".to_string(),
            description: String::new(),
            min_level: 2,
            bonus_xp: 150,
            challenge_ids: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        }
    }

    #[test]
    fn test_locked_until_level_gate() {
        let mut progress = PackProgress::default();
        refresh_availability(2, &mut progress, 1);
        assert_eq!(progress.status, PackStatus::Locked);
        refresh_availability(2, &mut progress, 2);
        assert_eq!(progress.status, PackStatus::Available);
    }

    #[test]
    fn test_join_requires_available() {
        let mut progress = PackProgress::default();
        join(&mut progress);
        assert_eq!(progress.status, PackStatus::Locked);
        progress.status = PackStatus::Available;
        join(&mut progress);
        assert_eq!(progress.status, PackStatus::InProgress);
    }

    #[test]
    fn test_completions_ignored_until_joined() {
        let pack = make_pack();
        let mut progress = PackProgress::default();
        progress.status = PackStatus::Available;
        assert_eq!(
            record_completion(&pack, &mut progress, "a"),
            PackAdvance::NotTracked
        );
        assert!(progress.completed.is_empty());
    }

    #[test]
    fn test_members_count_in_any_order() {
        let pack = make_pack();
        let mut progress = PackProgress {
            status: PackStatus::InProgress,
            completed: Vec::new(),
        };
        assert_eq!(
            record_completion(&pack, &mut progress, "c"),
            PackAdvance::Progressed
        );
        assert_eq!(pack.next_challenge(&progress), Some("a"));
        assert_eq!(
            record_completion(&pack, &mut progress, "a"),
            PackAdvance::Progressed
        );
        assert_eq!(pack.next_challenge(&progress), Some("b"));
    }

    #[test]
    fn test_last_member_completes_pack_once() {
        let pack = make_pack();
        let mut progress = PackProgress {
            status: PackStatus::InProgress,
            completed: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            record_completion(&pack, &mut progress, "c"),
            PackAdvance::JustCompleted
        );
        assert_eq!(progress.status, PackStatus::Complete);
        // A repeat of the same id after completion records nothing.
        assert_eq!(
            record_completion(&pack, &mut progress, "c"),
            PackAdvance::NotTracked
        );
    }

    #[test]
    fn test_non_member_not_tracked() {
        let pack = make_pack();
        let mut progress = PackProgress {
            status: PackStatus::InProgress,
            completed: Vec::new(),
        };
        assert_eq!(
            record_completion(&pack, &mut progress, "zzz"),
            PackAdvance::NotTracked
        );
    }
}
