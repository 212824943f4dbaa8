use chrono::NaiveDateTime;

use super::mood::Mood;
use super::state::MAX_LIVES;

/// Life and level counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalityTracker {
    pub lives: u8,
    pub level: u32,
    pub created_at: NaiveDateTime,
}

/// How lives moved during one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeChange {
    Unchanged,
    Gained,
    Lost,
    /// The last life was lost.
    Died,
}

impl VitalityTracker {
    pub fn new(lives: u8, level: u32, created_at: NaiveDateTime) -> Self {
        VitalityTracker {
            lives: lives.min(MAX_LIVES),
            level,
            created_at,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    /// One day per level, counted from creation.
    pub fn level_at(&self, now: NaiveDateTime) -> u32 {
        let days = (now - self.created_at).num_days();
        u32::try_from(days).unwrap_or(0).max(self.level)
    }

    /// Unhappy moods cost a life, happiness earns one back. A refresh only
    /// looks, so it never moves lives; the level is recomputed either way.
    pub fn update(&mut self, mood: Mood, refresh: bool, now: NaiveDateTime) -> LifeChange {
        self.level = self.level_at(now);

        if refresh || self.is_dead() {
            return LifeChange::Unchanged;
        }

        if mood.is_unhappy() {
            self.lives -= 1;
            if self.lives == 0 {
                tracing::info!("last life lost while {}", mood);
                return LifeChange::Died;
            }
            tracing::info!("life lost while {} ({} left)", mood, self.lives);
            return LifeChange::Lost;
        }

        if mood == Mood::Happy && self.lives < MAX_LIVES {
            self.lives += 1;
            tracing::info!("life gained ({} now)", self.lives);
            return LifeChange::Gained;
        }

        LifeChange::Unchanged
    }
}
