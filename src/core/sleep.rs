use chrono::NaiveDateTime;

use crate::config::Policy;
use super::clock::hours;
use super::needs::{Action, NeedTracker};

/// Decides whether the pet is sleeping, based purely on the rest channel.
#[derive(Debug, Clone, Copy)]
pub struct SleepGate {
    sleep_duration: chrono::Duration,
}

/// What `try_wake` found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeOutcome {
    /// Awake already, nothing changed.
    Awake,
    /// Was asleep, woken by feeding. The rest timestamp was rewound.
    ForcedAwake,
    StillAsleep,
    Dead,
}

impl WakeOutcome {
    pub fn is_awake(&self) -> bool {
        matches!(self, WakeOutcome::Awake | WakeOutcome::ForcedAwake)
    }
}

impl SleepGate {
    pub fn new(policy: &Policy) -> Self {
        SleepGate {
            sleep_duration: hours(policy.sleep_hours),
        }
    }

    pub fn is_asleep(&self, needs: &NeedTracker, now: NaiveDateTime) -> bool {
        needs.rest.satisfied && needs.rest.elapsed(now) < self.sleep_duration
    }

    /// A hungry sleeping pet wakes up when offered food. Waking moves the
    /// rest timestamp back by a full sleep so `is_asleep` reads false from
    /// here on; this is the only rule that moves a timestamp backwards.
    pub fn try_wake(&self, needs: &mut NeedTracker, lives: u8, action: Action, now: NaiveDateTime) -> WakeOutcome {
        if lives == 0 {
            return WakeOutcome::Dead;
        }
        if !self.is_asleep(needs, now) {
            return WakeOutcome::Awake;
        }
        if action == Action::Feed && !needs.feed.satisfied {
            needs.rest.last_changed_at = now
                .checked_sub_signed(self.sleep_duration)
                .unwrap_or(NaiveDateTime::MIN);
            tracing::info!("woken up to eat");
            return WakeOutcome::ForcedAwake;
        }
        WakeOutcome::StillAsleep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap()
    }

    fn gate() -> SleepGate {
        SleepGate::new(&Policy::default())
    }

    #[test]
    fn test_asleep_within_sleep_duration() {
        let needs = NeedTracker::new(t0());
        assert!(gate().is_asleep(&needs, t0()));
        assert!(gate().is_asleep(&needs, t0() + Duration::hours(7)));
        assert!(!gate().is_asleep(&needs, t0() + Duration::hours(8)));
    }

    #[test]
    fn test_unrested_pet_is_awake() {
        let mut needs = NeedTracker::new(t0());
        needs.rest.set(false, t0());
        assert!(!gate().is_asleep(&needs, t0()));
    }

    #[test]
    fn test_feeding_wakes_hungry_pet() {
        let mut needs = NeedTracker::new(t0());
        let now = t0() + Duration::hours(3);

        let outcome = gate().try_wake(&mut needs, 5, Action::Feed, now);

        assert_eq!(outcome, WakeOutcome::ForcedAwake);
        assert!(outcome.is_awake());
        assert_eq!(needs.rest.last_changed_at, now - Duration::hours(8));
        assert!(needs.rest.satisfied);
        assert!(!gate().is_asleep(&needs, now));
    }

    #[test]
    fn test_fed_pet_keeps_sleeping() {
        let mut needs = NeedTracker::new(t0());
        needs.feed.set(true, t0());
        let before = needs;

        let outcome = gate().try_wake(&mut needs, 5, Action::Feed, t0() + Duration::hours(1));
        assert_eq!(outcome, WakeOutcome::StillAsleep);
        assert_eq!(needs, before);
    }

    #[test]
    fn test_other_actions_do_not_wake() {
        for action in [Action::Play, Action::Clean, Action::Rest, Action::Refresh] {
            let mut needs = NeedTracker::new(t0());
            let outcome = gate().try_wake(&mut needs, 5, action, t0() + Duration::hours(2));
            assert_eq!(outcome, WakeOutcome::StillAsleep, "{}", action);
        }
    }

    #[test]
    fn test_wake_with_enormous_sleep_does_not_overflow() {
        let gate = SleepGate::new(&Policy { sleep_hours: 1e12, ..Policy::default() });
        let mut needs = NeedTracker::new(t0());

        let outcome = gate.try_wake(&mut needs, 5, Action::Feed, t0() + Duration::hours(1));
        assert_eq!(outcome, WakeOutcome::ForcedAwake);
        assert_eq!(needs.rest.last_changed_at, NaiveDateTime::MIN);
    }

    #[test]
    fn test_dead_pet_never_wakes() {
        let mut needs = NeedTracker::new(t0());
        let outcome = gate().try_wake(&mut needs, 0, Action::Feed, t0() + Duration::hours(1));

        assert_eq!(outcome, WakeOutcome::Dead);
        assert!(!outcome.is_awake());
        assert_eq!(needs.rest.last_changed_at, t0());
    }
}
