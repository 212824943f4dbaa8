use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::Policy;
use super::clock::hours;
use super::state::{format_timestamp, parse_timestamp};

/// What the user asked the pet to do this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    Feed,
    Play,
    Clean,
    Rest,
    #[default]
    Refresh,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Feed => write!(f, "feed"),
            Action::Play => write!(f, "play"),
            Action::Clean => write!(f, "clean"),
            Action::Rest => write!(f, "rest"),
            Action::Refresh => write!(f, "refresh"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Need {
    Feed,
    Play,
    Hygiene,
    Rest,
}

impl Need {
    pub const ALL: [Need; 4] = [Need::Feed, Need::Play, Need::Hygiene, Need::Rest];

    /// Flag value a channel takes when its threshold runs out.
    /// Hygiene is the odd one: its flag means "dirty", so decay raises it.
    pub fn decayed_flag(&self) -> bool {
        matches!(self, Need::Hygiene)
    }

    pub fn threshold(&self, policy: &Policy) -> chrono::Duration {
        let h = match self {
            Need::Feed => policy.feed_hours,
            Need::Play => policy.play_hours,
            Need::Hygiene => policy.hygiene_hours,
            Need::Rest => policy.rest_hours,
        };
        hours(h)
    }
}

impl std::fmt::Display for Need {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Need::Feed => write!(f, "feed"),
            Need::Play => write!(f, "play"),
            Need::Hygiene => write!(f, "hygiene"),
            Need::Rest => write!(f, "rest"),
        }
    }
}

/// One care dimension: a flag plus the instant it last changed.
///
/// On disk a channel is a pair `[0|1, "YYYY-MM-DD HH:MM:SS.ffffff"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChannel", into = "RawChannel")]
pub struct NeedChannel {
    pub satisfied: bool,
    pub last_changed_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize)]
struct RawChannel(u8, String);

impl TryFrom<RawChannel> for NeedChannel {
    type Error = String;

    fn try_from(raw: RawChannel) -> Result<Self, Self::Error> {
        let satisfied = match raw.0 {
            0 => false,
            1 => true,
            other => return Err(format!("flag must be 0 or 1, got {}", other)),
        };
        let last_changed_at = parse_timestamp(&raw.1).map_err(|e| e.to_string())?;
        Ok(NeedChannel { satisfied, last_changed_at })
    }
}

impl From<NeedChannel> for RawChannel {
    fn from(channel: NeedChannel) -> Self {
        RawChannel(channel.satisfied as u8, format_timestamp(&channel.last_changed_at))
    }
}

impl NeedChannel {
    pub fn new(satisfied: bool, at: NaiveDateTime) -> Self {
        NeedChannel { satisfied, last_changed_at: at }
    }

    pub fn set(&mut self, satisfied: bool, now: NaiveDateTime) {
        self.satisfied = satisfied;
        self.last_changed_at = now;
    }

    pub fn elapsed(&self, now: NaiveDateTime) -> chrono::Duration {
        now - self.last_changed_at
    }
}

/// The four need channels of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeedTracker {
    pub feed: NeedChannel,
    pub play: NeedChannel,
    pub hygiene: NeedChannel,
    pub rest: NeedChannel,
}

impl NeedTracker {
    /// Hungry, bored, clean and freshly asleep.
    pub fn new(now: NaiveDateTime) -> Self {
        NeedTracker {
            feed: NeedChannel::new(false, now),
            play: NeedChannel::new(false, now),
            hygiene: NeedChannel::new(false, now),
            rest: NeedChannel::new(true, now),
        }
    }

    pub fn channel(&self, need: Need) -> &NeedChannel {
        match need {
            Need::Feed => &self.feed,
            Need::Play => &self.play,
            Need::Hygiene => &self.hygiene,
            Need::Rest => &self.rest,
        }
    }

    pub fn channel_mut(&mut self, need: Need) -> &mut NeedChannel {
        match need {
            Need::Feed => &mut self.feed,
            Need::Play => &mut self.play,
            Need::Hygiene => &mut self.hygiene,
            Need::Rest => &mut self.rest,
        }
    }

    /// Resets every channel whose threshold has run out since it last changed.
    /// Returns the channels that were reset.
    pub fn decay(&mut self, now: NaiveDateTime, policy: &Policy) -> Vec<Need> {
        let mut reset = Vec::new();

        for need in Need::ALL {
            let threshold = need.threshold(policy);
            let channel = self.channel_mut(need);

            if channel.elapsed(now) > threshold {
                channel.set(need.decayed_flag(), now);
                tracing::debug!("{} decayed (satisfied = {})", need, channel.satisfied);
                reset.push(need);
            }
        }

        reset
    }

    /// Applies a care action. Returns whether any channel changed.
    pub fn apply_action(&mut self, action: Action, now: NaiveDateTime) -> bool {
        match action {
            // a fed pet cannot be fed again until it is hungry
            Action::Feed if !self.feed.satisfied => {
                self.feed.set(true, now);
                true
            }
            Action::Feed => false,
            Action::Play => {
                self.play.set(true, now);
                true
            }
            Action::Clean => {
                self.hygiene.set(false, now);
                true
            }
            Action::Rest => {
                self.rest.set(true, now);
                true
            }
            Action::Refresh => false,
        }
    }

    /// `[feed, play, hygiene-dirty, rest]`
    pub fn vector(&self) -> [bool; 4] {
        [
            self.feed.satisfied,
            self.play.satisfied,
            self.hygiene.satisfied,
            self.rest.satisfied,
        ]
    }

    pub fn is_dirty(&self) -> bool {
        self.hygiene.satisfied
    }
}
