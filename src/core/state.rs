use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{PetError, Result};
use super::needs::{NeedChannel, NeedTracker};

pub const MAX_LIVES: u8 = 5;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const TIMESTAMP_FORMAT_NO_FRACTION: &str = "%Y-%m-%d %H:%M:%S";

/// `YYYY-MM-DD HH:MM:SS.ffffff`, always six fractional digits.
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Accepts both the six-digit form and the bare-seconds form older saves
/// used when the microseconds happened to be zero.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT_NO_FRACTION))
        .map_err(|e| PetError::Timestamp(format!("{:?}: {}", s, e)))
}

fn serialize_timestamp<S: Serializer>(at: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(at))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s).map_err(serde::de::Error::custom)
}

/// Any integer is accepted and pulled into `0..=MAX_LIVES`, so a hand-edited
/// count does not cost the whole pet.
fn deserialize_lives<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let lives = i64::deserialize(deserializer)?;
    Ok(lives.clamp(0, MAX_LIVES as i64) as u8)
}

fn deserialize_level<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let level = i64::deserialize(deserializer)?;
    Ok(level.clamp(0, u32::MAX as i64) as u32)
}

/// Everything that survives between runs.
///
/// Old save files used `eat`/`poop`/`sleep`/`live`/`lvl`; those names are
/// still read but never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    #[serde(alias = "eat")]
    pub feed: NeedChannel,
    pub play: NeedChannel,
    #[serde(alias = "poop")]
    pub hygiene: NeedChannel,
    #[serde(alias = "sleep")]
    pub rest: NeedChannel,
    #[serde(alias = "live", deserialize_with = "deserialize_lives")]
    pub lives: u8,
    #[serde(alias = "lvl", deserialize_with = "deserialize_level")]
    pub level: u32,
    #[serde(
        rename = "start",
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub created_at: NaiveDateTime,
}

impl PetState {
    /// A newborn pet. Built fresh on every call; there is no shared default.
    pub fn new(now: NaiveDateTime) -> Self {
        Self::from_needs(NeedTracker::new(now), MAX_LIVES, 0, now)
    }

    pub fn from_needs(needs: NeedTracker, lives: u8, level: u32, created_at: NaiveDateTime) -> Self {
        PetState {
            feed: needs.feed,
            play: needs.play,
            hygiene: needs.hygiene,
            rest: needs.rest,
            lives,
            level,
            created_at,
        }
    }

    pub fn needs(&self) -> NeedTracker {
        NeedTracker {
            feed: self.feed,
            play: self.play,
            hygiene: self.hygiene,
            rest: self.rest,
        }
    }

    pub fn set_needs(&mut self, needs: NeedTracker) {
        self.feed = needs.feed;
        self.play = needs.play;
        self.hygiene = needs.hygiene;
        self.rest = needs.rest;
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_micro_opt(3, 4, 5, 123456)
            .unwrap()
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(format_timestamp(&t0()), "2024-01-02 03:04:05.123456");

        let whole = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(3, 4, 5).unwrap();
        assert_eq!(format_timestamp(&whole), "2024-01-02 03:04:05.000000");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert_eq!(parse_timestamp("2024-01-02 03:04:05.123456").unwrap(), t0());

        let whole = parse_timestamp("2024-01-02 03:04:05").unwrap();
        assert_eq!(whole, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(3, 4, 5).unwrap());

        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_new_state_defaults() {
        let state = PetState::new(t0());
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.level, 0);
        assert_eq!(state.created_at, t0());
        assert!(!state.feed.satisfied);
        assert!(!state.hygiene.satisfied);
        assert!(state.rest.satisfied);
    }

    #[test]
    fn test_json_round_trip() {
        let mut state = PetState::new(t0());
        state.feed.set(true, t0() + Duration::minutes(3));
        state.lives = 2;
        state.level = 7;

        let json = state.to_json().unwrap();
        let back = PetState::from_json(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_persisted_field_names() {
        let json = PetState::new(t0()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        for key in ["feed", "play", "hygiene", "rest", "lives", "level", "start"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["rest"][0], 1);
        assert_eq!(value["start"], "2024-01-02 03:04:05.123456");
    }

    #[test]
    fn test_reads_legacy_save() {
        let legacy = r#"{
            "eat": [1, "2024-01-02 03:04:05.123456"],
            "play": [0, "2024-01-02 03:04:05"],
            "poop": [1, "2024-01-02 03:04:05.123456"],
            "sleep": [0, "2024-01-02 03:04:05.123456"],
            "live": 3,
            "lvl": 1,
            "start": "2024-01-01 00:00:00.000001"
        }"#;

        let state = PetState::from_json(legacy).unwrap();
        assert!(state.feed.satisfied);
        assert!(state.hygiene.satisfied);
        assert!(!state.rest.satisfied);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_lives_clamped_on_load() {
        let mut state = PetState::new(t0());
        state.lives = 9;
        let json = serde_json::to_string(&state).unwrap();

        assert_eq!(PetState::from_json(&json).unwrap().lives, MAX_LIVES);
    }

    #[test]
    fn test_out_of_range_counters_are_clamped() {
        let json = PetState::new(t0()).to_json().unwrap();

        let high = json.replace("\"lives\":5", "\"lives\":300");
        assert_eq!(PetState::from_json(&high).unwrap().lives, MAX_LIVES);

        let negative = json
            .replace("\"lives\":5", "\"lives\":-1")
            .replace("\"level\":0", "\"level\":-4");
        let state = PetState::from_json(&negative).unwrap();
        assert_eq!(state.lives, 0);
        assert_eq!(state.level, 0);
        assert_eq!(state.feed, PetState::new(t0()).feed);
    }

    #[test]
    fn test_corrupt_json_is_error() {
        assert!(PetState::from_json("{\"feed\": ").is_err());
        assert!(PetState::from_json("{}").is_err());
    }
}
