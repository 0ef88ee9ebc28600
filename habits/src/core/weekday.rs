//! Canonical weekdays and the fixed seven-slot completion record.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// One of the seven canonical weekdays, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in canonical order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Full label as stored on disk and submitted by forms.
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Three-letter column label (`Mon`, `Tue`, ...).
    pub fn short_label(self) -> &'static str {
        &self.as_str()[..3]
    }

    /// Position in canonical order (Monday = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_chrono(day: chrono::Weekday) -> Self {
        Self::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the exact full label. Case-sensitive: `"monday"` is not a weekday.
impl FromStr for Weekday {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| anyhow!("unknown weekday '{}'", s))
    }
}

/// Completion flags for the seven canonical weekdays.
///
/// Serialized as a JSON object keyed by full weekday label in canonical
/// order. Deserialization rejects unknown keys and treats missing keys as
/// `false`, so every value always carries exactly seven slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekDays([bool; 7]);

impl WeekDays {
    /// All seven days incomplete.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, day: Weekday) -> bool {
        self.0[day.index()]
    }

    pub fn set(&mut self, day: Weekday, done: bool) {
        self.0[day.index()] = done;
    }

    /// Flip one day and return its new value.
    pub fn toggle(&mut self, day: Weekday) -> bool {
        let slot = &mut self.0[day.index()];
        *slot = !*slot;
        *slot
    }

    pub fn completed(&self) -> usize {
        self.0.iter().filter(|done| **done).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// `(day, done)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, bool)> + '_ {
        Weekday::ALL.into_iter().map(|day| (day, self.get(day)))
    }
}

impl FromIterator<Weekday> for WeekDays {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut days = Self::new();
        for day in iter {
            days.set(day, true);
        }
        days
    }
}

impl Serialize for WeekDays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Weekday::ALL.len()))?;
        for (day, done) in self.iter() {
            map.serialize_entry(day.as_str(), &done)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeekDays {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
        let mut days = WeekDays::new();
        for (label, done) in raw {
            let day = label.parse::<Weekday>().map_err(D::Error::custom)?;
            days.set(day, done);
        }
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_only_exact_labels() {
        assert_eq!("Monday".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("Sunday".parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert!("monday".parse::<Weekday>().is_err());
        assert!("Mon".parse::<Weekday>().is_err());
        assert!("Funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn short_labels_follow_canonical_order() {
        let labels: Vec<&str> = Weekday::ALL.iter().map(|d| d.short_label()).collect();
        assert_eq!(labels, vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }

    #[test]
    fn chrono_weekdays_map_to_same_day() {
        assert_eq!(Weekday::from_chrono(chrono::Weekday::Mon), Weekday::Monday);
        assert_eq!(Weekday::from_chrono(chrono::Weekday::Sun), Weekday::Sunday);
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let mut days = WeekDays::new();
        assert!(days.toggle(Weekday::Friday));
        assert!(!days.toggle(Weekday::Friday));
        assert_eq!(days, WeekDays::new());
    }

    /// Keys must come out in Monday..Sunday order, not alphabetical.
    #[test]
    fn serializes_all_seven_keys_in_canonical_order() {
        let days: WeekDays = [Weekday::Wednesday].into_iter().collect();
        let json = serde_json::to_string(&days).expect("serialize");
        assert_eq!(
            json,
            "{\"Monday\":false,\"Tuesday\":false,\"Wednesday\":true,\"Thursday\":false,\
             \"Friday\":false,\"Saturday\":false,\"Sunday\":false}"
        );
    }

    #[test]
    fn missing_keys_default_to_false() {
        let days: WeekDays = serde_json::from_str("{\"Sunday\":true}").expect("parse");
        assert_eq!(days.completed(), 1);
        assert!(days.get(Weekday::Sunday));
        assert_eq!(days.iter().count(), 7);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = serde_json::from_str::<WeekDays>("{\"Caturday\":true}").unwrap_err();
        assert!(err.to_string().contains("unknown weekday"));
    }
}
