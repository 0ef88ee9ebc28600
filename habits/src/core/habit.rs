//! Habit records and the ordered habit collection.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::progress::completion_percentage;
use crate::core::weekday::{WeekDays, Weekday};

/// Format of `created_at` (`2025-01-31 08:15:00`).
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One tracked behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: u64,
    pub name: String,
    pub days: WeekDays,
    /// Display-only; kept verbatim from disk.
    pub created_at: String,
}

impl Habit {
    /// Weekly completion percentage (0..=100).
    pub fn completion(&self) -> u8 {
        completion_percentage(self.days.as_slice())
    }
}

/// Ordered habit collection, serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Habits(Vec<Habit>);

impl Habits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Habit> {
        self.0.iter()
    }

    pub fn get(&self, id: u64) -> Option<&Habit> {
        self.0.iter().find(|habit| habit.id == id)
    }

    /// Next id to assign: one past the largest id present, `1` when empty.
    ///
    /// `None` once the largest id is `u64::MAX`.
    pub fn next_id(&self) -> Option<u64> {
        self.0
            .iter()
            .map(|habit| habit.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
    }

    /// Append a habit named `name` (trimmed) with all days incomplete.
    ///
    /// Returns the assigned id, or `None` when the trimmed name is empty or
    /// ids are exhausted.
    pub fn add(&mut self, name: &str, now: NaiveDateTime) -> Option<u64> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = self.next_id()?;
        self.0.push(Habit {
            id,
            name: name.to_string(),
            days: WeekDays::new(),
            created_at: now.format(CREATED_AT_FORMAT).to_string(),
        });
        Some(id)
    }

    /// Flip `day` on the first habit with `id`.
    ///
    /// Returns the new flag, or `None` when no habit has that id.
    pub fn toggle(&mut self, id: u64, day: Weekday) -> Option<bool> {
        self.0
            .iter_mut()
            .find(|habit| habit.id == id)
            .map(|habit| habit.days.toggle(day))
    }

    /// Remove every habit with `id`, keeping the order of the rest.
    ///
    /// Returns how many habits were removed.
    pub fn delete(&mut self, id: u64) -> usize {
        let before = self.0.len();
        self.0.retain(|habit| habit.id != id);
        before - self.0.len()
    }
}

impl From<Vec<Habit>> for Habits {
    fn from(habits: Vec<Habit>) -> Self {
        Self(habits)
    }
}

impl<'a> IntoIterator for &'a Habits {
    type Item = &'a Habit;
    type IntoIter = std::slice::Iter<'a, Habit>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
