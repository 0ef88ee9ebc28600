//! Test-only helpers for constructing habits and stores.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use crate::core::habit::{CREATED_AT_FORMAT, Habit, Habits};
use crate::core::weekday::{WeekDays, Weekday};
use crate::io::config::CorruptDataPolicy;
use crate::io::store::{HabitStore, JsonFileStore};

/// Deterministic creation time: Monday 2025-01-06 08:30:00.
pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 6)
        .and_then(|date| date.and_hms_opt(8, 30, 0))
        .expect("valid fixed time")
}

/// Create a habit with all days incomplete.
pub fn habit(id: u64, name: &str) -> Habit {
    habit_with_days(id, name, &[])
}

/// Create a habit with the given days completed.
pub fn habit_with_days(id: u64, name: &str, done: &[Weekday]) -> Habit {
    Habit {
        id,
        name: name.to_string(),
        days: done.iter().copied().collect::<WeekDays>(),
        created_at: fixed_time().format(CREATED_AT_FORMAT).to_string(),
    }
}

/// In-memory store that counts saves.
#[derive(Default)]
pub struct MemoryStore {
    habits: Mutex<Habits>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new(habits: Habits) -> Self {
        Self {
            habits: Mutex::new(habits),
            saves: AtomicUsize::new(0),
        }
    }

    /// Current stored collection.
    pub fn snapshot(&self) -> Habits {
        self.habits.lock().expect("store lock").clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl HabitStore for MemoryStore {
    fn load(&self) -> Result<Habits> {
        let habits = self.habits.lock().map_err(|_| anyhow!("store lock poisoned"))?;
        Ok(habits.clone())
    }

    fn save(&self, habits: &Habits) -> Result<()> {
        let mut stored = self.habits.lock().map_err(|_| anyhow!("store lock poisoned"))?;
        *stored = habits.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Temporary directory holding a `data.json` file store.
pub struct TempStore {
    dir: TempDir,
    pub store: JsonFileStore,
}

impl TempStore {
    pub fn new(on_corrupt: CorruptDataPolicy) -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path().join("data.json"), on_corrupt);
        Ok(Self { dir, store })
    }

    pub fn dir(&self) -> &std::path::Path {
        self.dir.path()
    }
}
