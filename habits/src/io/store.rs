//! Habit collection load/save.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::core::habit::Habits;
use crate::core::invariants::validate_invariants;
use crate::io::config::CorruptDataPolicy;

/// Persistent home of the habit collection.
///
/// Every request loads the full collection, mutates it, and saves it back.
/// Implementations do not merge: the last `save` wins.
pub trait HabitStore: Send + Sync {
    fn load(&self) -> Result<Habits>;
    fn save(&self, habits: &Habits) -> Result<()>;
}

/// Single pretty-printed JSON file holding the habit array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    on_corrupt: CorruptDataPolicy,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, on_corrupt: CorruptDataPolicy) -> Self {
        Self {
            path: path.into(),
            on_corrupt,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HabitStore for JsonFileStore {
    fn load(&self) -> Result<Habits> {
        load_habits(&self.path, self.on_corrupt)
    }

    fn save(&self, habits: &Habits) -> Result<()> {
        write_habits(&self.path, habits)
    }
}

/// Load habits from disk.
///
/// A missing file is an empty collection. Content that does not parse is
/// handled according to `on_corrupt`. Other read failures are errors.
pub fn load_habits(path: &Path, on_corrupt: CorruptDataPolicy) -> Result<Habits> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no habit file, starting empty");
            return Ok(Habits::new());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("read habits {}", path.display()));
        }
    };

    let habits = match serde_json::from_str::<Habits>(&contents) {
        Ok(habits) => habits,
        Err(err) => match on_corrupt {
            CorruptDataPolicy::Reset => {
                warn!(path = %path.display(), error = %err, "habit file unreadable, treating as empty");
                return Ok(Habits::new());
            }
            CorruptDataPolicy::Reject => {
                return Err(err).with_context(|| format!("parse habits {}", path.display()));
            }
        },
    };

    for problem in validate_invariants(&habits) {
        warn!(path = %path.display(), problem = %problem, "habit file invariant violated");
    }
    debug!(path = %path.display(), count = habits.len(), "habits loaded");
    Ok(habits)
}

/// Atomically write habits to disk (temp file + rename).
///
/// Each call writes through its own temp file in the target directory, so
/// overlapping saves never share a partial file. The last rename wins.
pub fn write_habits(path: &Path, habits: &Habits) -> Result<()> {
    debug!(path = %path.display(), count = habits.len(), "writing habits");
    let mut buf = serde_json::to_string_pretty(habits).context("serialize habits")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp habits in {}", parent.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("write temp habits {}", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("replace habits {}", path.display()))?;
    Ok(())
}
