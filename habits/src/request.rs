//! One request's Load → mutate → Save cycle.

use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::core::weekday::Weekday;
use crate::io::store::HabitStore;

/// A single mutation submitted by a client.
///
/// `day` stays textual until applied: an unknown label is not an error, it
/// just leaves the collection unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Add { name: String },
    Toggle { id: u64, day: String },
    Delete { id: u64 },
}

/// What a mutation actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Added(u64),
    Toggled { id: u64, day: Weekday, done: bool },
    Deleted(usize),
    /// Input was absorbed without changing anything.
    Ignored,
}

/// Load the collection, apply `mutation`, and save it back.
///
/// The collection is saved even when nothing changed.
pub fn apply_mutation(
    store: &dyn HabitStore,
    mutation: &Mutation,
    now: NaiveDateTime,
) -> Result<MutationOutcome> {
    let mut habits = store.load()?;

    let outcome = match mutation {
        Mutation::Add { name } => habits
            .add(name, now)
            .map_or(MutationOutcome::Ignored, MutationOutcome::Added),
        Mutation::Toggle { id, day } => match day.parse::<Weekday>() {
            Ok(day) => habits
                .toggle(*id, day)
                .map_or(MutationOutcome::Ignored, |done| MutationOutcome::Toggled {
                    id: *id,
                    day,
                    done,
                }),
            Err(err) => {
                debug!(id, error = %err, "toggle ignored");
                MutationOutcome::Ignored
            }
        },
        Mutation::Delete { id } => match habits.delete(*id) {
            0 => MutationOutcome::Ignored,
            removed => MutationOutcome::Deleted(removed),
        },
    };

    store.save(&habits)?;
    info!(?mutation, ?outcome, "mutation applied");
    Ok(outcome)
}
