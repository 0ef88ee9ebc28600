//! Semantic invariants not expressible in the JSON file layout.

use std::collections::HashSet;

use crate::core::habit::Habits;

/// Check semantic invariants of a loaded collection:
/// - ids are positive
/// - no duplicate ids
/// - names are non-empty and already trimmed
pub fn validate_invariants(habits: &Habits) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, habit) in habits.iter().enumerate() {
        let at = format!("habit #{} (id {})", index, habit.id);
        if habit.id == 0 {
            errors.push(format!("{}: id must be > 0", at));
        }
        if !seen.insert(habit.id) {
            errors.push(format!("{}: duplicate id", at));
        }
        if habit.name.trim().is_empty() {
            errors.push(format!("{}: name must not be empty", at));
        } else if habit.name.trim() != habit.name {
            errors.push(format!("{}: name has surrounding whitespace", at));
        }
    }

    errors
}
