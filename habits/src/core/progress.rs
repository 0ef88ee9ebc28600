//! Weekly completion arithmetic.

/// Share of `flags` that are set, as a rounded integer percentage.
///
/// Rounds half up: 3 of 7 is 42.86% and yields 43. An empty slice yields 0.
pub fn completion_percentage(flags: &[bool]) -> u8 {
    let total = flags.len();
    if total == 0 {
        return 0;
    }
    let completed = flags.iter().filter(|done| **done).count();
    // round(100 * completed / total) without floats
    ((200 * completed + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::weekday::{WeekDays, Weekday};

    fn week_with(count: usize) -> WeekDays {
        Weekday::ALL.into_iter().take(count).collect()
    }

    #[test]
    fn all_false_is_zero_and_all_true_is_hundred() {
        assert_eq!(completion_percentage(week_with(0).as_slice()), 0);
        assert_eq!(completion_percentage(week_with(7).as_slice()), 100);
    }

    #[test]
    fn partial_weeks_round_to_nearest() {
        let expected = [0, 14, 29, 43, 57, 71, 86, 100];
        for (count, want) in expected.into_iter().enumerate() {
            assert_eq!(
                completion_percentage(week_with(count).as_slice()),
                want,
                "{} of 7 days",
                count
            );
        }
    }

    #[test]
    fn halves_round_up() {
        let one_of_eight = [true, false, false, false, false, false, false, false];
        assert_eq!(completion_percentage(&one_of_eight), 13);
        assert_eq!(completion_percentage(&[true, false]), 50);
    }

    #[test]
    fn empty_slice_is_zero() {
        assert_eq!(completion_percentage(&[]), 0);
    }
}
