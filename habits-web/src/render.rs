//! HTML rendering of the habit page.

use anyhow::Result;
use chrono::Datelike;
use minijinja::{Environment, context};
use serde::Serialize;

use habits::core::habit::{Habit, Habits};
use habits::core::weekday::Weekday;

const INDEX_TEMPLATE: &str = include_str!("templates/index.html");

/// The weekday of the local clock, used to highlight today's column.
pub fn today() -> Weekday {
    Weekday::from_chrono(chrono::Local::now().weekday())
}

#[derive(Debug, Serialize)]
struct DayColumn {
    short: &'static str,
    today: bool,
}

#[derive(Debug, Serialize)]
struct DayCell {
    day: &'static str,
    done: bool,
    today: bool,
}

#[derive(Debug, Serialize)]
struct HabitRow {
    id: u64,
    name: String,
    days: Vec<DayCell>,
    completion: u8,
}

impl HabitRow {
    fn from_habit(habit: &Habit, today: Weekday) -> Self {
        Self {
            id: habit.id,
            name: habit.name.clone(),
            days: habit
                .days
                .iter()
                .map(|(day, done)| DayCell {
                    day: day.as_str(),
                    done,
                    today: day == today,
                })
                .collect(),
            completion: habit.completion(),
        }
    }
}

/// Template engine wrapper around minijinja.
///
/// The template name ends in `.html`, so every interpolated value is
/// HTML-escaped.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render the full page for `habits`, highlighting `today`'s column.
    pub fn render_index(&self, habits: &Habits, today: Weekday) -> Result<String> {
        let columns: Vec<DayColumn> = Weekday::ALL
            .into_iter()
            .map(|day| DayColumn {
                short: day.short_label(),
                today: day == today,
            })
            .collect();
        let rows: Vec<HabitRow> = habits
            .iter()
            .map(|habit| HabitRow::from_habit(habit, today))
            .collect();

        let template = self.env.get_template("index.html")?;
        let rendered = template.render(context! {
            columns => columns,
            habits => rows,
        })?;
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habits::test_support::{habit, habit_with_days};

    #[test]
    fn today_matches_local_clock() {
        let expected = Weekday::from_chrono(chrono::Local::now().weekday());
        let actual = today();
        // tolerate a midnight rollover between the two reads
        let again = Weekday::from_chrono(chrono::Local::now().weekday());
        assert!(actual == expected || actual == again);
    }

    #[test]
    fn empty_collection_renders_empty_state() {
        let renderer = PageRenderer::new().expect("renderer");
        let html = renderer
            .render_index(&Habits::new(), Weekday::Monday)
            .expect("render");
        assert!(html.contains("No habits yet!"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn rows_show_days_percentage_and_delete() {
        let renderer = PageRenderer::new().expect("renderer");
        let habits = Habits::from(vec![
            habit_with_days(1, "Read", &[Weekday::Monday, Weekday::Tuesday, Weekday::Friday]),
            habit(2, "Walk"),
        ]);
        let html = renderer
            .render_index(&habits, Weekday::Wednesday)
            .expect("render");

        assert!(html.contains("Read"));
        assert!(html.contains(">43%<"));
        assert!(html.contains(">0%<"));
        assert_eq!(html.matches("class=\"day-btn completed").count(), 3);
        assert_eq!(html.matches("class=\"day-btn incomplete").count(), 11);
        assert_eq!(html.matches("name=\"delete\"").count(), 2);
        assert!(html.contains("<th class=\"today\">Wed</th>"));
        assert!(!html.contains("No habits yet!"));
    }

    #[test]
    fn habit_names_are_escaped() {
        let renderer = PageRenderer::new().expect("renderer");
        let habits = Habits::from(vec![habit(1, "<script>alert(1)</script>")]);
        let html = renderer
            .render_index(&habits, Weekday::Monday)
            .expect("render");
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
