//! Command-line front end for the habit file.
//!
//! Runs the same Load → mutate → Save cycle as the web server, one mutation
//! per invocation.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use habits::core::habit::Habits;
use habits::core::invariants::validate_invariants;
use habits::core::weekday::Weekday;
use habits::io::config::{DEFAULT_CONFIG_FILE, HabitsConfig, load_config};
use habits::io::store::{HabitStore, JsonFileStore};
use habits::request::{Mutation, MutationOutcome, apply_mutation};

#[derive(Parser)]
#[command(name = "habits", version, about = "Track weekly habits in a JSON file")]
struct Cli {
    /// Config file (TOML). Missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Habit data file; overrides `data_file` from the config.
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a habit and print its id.
    Add {
        /// Habit name (surrounding whitespace is trimmed).
        name: String,
    },
    /// Flip one day's completion for a habit.
    Toggle {
        id: u64,
        /// Full weekday name, e.g. `Monday`.
        day: String,
    },
    /// Delete a habit.
    Delete { id: u64 },
    /// Print all habits with their weekly progress.
    List,
    /// Check the habit file for duplicate ids and bad names.
    Validate,
}

fn main() {
    habits::logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let store = open_store(&cli)?;
    match cli.command {
        Command::Add { name } => cmd_mutate(&store, Mutation::Add { name }),
        Command::Toggle { id, day } => cmd_mutate(&store, Mutation::Toggle { id, day }),
        Command::Delete { id } => cmd_mutate(&store, Mutation::Delete { id }),
        Command::List => cmd_list(&store),
        Command::Validate => cmd_validate(&store),
    }
}

fn open_store(cli: &Cli) -> Result<JsonFileStore> {
    let mut cfg: HabitsConfig = load_config(&cli.config).context("load config")?;
    if let Some(data_file) = &cli.data_file {
        cfg.data_file = data_file.clone();
    }
    cfg.validate()?;
    Ok(cfg.store())
}

fn cmd_mutate(store: &JsonFileStore, mutation: Mutation) -> Result<()> {
    let now = chrono::Local::now().naive_local();
    match apply_mutation(store, &mutation, now)? {
        MutationOutcome::Added(id) => println!("{}", id),
        MutationOutcome::Toggled { id, day, done } => {
            println!("{} {} {}", id, day, if done { "done" } else { "open" });
        }
        MutationOutcome::Deleted(count) => println!("deleted {}", count),
        MutationOutcome::Ignored => println!("unchanged"),
    }
    Ok(())
}

fn cmd_list(store: &JsonFileStore) -> Result<()> {
    let habits = store.load()?;
    print!("{}", render_table(&habits));
    Ok(())
}

fn cmd_validate(store: &JsonFileStore) -> Result<()> {
    let habits = store.load()?;
    let errors = validate_invariants(&habits);
    if !errors.is_empty() {
        bail!("invariant violations:\n- {}", errors.join("\n- "));
    }
    println!("ok ({} habits)", habits.len());
    Ok(())
}

/// Plain-text table: id, one column per weekday, percentage, name.
fn render_table(habits: &Habits) -> String {
    if habits.is_empty() {
        return "No habits yet!\n".to_string();
    }
    let mut out = String::from("  ID");
    for day in Weekday::ALL {
        out.push_str(&format!(" {}", day.short_label()));
    }
    out.push_str("    %  Habit\n");
    for habit in habits {
        out.push_str(&format!("{:>4}", habit.id));
        for (_, done) in habit.days.iter() {
            out.push_str(if done { "   x" } else { "   ." });
        }
        out.push_str(&format!(" {:>4}  {}\n", habit.completion(), habit.name));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use habits::test_support::{habit, habit_with_days};

    #[test]
    fn parse_toggle() {
        let cli = Cli::parse_from(["habits", "toggle", "3", "Friday"]);
        assert!(matches!(cli.command, Command::Toggle { id: 3, ref day } if day == "Friday"));
        assert_eq!(cli.config, PathBuf::from("habits.toml"));
    }

    #[test]
    fn parse_global_data_file_after_subcommand() {
        let cli = Cli::parse_from(["habits", "list", "--data-file", "x.json"]);
        assert!(matches!(cli.command, Command::List));
        assert_eq!(cli.data_file, Some(PathBuf::from("x.json")));
    }

    #[test]
    fn parse_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["habits", "delete", "abc"]).is_err());
    }

    #[test]
    fn table_for_empty_collection() {
        assert_eq!(render_table(&Habits::new()), "No habits yet!\n");
    }

    #[test]
    fn table_rows_show_flags_and_percentage() {
        let habits = Habits::from(vec![
            habit_with_days(1, "Read", &[Weekday::Monday]),
            habit(2, "Walk"),
        ]);
        let table = render_table(&habits);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines[0],
            "  ID Mon Tue Wed Thu Fri Sat Sun    %  Habit"
        );
        assert_eq!(
            lines[1],
            "   1   x   .   .   .   .   .   .   14  Read"
        );
        assert_eq!(
            lines[2],
            "   2   .   .   .   .   .   .   .    0  Walk"
        );
    }
}
