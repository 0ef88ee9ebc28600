//! Single-user weekly habit tracker.
//!
//! The whole collection lives in one JSON file. Each request loads it,
//! applies at most one mutation, and writes it back.
//!
//! - **[`core`]**: Pure logic (weekday record, add/toggle/delete, percentages,
//!   invariants). No I/O, no clock.
//! - **[`io`]**: The [`io::store::HabitStore`] seam, its JSON file
//!   implementation, and `habits.toml` configuration.
//!
//! [`request`] ties the two together for the CLI and the web server.

pub mod core;
pub mod io;
pub mod logging;
pub mod request;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
