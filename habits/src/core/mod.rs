//! Deterministic, pure habit logic.
//!
//! Core modules must be free of I/O side effects, including the clock.
//! Timestamps are passed in by callers so results stay reproducible in tests.

pub mod habit;
pub mod invariants;
pub mod progress;
pub mod weekday;
