//! I/O helpers: habit persistence and configuration.

pub mod config;
pub mod store;
