//! Storage layer for gtask.
//!
//! `SQLite` persistence for tasks, their notes, and their tags.

mod database;
mod migrations;
mod tasks;

pub use database::Database;
pub use tasks::TaskFilter;
