//! gtask - a sigil-driven task manager
//!
//! Tasks are captured from command-line tokens such as
//! `"write report" +work %8 @ tmrw 2pm-4`. The [`parser`] module turns
//! those tokens into a [`parser::TaskDraft`]; [`storage`] persists tasks
//! in `SQLite`.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod output;
pub mod parser;
pub mod storage;
pub mod task;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::{Error, ParseError};
pub use storage::Database;
pub use task::Task;
