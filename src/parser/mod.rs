//! Interpreter for sigil-prefixed task arguments.
//!
//! This module turns the tokens given to `gt add` and `gt mod` into a
//! [`TaskDraft`]:
//! - `"Write report" +work %8 @ tmrw 2pm-4pm`
//! - `3 "New title" !old +new @ fri`
//! - `"Standup" @ 9:15am-9:30`

mod lexer;
mod scanner;
mod time;

pub use lexer::{tokenize, Token, TokenKind};
pub use scanner::{parse_task, Mode, TaskDraft, DEFAULT_PRIORITY, LOOKAHEAD};
pub use time::parse_time_window;
