use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "gt")]
#[command(about = "A sigil-driven task manager for the terminal")]
#[command(long_about = "gt - A sigil-driven task manager

Tasks are described with a plain description followed by sigil tokens:

  +tag        add a tag
  !tag        remove a tag (mod only)
  %N          set priority (1-10, default 5)
  @ EXPR...   schedule: the next three tokens, dates and times

QUICK START:
  gt add \"write report\" +work %8 @ tmrw 2pm-4
  gt mod 3 !work +home @ fri
  gt due                    Show unfinished tasks
  gt done 3                 Finish task 3

DATES:
  now, eod, tmrw, yest, eow, sun..sat (next occurrence),
  DD-MM-YYYY, YYYY-MM-DD

TIMES:
  2pm, 14:30, 9am-11, 2:30pm-4pm

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    ///
    /// The first plain token is the description; the rest are sigils.
    ///
    /// # Examples
    ///
    ///   gt add "buy milk" +errands @ tmrw
    ///   gt add "standup" +work %7 @ mon 9am-10
    ///   gt add "dentist" @ 2024-12-03 2:30pm
    #[command(alias = "a")]
    Add {
        /// Description followed by sigil tokens
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "TOKENS"
        )]
        tokens: Vec<String>,
    },

    /// Modify a task
    ///
    /// Takes the task id followed by an optional new description and
    /// sigils. A new schedule replaces both start and end.
    ///
    /// # Examples
    ///
    ///   gt mod 3 "write final report"
    ///   gt mod 3 !work +home %2
    ///   gt mod 3 @ fri 4pm
    #[command(name = "mod", alias = "m")]
    Mod {
        /// Task id followed by sigil tokens
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "TOKENS"
        )]
        tokens: Vec<String>,
    },

    /// Show task details including tags and notes
    #[command(alias = "g")]
    Get {
        /// Task ids
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// List all tasks
    #[command(alias = "ls")]
    List,

    /// List unfinished tasks
    Due,

    /// List finished tasks
    Archived,

    /// Mark tasks finished
    Done {
        /// Task ids
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Mark finished tasks as pending again
    Undo {
        /// Task ids
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Attach a note to a task
    ///
    /// Notes cannot be edited once added.
    Note {
        /// Task id
        id: i64,

        /// Note text
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Delete tasks
    ///
    /// Asks for confirmation unless --yes is given or
    /// `general.confirm_delete` is false.
    #[command(alias = "rm")]
    Delete {
        /// Task ids
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print a shell completion script
    ///
    /// Example: gt completions bash > ~/.bash_completion.d/gt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
