use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use gtask::cli::commands;
use gtask::config::{Config, Paths};
use gtask::core::SystemClock;
use gtask::{logging, Cli, Commands, Database};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        print!("{}", commands::completions(shell));
        return Ok(());
    }

    let paths = Paths::new()?;
    paths.ensure_dirs()?;
    logging::init(&paths.log_file)?;

    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let db_path = config.database_path(&paths);
    let db = Database::open_at(&db_path)
        .with_context(|| format!("cannot use database {}", db_path.display()))?;
    let clock = SystemClock;

    let output = match cli.command {
        Commands::Add { tokens } => commands::add(&db, &clock, &tokens, format)?,
        Commands::Mod { tokens } => commands::modify(&db, &clock, &tokens, format)?,
        Commands::Get { ids } => commands::get(&db, &ids, format)?,
        Commands::List => commands::list(&db, &clock, format)?,
        Commands::Due => commands::due(&db, &clock, format)?,
        Commands::Archived => commands::archived(&db, &clock, format)?,
        Commands::Done { ids } => commands::done(&db, &clock, &ids, format)?,
        Commands::Undo { ids } => commands::undo(&db, &clock, &ids, format)?,
        Commands::Note { id, text } => commands::note(&db, id, &text, format)?,
        Commands::Delete { ids, yes } => {
            let confirm = config.general.confirm_delete && !yes;
            commands::delete(
                &db,
                &ids,
                confirm,
                &mut io::stdin().lock(),
                &mut io::stderr(),
                format,
            )?
        },
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
