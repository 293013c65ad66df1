use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use marktask::cli::args::{Cli, Commands};
use marktask::cli::commands;
use marktask::config::{Config, Paths};
use marktask::storage::TaskStore;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    // A second logger can only fail to register; keep going without it.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let paths = match cli.home {
        Some(root) => Paths::with_root(root),
        None => Paths::new()?,
    };
    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();

    let paths = match &cli.data_dir {
        Some(dir) => paths.with_data_dir(dir),
        None => config.apply_to_paths(paths),
    };
    log::debug!("Using task files in {}", paths.data_dir().display());

    let format = cli.output.unwrap_or(config.general.default_output);
    let now = Local::now().naive_local();
    let today = now.date();

    if let Commands::Completions { shell } = cli.command {
        print!("{}", commands::completions(shell));
        return Ok(());
    }

    let mut store = TaskStore::open(&paths)
        .with_context(|| format!("Failed to load tasks from {}", paths.data_dir().display()))?;
    let normalizer = config.parsing.normalizer();

    let output = match cli.command {
        Commands::Add(args) => commands::add(&mut store, &normalizer, args, now, format)?,
        Commands::New(args) => commands::new_task(&mut store, args, format)?,
        Commands::List(args) => commands::list(&store, args, today, format)?,
        Commands::Show { id } => commands::show(&store, id, format)?,
        Commands::Edit(args) => {
            commands::edit(&mut store, args, normalizer.resolver(), now, format)?
        }
        Commands::Delete { id } => commands::delete(&mut store, id, format)?,
        Commands::Done { id } => commands::done(&mut store, id, today, format)?,
        Commands::Completed => commands::completed(&store, today, format)?,
        Commands::Categories => commands::categories(&store, today, format)?,
        Commands::Move { from, to } => commands::move_task(&mut store, from, to, today, format)?,
        Commands::Stats => commands::stats(&store, today, format)?,
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{}", output.trim_end());
    }
    Ok(())
}
