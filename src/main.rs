//! # shared-build
//!
//! Relocates the build output of every module of an Android project into one
//! shared directory next to the project, and cleans that directory on demand.
//!
//! ## Usage
//!
//! ```bash
//! # Delete <project>/../../build
//! shared-build -C android clean
//!
//! # Only clean one module, moving it to the trash
//! shared-build -C android clean --subproject app --trash
//!
//! # Show where every module writes its build output
//! shared-build -C android layout
//! ```

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, CleanArgs, Command};
use colored::Colorize;
use humansize::{DECIMAL, format_size};
use shared_build::{
    cleaner::Cleaner,
    config::{BuildConfiguration, BuildFile, BuildSettings, UserConfig, configure},
    output::{CleanOutput, LayoutOutput, RepositoriesOutput},
    scanner::Scanner,
    task::execute,
};
use std::process::exit;

/// Entry point: runs [`inner_main`] and exits with status 1 on any error.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// 1. Parses command-line arguments and loads the user config (if present)
/// 2. Loads the build file and discovers sub-projects it does not list
/// 3. Runs the configuration phase
/// 4. Dispatches to the requested command
fn inner_main() -> Result<()> {
    let args = Cli::parse();
    let json_mode = args.json();

    let user_config = match UserConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            UserConfig::default()
        }
    };

    let project_dir = args.project_dir()?;
    let build_file = BuildFile::load(&args.build_file_path(&project_dir))?;

    let discovered = if build_file.subprojects.is_some() {
        Vec::new()
    } else {
        Scanner::new(args.discovery_options(&user_config))
            .with_quiet(json_mode)
            .discover(&project_dir)
    };

    let settings = BuildSettings::from_build_file(build_file, discovered);
    let config = configure(&project_dir, &settings)?;

    match &args.command {
        Command::Clean(clean_args) => run_clean(&config, clean_args, &user_config, json_mode),
        Command::Layout => run_layout(&config, json_mode),
        Command::Repositories => run_repositories(&config, json_mode),
    }
}

fn run_clean(
    config: &BuildConfiguration,
    clean_args: &CleanArgs,
    user_config: &UserConfig,
    json_mode: bool,
) -> Result<()> {
    let options = clean_args.execution_options(user_config);
    let dry_run = options.dry_run;
    let action = clean_args.action();
    let cleaner = Cleaner::new(options).with_quiet(json_mode);

    if !json_mode {
        println!("{} {}", "🧹 Running".cyan(), action.to_string().bold());
    }

    let reports = execute(&action, config, &cleaner)?;

    if json_mode {
        let output = CleanOutput::new(action.to_string(), dry_run, reports);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        Cleaner::print_summary(&reports);
    }

    Ok(())
}

fn run_layout(config: &BuildConfiguration, json_mode: bool) -> Result<()> {
    if json_mode {
        let output = LayoutOutput::from_config(config);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "📁 Shared build directory:".bold(),
        config.shared_build_dir().display()
    );

    if config.subprojects().is_empty() {
        println!("{}", "✨ No sub-projects found!".green());
        return Ok(());
    }

    config.subprojects().print_summary();

    let total = config.subprojects().get_total_size();
    println!(
        "  💾 Total build output: {}",
        format_size(total, DECIMAL).bright_green().bold()
    );

    Ok(())
}

fn run_repositories(config: &BuildConfiguration, json_mode: bool) -> Result<()> {
    if json_mode {
        let output = RepositoriesOutput::from_config(config);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "📚 Repositories (in lookup order):".bold());
    for (index, repository) in config.repositories().iter().enumerate() {
        match repository.url() {
            Some(url) => println!("  {}. {} {}", index + 1, repository, url.dimmed()),
            None => println!("  {}. {}", index + 1, repository),
        }
    }

    Ok(())
}
