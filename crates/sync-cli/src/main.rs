//! Settings Sync CLI
//!
//! Thin command layer over the sync engine: wires the editor CLI, the
//! file-backed settings store, and the masked terminal prompt into
//! `download()`/`upload()`.

mod cli;
mod error;
mod host;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use dialoguer::Password;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use sync_core::{Credential, FileSettingsStore, SyncConfig, SyncEngine, TokenStore, UploadOutcome};
use sync_fs::DataLayout;
use sync_git::Provisioner;

use cli::{Cli, Commands, TokenAction};
use error::{CliError, Result};
use host::{EditorCli, MaskedPrompt};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let layout = DataLayout::new(data_dir(&cli)?);

    match &cli.command {
        Commands::Download => {
            let engine = build_engine(&cli, &layout)?;
            engine.download()?;
            println!("{} Settings downloaded successfully", "✓".green());
            Ok(())
        }
        Commands::Upload => {
            let engine = build_engine(&cli, &layout)?;
            match engine.upload()? {
                UploadOutcome::NoChanges => {
                    println!("{} Already up to date", "·".dimmed());
                }
                UploadOutcome::Pushed => {
                    println!("{} Settings uploaded successfully", "✓".green());
                }
            }
            Ok(())
        }
        Commands::Status => cmd_status(&layout),
        Commands::Token { action } => cmd_token(&layout, action),
    }
}

fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    dirs::config_dir()
        .map(|dir| dir.join("settings-sync"))
        .ok_or_else(|| CliError::user("could not determine a config directory; pass --data-dir"))
}

fn settings_file(cli: &Cli) -> Result<PathBuf> {
    if let Some(path) = &cli.settings_file {
        return Ok(path.clone());
    }
    dirs::config_dir()
        .map(|dir| dir.join("Code").join("User").join("settings.json"))
        .ok_or_else(|| {
            CliError::user("could not locate the editor settings file; pass --settings-file")
        })
}

fn build_engine(cli: &Cli, layout: &DataLayout) -> Result<SyncEngine> {
    let config = SyncConfig::load(&layout.config_path())?;
    Ok(SyncEngine::new(
        layout.clone(),
        config,
        Box::new(FileSettingsStore::new(settings_file(cli)?)),
        Box::new(EditorCli::new(cli.editor_bin.clone())),
        Box::new(MaskedPrompt),
    ))
}

fn cmd_status(layout: &DataLayout) -> Result<()> {
    let config = SyncConfig::load(&layout.config_path())?;
    let tokens = TokenStore::new(layout.token_path());
    let state = Provisioner::new(layout.repo_path()).probe();

    println!("{}", "Settings Sync".bold());
    match config.remote_spec() {
        Ok(remote) => println!(
            "  {}: {}",
            "Source".dimmed(),
            remote.authenticated_url("***").cyan()
        ),
        Err(e) => println!("  {}: {}", "Source".dimmed(), e.to_string().yellow()),
    }
    let token_state = if tokens.read()?.is_some() {
        "stored".green()
    } else {
        "not stored".yellow()
    };
    println!("  {}: {}", "Token".dimmed(), token_state);
    println!("  {}: {:?}", "Working copy".dimmed(), state);
    Ok(())
}

fn cmd_token(layout: &DataLayout, action: &TokenAction) -> Result<()> {
    let tokens = TokenStore::new(layout.token_path());
    match action {
        TokenAction::Set => {
            let input = Password::new()
                .with_prompt("GitHub Personal Access Token")
                .interact()?;
            tokens.write_guarded(&Credential::new(input))?;
            println!("{} Token stored", "✓".green());
        }
        TokenAction::Clear => {
            tokens.clear()?;
            println!("{} Token cleared", "✓".green());
        }
    }
    Ok(())
}
