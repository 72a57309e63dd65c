//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Settings Sync - keep editor settings and extensions in a git repository
#[derive(Parser, Debug)]
#[command(name = "settings-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Data directory (credential, working copy, config.toml)
    #[arg(long, global = true, env = "SETTINGS_SYNC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path of the editor's user settings.json
    #[arg(long, global = true)]
    pub settings_file: Option<PathBuf>,

    /// Editor CLI binary used to list/install/uninstall extensions
    #[arg(long, global = true, default_value = "code")]
    pub editor_bin: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Replace local settings and extensions with the repository's main branch
    Download,

    /// Force-push current settings and extensions to the repository
    Upload,

    /// Show configuration, credential, and working copy state
    Status,

    /// Manage the stored access token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

/// Token subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TokenAction {
    /// Prompt for a new token and store it
    Set,
    /// Delete the stored token
    Clear,
}
