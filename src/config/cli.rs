//! Command-line argument definitions for tibctl.
//!
//! The command tree is declared up front as plain data. Nothing is registered
//! or executed while the tree is built, so its shape can be inspected through
//! `Cli::command()` in tests.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

use super::OutputFormat;

/// Command-line interface for tibctl.
#[derive(Debug, Parser)]
#[command(name = "tibctl")]
#[command(author, version, about = "Command-line client for the tib API")]
pub struct Cli {
    /// Global options shared by every command.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute. Prints help when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options accepted by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Access token.
    #[arg(long, global = true)]
    pub secret: Option<String>,

    /// Base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Profile [default: default].
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Configuration file.
    #[arg(short = 'c', long, global = true)]
    pub config_file: Option<Utf8PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage profiles.
    #[command(after_help = PROFILE_EXAMPLES)]
    Profile(ProfileArgs),

    /// Show where configuration is read from.
    Config,

    /// Print the version.
    Version,
}

const PROFILE_EXAMPLES: &str = "\
Examples:
  tibctl profile
  tibctl profile --output=json
  tibctl profile --output=yaml
  tibctl profile --output=json --query=\"[].id\"";

/// Arguments for the `profile` command group.
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileArgs {
    /// Output and query options.
    #[command(flatten)]
    pub view: ViewArgs,

    /// Profile operation. Prints the resolved configuration when omitted.
    #[command(subcommand)]
    pub command: Option<ProfileCommand>,
}

/// Output shaping options.
#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Output format [default: table].
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Query.
    #[arg(short, long)]
    pub query: Option<String>,
}

/// Operations in the `profile` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ProfileCommand {
    /// List profiles.
    List,
    /// Create a profile.
    Create,
    /// Show a profile.
    Get,
    /// Update a profile.
    Update,
    /// Delete a profile.
    Delete,
    /// Save the current settings as a profile.
    Save,
}

impl ProfileCommand {
    /// The subcommand name as typed on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Save => "save",
        }
    }
}
