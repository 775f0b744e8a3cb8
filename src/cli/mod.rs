//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! interactapi binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::LoginProvider;

/// Interacta API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "interactapi", about = "Interacta API CLI", version)]
pub struct Cli {
    /// Settings file in TOML format; `INTERACTA_*` variables are used when absent.
    #[arg(long = "env", short = 'e', global = true, env = "INTERACTA_SETTINGS_FILE")]
    pub settings_file: Option<PathBuf>,

    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log API calls and other debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and report the login mode.
    Login,

    /// List the posts of a community.
    ListPosts {
        /// Community id.
        community: u64,

        /// Only posts whose title contains this text.
        #[arg(long)]
        title: Option<String>,

        /// Fetch every page instead of the first one.
        #[arg(long)]
        all: bool,
    },

    /// Show a single post.
    GetPost {
        /// Post id.
        id: u64,
    },

    /// List users with login statistics.
    ListUsers {
        /// Include deleted and blocked users.
        #[arg(long)]
        show_not_active: bool,

        /// Full-text filter on first name, last name and e-mail.
        #[arg(long)]
        filter: Option<String>,

        /// Only users with these login providers.
        #[arg(long = "login-provider", value_enum)]
        login_providers: Vec<ProviderArg>,

        /// Only users whose external accounts differ from the contact e-mail.
        #[arg(long)]
        divergent_contact_email: bool,
    },

    /// List groups.
    ListGroups {
        /// Full-text filter on name and e-mail.
        #[arg(long)]
        filter: Option<String>,

        /// Include deleted groups.
        #[arg(long)]
        show_deleted: bool,
    },

    /// Show the post definition of a community.
    Community {
        /// Community id.
        #[arg(required_unless_present = "name")]
        id: Option<u64>,

        /// Community name as configured in the settings file.
        #[arg(long, short = 'n', conflicts_with = "id")]
        name: Option<String>,

        /// Show only the custom field definitions.
        #[arg(long)]
        fields: bool,
    },

    /// Show the resolved settings with secrets hidden.
    EchoSettings,
}

/// Login providers accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderArg {
    Google,
    Microsoft,
    Custom,
}

impl From<ProviderArg> for LoginProvider {
    fn from(value: ProviderArg) -> Self {
        match value {
            ProviderArg::Google => LoginProvider::Google,
            ProviderArg::Microsoft => LoginProvider::Microsoft,
            ProviderArg::Custom => LoginProvider::Custom,
        }
    }
}
