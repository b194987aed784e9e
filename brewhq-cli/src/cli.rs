use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "BrewHQ - requirements and impact analysis workspace")]
pub struct Cli {
    /// Path to the config file
    #[clap(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Name recorded as author of new requirements
    #[clap(long, short = 'u', global = true, env = "BREWHQ_USER")]
    pub user: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Defaults to the interactive shell
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive session
    Shell,

    /// List projects and their repositories
    Projects,

    /// Create a requirement and print its impact analysis
    Analyze {
        /// Requirement name
        #[clap(long)]
        name: String,

        /// Value statement ("As a ... I want ...")
        #[clap(long)]
        value: Option<String>,

        /// Initial acceptance criteria
        #[clap(long)]
        criteria: Option<String>,

        /// Project the requirement belongs to
        #[clap(long, short = 'p', default_value_t = 1)]
        project: u32,

        /// Accept every risk mitigation and impact into the acceptance criteria
        #[clap(long)]
        accept_all: bool,
    },

    /// Ask Brewer a one-off question
    Ask {
        /// The question
        #[clap(required = true)]
        message: Vec<String>,
    },

    /// Show the page and breadcrumb trail for a path
    Routes {
        /// A path such as /projects/1/requirements
        path: String,
    },

    /// Write the current settings to the config file
    Init {
        /// Overwrite an existing config file
        #[clap(long)]
        force: bool,
    },

    /// Export projects and requirements
    Export {
        /// Output format (json, yaml, markdown)
        #[clap(long, short = 'f', default_value = "markdown")]
        format: String,

        /// Output file; prints to stdout when omitted
        #[clap(long, short = 'o')]
        output: Option<PathBuf>,
    },
}
