//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::BuildState;

/// Decision tree skeleton: walk, measure and build the built-in sample tree
#[derive(Parser, Debug)]
#[command(name = "dectree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more: -d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short = 'c', long = "config", global = true, value_hint = ValueHint::FilePath)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk, measure and build the sample tree in one go
    Demo,

    /// List nodes in pre-order
    Walk {
        /// Start at the node with this name instead of the root
        #[arg(long)]
        from: Option<String>,
    },

    /// Show maximum depth and number of leaves
    Measure,

    /// Render the tree
    Tree,

    /// Drive the tree builder over the nodes in pre-order
    Build {
        /// State to start in (splitting, stopping, pruning)
        #[arg(short, long)]
        initial_state: Option<BuildState>,

        /// Let splitting advance to stopping
        #[arg(long)]
        split_advances: bool,

        /// Maximum number of build steps
        #[arg(short, long, default_value_t = 8)]
        steps: usize,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,

    /// Print a commented config template
    Template,

    /// Show the global config file location
    Path,
}
