use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// nx-sandbox: manage the local Nexus artifact testing sandbox
#[derive(Parser, Debug)]
#[command(
    name = "nx-sandbox",
    version,
    about = "Nx Sandbox - Artifact Testing Environment",
    long_about = "Nx Sandbox manages the local testing environment for Nexus artifacts.\n\
                   It lists artifacts from the inventory and environment repositories,\n\
                   reports sandbox health and cleans out stale artifacts.",
    after_help = "EXAMPLES:\n  \
        nx-sandbox list                          All artifacts\n  \
        nx-sandbox list --from-inventory         Inventory artifacts only\n  \
        nx-sandbox list --from-environments      Environment artifacts only\n  \
        nx-sandbox list --layer bff              One layer\n  \
        nx-sandbox list --environment dev1       One environment\n  \
        nx-sandbox info nx-bff-orders            Details for one artifact\n  \
        nx-sandbox status                        Sandbox health report\n  \
        nx-sandbox clean                         Remove stale artifacts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sandbox base directory (defaults to . or .. inside an nx-sandbox checkout)
    #[arg(long, global = true, env = "NX_SANDBOX_BASE_DIR", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available artifacts
    List {
        /// List only artifacts from inventory
        #[arg(long)]
        from_inventory: bool,

        /// List only artifacts from environments
        #[arg(long)]
        from_environments: bool,

        /// Filter by layer (al, bal, bb, bc, bff, ch, tc, xp)
        #[arg(long, value_name = "LAYER")]
        layer: Option<String>,

        /// Filter by environment
        #[arg(long, value_name = "ENV")]
        environment: Option<String>,
    },

    /// Show details about one artifact
    Info {
        /// Artifact name
        name: String,
    },

    /// Show sandbox status
    Status,

    /// Clean sandbox artifacts (test > 7 days, local > 30 days)
    Clean,

    /// Clone artifact from GitHub
    Clone {
        /// GitHub organization
        org: String,

        /// Repository name
        repo: String,

        /// Prepare artifact for testing after cloning
        #[arg(long)]
        prepare_testing: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show effective configuration
    Show,

    /// Write the default configuration file into the base directory
    Init,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
