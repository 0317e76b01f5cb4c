use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use nx_sandbox::cli::args::{Cli, Commands, CompletionShell, ConfigAction, OutputFormat};
use nx_sandbox::cli::output;
use nx_sandbox::common::config::Config;
use nx_sandbox::common::layout::resolve_base_dir;
use nx_sandbox::scanner::artifact::{ArtifactFilter, ArtifactSource, Layer};
use nx_sandbox::SandboxManager;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let filter = if cli.verbose {
        EnvFilter::new("nx_sandbox=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match cli.command {
        Commands::List {
            from_inventory,
            from_environments,
            ref layer,
            ref environment,
        } => cmd_list(
            &cli,
            from_inventory,
            from_environments,
            layer.clone(),
            environment.clone(),
        ),

        Commands::Info { ref name } => cmd_info(&cli, name),

        Commands::Status => cmd_status(&cli),

        Commands::Clean => cmd_clean(&cli),

        Commands::Clone {
            ref org,
            ref repo,
            prepare_testing,
        } => cmd_clone(&cli, org, repo, prepare_testing),

        Commands::Config { ref action } => cmd_config(&cli, action),

        Commands::Completions { ref shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                CompletionShell::Bash => clap_complete::Shell::Bash,
                CompletionShell::Zsh => clap_complete::Shell::Zsh,
                CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "nx-sandbox", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn open_manager(cli: &Cli) -> Result<SandboxManager> {
    let base_dir = resolve_base_dir(cli.base_dir.as_deref());
    tracing::debug!("using sandbox base directory {}", base_dir.display());
    SandboxManager::open(&base_dir)
        .with_context(|| format!("Failed to open sandbox at {}", base_dir.display()))
}

fn is_human(cli: &Cli) -> bool {
    matches!(cli.format, OutputFormat::Human)
}

// ─── List ─────────────────────────────────────────────────────────────────────

fn cmd_list(
    cli: &Cli,
    from_inventory: bool,
    from_environments: bool,
    layer: Option<String>,
    environment: Option<String>,
) -> Result<()> {
    let manager = open_manager(cli)?;

    let source = if from_inventory {
        Some(ArtifactSource::Inventory)
    } else if from_environments {
        Some(ArtifactSource::Environment)
    } else {
        None
    };
    if let Some(ref code) = layer {
        if !code.is_empty() && Layer::from_code(code).is_none() {
            tracing::warn!(
                "'{}' is not an inventory layer; only environment artifacts can match",
                code
            );
        }
    }

    let filter = ArtifactFilter {
        source,
        layer,
        environment,
    };

    if is_human(cli) {
        println!("  {} Scanning artifacts...", "🔍".cyan());
    }

    let artifacts = manager
        .list_artifacts(&filter)
        .context("Error listing artifacts")?;

    match cli.format {
        OutputFormat::Human if artifacts.is_empty() => output::print_no_artifacts(),
        OutputFormat::Human => output::print_artifact_table(&artifacts),
        OutputFormat::Json => output::print_artifacts_json(&artifacts),
        OutputFormat::Quiet => output::print_artifacts_quiet(&artifacts),
    }

    Ok(())
}

// ─── Info ─────────────────────────────────────────────────────────────────────

fn cmd_info(cli: &Cli, name: &str) -> Result<()> {
    let manager = open_manager(cli)?;
    let artifact = manager.get_artifact_info(name)?;

    match cli.format {
        OutputFormat::Human => output::print_artifact_info(&artifact),
        OutputFormat::Json => output::print_artifacts_json(std::slice::from_ref(&artifact)),
        OutputFormat::Quiet => println!("{}", artifact.path.display()),
    }

    Ok(())
}

// ─── Status ───────────────────────────────────────────────────────────────────

fn cmd_status(cli: &Cli) -> Result<()> {
    let manager = open_manager(cli)?;
    print_status(cli, &manager)
}

fn print_status(cli: &Cli, manager: &SandboxManager) -> Result<()> {
    if is_human(cli) {
        println!("  {} Checking sandbox status...", "🏥".cyan());
    }

    let status = manager
        .get_status()
        .context("Error getting sandbox status")?;

    match cli.format {
        OutputFormat::Human => output::print_status(&status, manager.config()),
        OutputFormat::Json => output::print_status_json(&status),
        OutputFormat::Quiet => output::print_status_quiet(&status),
    }

    Ok(())
}

// ─── Clean ────────────────────────────────────────────────────────────────────

fn cmd_clean(cli: &Cli) -> Result<()> {
    let manager = open_manager(cli)?;

    if is_human(cli) {
        println!("  {} Starting sandbox cleanup...", "🧹".yellow());
    }

    let report = manager.clean().context("Error during cleanup")?;

    match cli.format {
        OutputFormat::Human => {
            output::print_clean_report(&report);
            println!("  {} Updated sandbox status:", "📊".cyan());
            print_status(cli, &manager)
        }
        OutputFormat::Json => {
            output::print_clean_json(&report);
            Ok(())
        }
        OutputFormat::Quiet => {
            println!("{}", report.removed.len());
            Ok(())
        }
    }
}

// ─── Clone ────────────────────────────────────────────────────────────────────

fn cmd_clone(cli: &Cli, org: &str, repo: &str, prepare_testing: bool) -> Result<()> {
    let manager = open_manager(cli)?;

    if is_human(cli) {
        println!("  {} Cloning artifact from GitHub...", "🔄".cyan());
        println!("  {} Organization: {}", "•".dimmed(), org.yellow());
        println!("  {} Repository: {}", "•".dimmed(), repo.yellow());
        println!("  {} Prepare for testing: {}", "•".dimmed(), prepare_testing);
    }

    manager
        .clone_artifact(org, repo, prepare_testing)
        .context("Error cloning artifact")
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(cli: &Cli, action: &ConfigAction) -> Result<()> {
    let base_dir = resolve_base_dir(cli.base_dir.as_deref());

    match action {
        ConfigAction::Show => {
            let config = Config::load(&base_dir)?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
                _ => output::print_config(&config, &Config::config_path(&base_dir)),
            }
        }
        ConfigAction::Init => {
            let path = Config::default().save(&base_dir)?;
            println!("  {} Wrote default config to {}", "✓".green(), path.display());
        }
    }

    Ok(())
}
