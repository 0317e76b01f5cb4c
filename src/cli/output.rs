use colored::*;

use crate::cleaner::CleanReport;
use crate::common::config::Config;
use crate::common::format::{
    format_age_days, format_count, format_flag, format_path, format_size, format_size_colored,
    print_header, print_kv,
};
use crate::scanner::artifact::Artifact;
use crate::status::SandboxStatus;

const NO_ENVIRONMENT: &str = "-";

/// Print artifacts as an aligned table
pub fn print_artifact_table(artifacts: &[Artifact]) {
    println!();
    println!(
        "  {} Found {}",
        "🔍",
        format_count(artifacts.len()).green().bold()
    );
    println!();

    let name_w = column_width("NAME", artifacts.iter().map(|a| a.name.chars().count()));
    let layer_w = column_width("LAYER", artifacts.iter().map(|a| a.layer.chars().count()));
    let source_w = column_width("SOURCE", artifacts.iter().map(|a| a.source.to_string().len()));
    let env_w = column_width(
        "ENVIRONMENT",
        artifacts
            .iter()
            .map(|a| a.environment.as_deref().unwrap_or(NO_ENVIRONMENT).chars().count()),
    );

    println!(
        "  {}  {}  {}  {}  {}  {}",
        format!("{:<name_w$}", "NAME").dimmed(),
        format!("{:<layer_w$}", "LAYER").dimmed(),
        format!("{:<source_w$}", "SOURCE").dimmed(),
        format!("{:<env_w$}", "ENVIRONMENT").dimmed(),
        "CHART".dimmed(),
        "INVENTORY".dimmed(),
    );
    println!(
        "  {}",
        "─".repeat(name_w + layer_w + source_w + env_w + 26).dimmed()
    );

    for artifact in artifacts {
        println!(
            "  {}  {:<layer_w$}  {:<source_w$}  {:<env_w$}  {:<5}  {}",
            format!("{:<name_w$}", artifact.name).bold(),
            artifact.layer,
            artifact.source.to_string(),
            artifact.environment.as_deref().unwrap_or(NO_ENVIRONMENT),
            format_flag(artifact.has_chart),
            format_flag(artifact.has_inventory),
        );
    }

    println!();
    println!(
        "  {} Use {} to check sandbox health",
        "💡",
        "nx-sandbox status".cyan()
    );
    println!();
}

fn column_width(header: &str, cells: impl Iterator<Item = usize>) -> usize {
    cells.max().unwrap_or(0).max(header.len())
}

/// Print the no-match message for an empty listing
pub fn print_no_artifacts() {
    println!();
    println!(
        "  {} {}",
        "⚠".yellow(),
        "No artifacts found matching the criteria.".yellow()
    );
    println!();
}

/// Print artifacts as JSON
pub fn print_artifacts_json(artifacts: &[Artifact]) {
    match serde_json::to_string_pretty(artifacts) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing artifacts: {}", e),
    }
}

/// Print one artifact name per line
pub fn print_artifacts_quiet(artifacts: &[Artifact]) {
    for artifact in artifacts {
        println!("{}", artifact.name);
    }
}

/// Print details for a single artifact
pub fn print_artifact_info(artifact: &Artifact) {
    print_header(&format!("📦 {}", artifact.name));
    print_kv("Layer", &artifact.layer);
    print_kv("Source", &artifact.source.to_string());
    if let Some(ref env) = artifact.environment {
        print_kv("Environment", env);
    }
    print_kv("Path", &format_path(&artifact.path));
    print_kv("Helm chart", format_flag(artifact.has_chart));
    print_kv("Inventory", format_flag(artifact.has_inventory));
    println!();
}

/// Print the sandbox health report
pub fn print_status(status: &SandboxStatus, config: &Config) {
    let env = &status.environment;

    println!();
    println!("  {} Sandbox Status Report", "📊");
    println!("{}", "─".repeat(60).dimmed());

    if status.is_healthy {
        println!("  {} Overall Status: {}", "✅", "Healthy".green().bold());
    } else {
        println!("  {} Overall Status: {}", "❌", "Issues Detected".red().bold());
    }
    println!();

    println!("  {} Environment:", "📁".yellow());
    print_kv("Test Artifacts Directory", &format_path(&env.test_artifacts_dir));
    print_kv("Local Artifacts Directory", &format_path(&env.local_artifacts_dir));
    print_kv("Total Artifacts", &env.total_artifacts.to_string());
    print_kv("Test Artifacts", &env.test_artifacts_count.to_string());
    print_kv("Local Artifacts", &env.local_artifacts_count.to_string());
    print_kv(
        "Disk Usage",
        &format_size_colored(env.disk_usage, config.disk_usage_threshold_bytes()).to_string(),
    );
    let last_cleanup = env
        .last_cleanup
        .map(|ts| {
            ts.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "Never".to_string());
    print_kv("Last Cleanup", &last_cleanup);
    println!();

    if !status.issues.is_empty() {
        println!("  {} {}", "⚠".red(), "Issues:".red());
        for issue in &status.issues {
            println!("    {} {}", "-".dimmed(), issue);
        }
        println!();
    }

    if !status.recommendations.is_empty() {
        println!("  {} {}", "💡", "Recommendations:".green());
        for rec in &status.recommendations {
            println!("    {} {}", "-".dimmed(), rec);
        }
        println!();
    }

    println!("  {} Available Commands:", "🔧".cyan());
    println!("    {:<34} # List available artifacts", "nx-sandbox list");
    println!("    {:<34} # Clean old artifacts", "nx-sandbox clean");
    println!("    {:<34} # Clone artifact for testing", "nx-sandbox clone <org> <repo>");
    println!();
}

/// Print status as JSON
pub fn print_status_json(status: &SandboxStatus) {
    match serde_json::to_string_pretty(status) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing status: {}", e),
    }
}

/// Print a minimal status line: health, artifact counts, disk usage
pub fn print_status_quiet(status: &SandboxStatus) {
    let env = &status.environment;
    println!(
        "{}  {}  {}  {}",
        if status.is_healthy { "healthy" } else { "unhealthy" },
        env.test_artifacts_count,
        env.local_artifacts_count,
        format_size(env.disk_usage)
    );
}

/// Print what a cleanup run removed
pub fn print_clean_report(report: &CleanReport) {
    println!();
    if report.removed.is_empty() {
        println!("  {} Nothing old enough to remove.", "✓".green());
    } else {
        for removed in &report.removed {
            println!(
                "    {} {} ({} artifact, {} old)",
                "✗".red(),
                format_path(&removed.path),
                removed.root.label(),
                format_age_days(removed.age_days),
            );
        }
    }
    println!();
    println!(
        "  {} {}",
        "✅",
        format!(
            "Sandbox cleanup completed: {} removed",
            format_count(report.removed.len())
        )
        .green()
    );
}

/// Print clean report as JSON
pub fn print_clean_json(report: &CleanReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing clean report: {}", e),
    }
}

/// Print the effective configuration
pub fn print_config(config: &Config, source: &std::path::Path) {
    print_header("⚙️  Configuration");
    print_kv("File", &format_path(source));
    print_kv("Test retention", &format_age_days(config.test_retention_days as u64));
    print_kv("Local retention", &format_age_days(config.local_retention_days as u64));
    print_kv(
        "Disk usage threshold",
        &format_size(config.disk_usage_threshold_bytes()),
    );
    print_kv("Test artifact limit", &config.test_artifact_limit.to_string());
    println!();
}
