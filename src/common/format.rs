use colored::*;

/// Format bytes into human-readable size string
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format size with color relative to the unhealthy threshold
pub fn format_size_colored(bytes: u64, threshold: u64) -> ColoredString {
    let s = format_size(bytes);
    if bytes > threshold {
        s.red().bold()
    } else if bytes > threshold / 2 {
        s.yellow()
    } else {
        s.white()
    }
}

/// Format artifact count with appropriate plural
pub fn format_count(count: usize) -> String {
    if count == 1 {
        "1 artifact".to_string()
    } else {
        format!("{} artifacts", count)
    }
}

/// Format an age in whole days
pub fn format_age_days(days: u64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Format a path for display, replacing home directory with ~
pub fn format_path(path: &std::path::Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

/// Check or cross for a boolean marker
pub fn format_flag(present: bool) -> &'static str {
    if present {
        "✅"
    } else {
        "❌"
    }
}

/// Print a section header
pub fn print_header(title: &str) {
    println!();
    println!("{}", title.bold().underline());
    println!();
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}
