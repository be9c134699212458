//! Output helpers shared across command implementations.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::fs::SkillPackage;

/// Open a package, printing which one before any work starts.
pub fn open_package(skill_dir: &Path) -> Result<SkillPackage> {
    let package = SkillPackage::open(skill_dir)?;
    println!(
        "{} {}",
        "Skill package:".bold(),
        package.root().display().to_string().cyan()
    );
    Ok(package)
}

/// Print a section title with a rule under it.
pub fn section(title: &str) {
    println!("\n{}", title.bold());
    println!("{}", "─".repeat(40).dimmed());
}

pub fn success(message: impl AsRef<str>) {
    println!("  {} {}", "✓".green().bold(), message.as_ref());
}

/// Print skipped units collected in a report.
pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        println!("  {} {}", "⚠".yellow().bold(), warning);
    }
}
