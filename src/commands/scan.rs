//! `skillsmith scan`: extract tools from an existing Python file.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::common::{open_package, print_warnings, section, success};
use crate::compile::extraction::{extract, validate_source};
use crate::compile::StdinConfirm;
use crate::config::Config;
use crate::llm::AnthropicClient;
use crate::utils::display_path;

pub fn execute(file: &Path, skill_dir: &Path, config: &Config) -> Result<()> {
    validate_source(file)?;
    let package = open_package(skill_dir)?;

    let generator = AnthropicClient::from_config(&config.llm, config.llm.generation_max_tokens)?;

    section("Scan");
    println!("  Analyzing {}", file.display().to_string().cyan());
    let report = extract(&generator, &package, file, &mut StdinConfirm)?;

    if report.candidates.is_empty() {
        println!("  No extractable business logic found.");
        print_warnings(&report.warnings);
        return Ok(());
    }
    if !report.confirmed {
        println!("  {} Cancelled", "→".yellow().bold());
        return Ok(());
    }

    for tool in &report.extracted {
        success(format!(
            "Wrote {}",
            display_path(&tool.path, package.root())
        ));
        if tool.documented {
            success(format!("Documented {} in SKILL.md", tool.name));
        }
        if tool.registered {
            success(format!("Registered {} in manifest", tool.name));
        }
    }
    print_warnings(&report.warnings);

    println!(
        "\n{} {} of {} candidate(s) extracted",
        "✓".green().bold(),
        report.extracted.len(),
        report.candidates.len()
    );

    Ok(())
}
