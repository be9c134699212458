//! `skillsmith compile`: generate `tools_schema.json`.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::common::{open_package, print_warnings, section, success};
use crate::compile::{compile_schema, SchemaOutcome};
use crate::config::Config;
use crate::llm::AnthropicClient;
use crate::utils::display_path;

pub fn execute(skill_dir: &Path, config: &Config) -> Result<()> {
    let package = open_package(skill_dir)?;
    package.require_tools_dir()?;

    let generator = AnthropicClient::from_config(&config.llm, config.llm.generation_max_tokens)?;

    section("Compile");
    let report = compile_schema(&generator, &package)?;

    match report.outcome {
        SchemaOutcome::Skipped => {
            println!(
                "  No tool modules found in {} ({} excluded).",
                "tools/".dimmed(),
                crate::fs::package::PACKAGE_MARKER
            );
        }
        SchemaOutcome::NotGenerated { ref reason } => {
            println!("  {} Schema generation failed: {reason}", "✗".red().bold());
        }
        SchemaOutcome::Compiled {
            entries,
            manifest_updated,
        } => {
            println!("  Tools: {}", report.scan.names().join(", ").cyan());
            success(format!(
                "Wrote {} ({entries} entr{})",
                display_path(&package.schema_path(), package.root()),
                if entries == 1 { "y" } else { "ies" }
            ));
            if manifest_updated {
                success("Synced manifest tools");
            } else {
                success(format!("Manifest tools {}", "already in sync".dimmed()));
            }
        }
    }
    print_warnings(&report.warnings);

    Ok(())
}
