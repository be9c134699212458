//! `skillsmith status`: read-only summary of a skill package.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::common::{open_package, section};
use crate::fs::scan_tools;
use crate::fs::SkillPackage;
use crate::models::CanonicalSection;
use crate::utils::{display_path, first_line, truncate};

const DOC_PREVIEW_CHARS: usize = 60;

/// Show manifest fields, document coverage, tools and schema presence.
pub fn execute(skill_dir: &Path) -> Result<()> {
    let package = open_package(skill_dir)?;

    display_manifest(&package)?;
    display_document(&package)?;
    display_tools(&package)?;
    display_schema(&package)?;

    println!();
    Ok(())
}

fn display_manifest(package: &SkillPackage) -> Result<()> {
    section("Manifest");
    let manifest = package.read_manifest()?;

    println!("  Name:        {}", manifest.name.bold());
    println!("  Version:     {}", manifest.version);
    println!("  Author:      {}", manifest.author);
    println!("  Industry:    {}", manifest.industry);
    if manifest.description.is_empty() {
        println!("  Description: {}", "(none)".dimmed());
    } else {
        println!(
            "  Description: {}",
            truncate(first_line(&manifest.description), DOC_PREVIEW_CHARS)
        );
    }
    if !manifest.tags.is_empty() {
        println!("  Tags:        {}", manifest.tags.join(", "));
    }
    println!("  Tools:       {}", manifest.tools.len());

    for issue in manifest.lint() {
        println!("  {} {issue}", "!".yellow().bold());
    }
    Ok(())
}

fn display_document(package: &SkillPackage) -> Result<()> {
    section("Document");
    if !package.document_path().exists() {
        println!("  {} {} is missing", "✗".red().bold(), "SKILL.md");
        return Ok(());
    }

    let document = package.read_document()?;
    let missing = document.missing_sections();
    for canonical in CanonicalSection::all() {
        if missing.contains(canonical) {
            println!("  {} {}", "✗".red().bold(), canonical.title().dimmed());
        } else {
            println!("  {} {}", "✓".green().bold(), canonical.title());
        }
    }
    Ok(())
}

fn display_tools(package: &SkillPackage) -> Result<()> {
    section("Tools");
    let report = scan_tools(package)?;

    if report.is_empty() && report.skipped.is_empty() {
        println!("  {}", "(no tool modules)".dimmed());
        return Ok(());
    }

    let manifest_tools = package.read_manifest()?.tools;
    for tool in &report.tools {
        let registered = if manifest_tools.contains(&tool.name) {
            "".normal()
        } else {
            " (not in manifest)".yellow()
        };
        let doc = tool
            .run_doc
            .as_deref()
            .or(tool.module_doc.as_deref())
            .map(|d| truncate(first_line(d), DOC_PREVIEW_CHARS))
            .unwrap_or_default();
        println!("  {} {}{registered}", "•".cyan(), tool.name.bold());
        if !doc.is_empty() {
            println!("    {}", doc.dimmed());
        }
    }
    for skipped in &report.skipped {
        println!(
            "  {} {}: {}",
            "⚠".yellow().bold(),
            display_path(&skipped.path, package.root()),
            skipped.reason
        );
    }
    Ok(())
}

fn display_schema(package: &SkillPackage) -> Result<()> {
    section("Schema");
    match package.read_schema() {
        Ok(Some(entries)) => println!(
            "  {} {} ({} entr{})",
            "✓".green().bold(),
            display_path(&package.schema_path(), package.root()),
            entries.len(),
            if entries.len() == 1 { "y" } else { "ies" }
        ),
        Ok(None) => println!(
            "  {} Not compiled yet; run {}",
            "-".dimmed(),
            "skillsmith compile".cyan()
        ),
        Err(e) => println!("  {} Unreadable schema: {e:#}", "✗".red().bold()),
    }
    Ok(())
}
