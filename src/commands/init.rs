//! `skillsmith init`: scaffold a new skill package.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use super::common::section;
use crate::fs::package::{
    SkillPackage, DOCUMENT_FILE, EXAMPLE_TOOL, KNOWLEDGE_DIR, MANIFEST_FILE, PACKAGE_MARKER,
    TOOLS_DIR,
};

pub fn execute(name: &str, author: &str, industry: &str, output: &Path) -> Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let package = SkillPackage::create(output, name, author, industry)?;
    tracing::debug!(path = %package.root().display(), "Package scaffolded");

    section("Initialize");
    println!(
        "  {} Skill '{}' created at {}",
        "✓".green().bold(),
        name.bold(),
        package.root().display().to_string().cyan()
    );
    print_tree(name);

    println!();
    println!("{}", "Next steps:".bold());
    let dir = package.root().display().to_string();
    println!(
        "  {}  Interview an expert",
        format!("skillsmith interview --skill-dir {dir}").cyan()
    );
    println!(
        "  {}  Extract tools from code",
        format!("skillsmith scan --file <file.py> --skill-dir {dir}").cyan()
    );
    println!();

    Ok(())
}

fn print_tree(name: &str) {
    println!();
    println!("  {}/", name.bold());
    println!("  ├── {MANIFEST_FILE}");
    println!("  ├── {DOCUMENT_FILE}");
    println!("  ├── {TOOLS_DIR}/");
    println!("  │   ├── {PACKAGE_MARKER}");
    println!("  │   └── {EXAMPLE_TOOL}.py");
    println!("  └── {KNOWLEDGE_DIR}/");
    println!("      └── README.md");
}
