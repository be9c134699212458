//! Static scan of `tools/*.py`. Sources are read and tokenized, never run.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::package::{SkillPackage, PACKAGE_MARKER};
use crate::models::ToolModule;
use crate::parser::python;

/// A tool file that was left out of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTool {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Parsed tools in lexicographic file-name order
    pub tools: Vec<ToolModule>,
    pub skipped: Vec<SkippedTool>,
}

impl ScanReport {
    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Scan every tool module of a package.
pub fn scan_tools(package: &SkillPackage) -> Result<ScanReport> {
    scan_dir(&package.tools_dir())
}

/// Scan a tools directory. A missing directory yields an empty report.
pub fn scan_dir(tools_dir: &Path) -> Result<ScanReport> {
    let mut report = ScanReport::default();
    if !tools_dir.is_dir() {
        return Ok(report);
    }

    let entries = fs::read_dir(tools_dir)
        .with_context(|| format!("Failed to read tools directory: {}", tools_dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_tool_file(path))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    for path in files {
        match read_tool(&path) {
            Ok(tool) => {
                tracing::debug!(tool = %tool.name, "Scanned tool module");
                report.tools.push(tool);
            }
            Err(e) => {
                let reason = format!("{e:#}");
                tracing::warn!("Skipping {}: {reason}", path.display());
                report.skipped.push(SkippedTool { path, reason });
            }
        }
    }

    Ok(report)
}

fn is_tool_file(path: &Path) -> bool {
    let is_python = path.extension().is_some_and(|ext| ext == "py");
    let is_marker = path.file_name().is_some_and(|name| name == PACKAGE_MARKER);
    is_python && !is_marker
}

/// Read and parse one tool file.
pub fn read_tool(path: &Path) -> Result<ToolModule> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("Tool file name is not valid UTF-8: {}", path.display()))?
        .to_string();

    let source = fs::read_to_string(path).context("Failed to read source")?;
    let outline = python::outline(&source).context("Syntax error")?;

    Ok(ToolModule {
        name,
        module_doc: outline.module_doc,
        run_doc: outline.run_doc,
        source,
    })
}
