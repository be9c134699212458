use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::atomic::write_atomic;
use crate::error::PackageError;
use crate::models::{Manifest, SkillDocument, ToolSchema};
use crate::validation::{validate_skill_name, validate_tool_name};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const DOCUMENT_FILE: &str = "SKILL.md";
pub const SCHEMA_FILE: &str = "tools_schema.json";
pub const TOOLS_DIR: &str = "tools";
pub const KNOWLEDGE_DIR: &str = "knowledge";
pub const PACKAGE_MARKER: &str = "__init__.py";
pub const EXAMPLE_TOOL: &str = "example_tool";

/// Name reported when the manifest carries no usable name.
pub const UNKNOWN_SKILL: &str = "unknown";

const KNOWLEDGE_README: &str = "# Knowledge\n\nPlace reference documents specific to this skill here (PDF, Excel, CSV, etc.).\n";

/// A skill package directory.
///
/// Every read-modify-write goes through whole-file atomic replaces. A package
/// has a single writer; nothing here locks.
#[derive(Debug, Clone)]
pub struct SkillPackage {
    root: PathBuf,
}

impl SkillPackage {
    /// Scaffold a new package at `base/name`.
    pub fn create(base: &Path, name: &str, author: &str, industry: &str) -> Result<Self> {
        validate_skill_name(name)?;

        let root = base.join(name);
        if root.exists() {
            return Err(PackageError::AlreadyExists(root).into());
        }

        let package = Self { root };
        fs::create_dir_all(package.tools_dir()).context("Failed to create tools directory")?;
        fs::create_dir_all(package.knowledge_dir())
            .context("Failed to create knowledge directory")?;

        package.write_manifest(&Manifest::new(name, author, industry))?;
        package.write_document(&SkillDocument::template(name))?;

        fs::write(package.tools_dir().join(PACKAGE_MARKER), "")
            .with_context(|| format!("Failed to create {TOOLS_DIR}/{PACKAGE_MARKER}"))?;
        fs::write(package.tool_path(EXAMPLE_TOOL), example_tool(name))
            .with_context(|| format!("Failed to create {TOOLS_DIR}/{EXAMPLE_TOOL}.py"))?;
        fs::write(package.knowledge_dir().join("README.md"), KNOWLEDGE_README)
            .with_context(|| format!("Failed to create {KNOWLEDGE_DIR}/README.md"))?;

        Ok(package)
    }

    /// Open an existing package. Fails unless both the manifest and the document exist.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, PackageError> {
        let root = dir.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(PackageError::MissingDirectory(root));
        }

        let package = Self { root };
        for (path, file) in [
            (package.manifest_path(), MANIFEST_FILE),
            (package.document_path(), DOCUMENT_FILE),
        ] {
            if !path.is_file() {
                return Err(PackageError::MissingFile {
                    dir: package.root.clone(),
                    file,
                });
            }
        }

        Ok(package)
    }

    /// Schema compilation needs a `tools/` directory on top of a valid package.
    pub fn require_tools_dir(&self) -> Result<(), PackageError> {
        if !self.tools_dir().is_dir() {
            return Err(PackageError::MissingDirectory(self.tools_dir()));
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn document_path(&self) -> PathBuf {
        self.root.join(DOCUMENT_FILE)
    }

    pub fn schema_path(&self) -> PathBuf {
        self.root.join(SCHEMA_FILE)
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.root.join(TOOLS_DIR)
    }

    pub fn knowledge_dir(&self) -> PathBuf {
        self.root.join(KNOWLEDGE_DIR)
    }

    pub fn tool_path(&self, name: &str) -> PathBuf {
        self.tools_dir().join(format!("{name}.py"))
    }

    pub fn read_manifest(&self) -> Result<Manifest> {
        let path = self.manifest_path();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Manifest::from_json(&content)
            .map_err(|source| PackageError::InvalidManifest { path, source }.into())
    }

    pub fn write_manifest(&self, manifest: &Manifest) -> Result<()> {
        write_atomic(&self.manifest_path(), &manifest.to_json()?)
    }

    /// Read, transform, and write back only if `apply` reports a change.
    pub fn update_manifest<F>(&self, apply: F) -> Result<bool>
    where
        F: FnOnce(&mut Manifest) -> bool,
    {
        let mut manifest = self.read_manifest()?;
        let changed = apply(&mut manifest);
        if changed {
            self.write_manifest(&manifest)?;
        }
        Ok(changed)
    }

    pub fn read_document(&self) -> Result<SkillDocument> {
        let path = self.document_path();
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(SkillDocument::new(text))
    }

    pub fn write_document(&self, document: &SkillDocument) -> Result<()> {
        write_atomic(&self.document_path(), document.as_str())
    }

    /// Write `tools/<name>.py`, trimmed with a single trailing newline.
    pub fn write_tool(&self, name: &str, code: &str) -> Result<PathBuf> {
        validate_tool_name(name)?;
        let path = self.tool_path(name);
        write_atomic(&path, &format!("{}\n", code.trim()))?;
        Ok(path)
    }

    /// Overwrite `tools_schema.json` with the full schema.
    pub fn write_schema(&self, schema: &[ToolSchema]) -> Result<()> {
        let mut content =
            serde_json::to_string_pretty(schema).context("Failed to serialize tool schema")?;
        content.push('\n');
        write_atomic(&self.schema_path(), &content)
    }

    /// The compiled schema, if one has been written.
    pub fn read_schema(&self) -> Result<Option<Vec<ToolSchema>>> {
        let path = self.schema_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let schema = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(schema))
    }

    /// Skill name from the manifest, or `unknown` when it cannot be read.
    pub fn skill_name(&self) -> String {
        match self.read_manifest() {
            Ok(manifest) if !manifest.name.trim().is_empty() => manifest.name,
            Ok(_) => UNKNOWN_SKILL.to_string(),
            Err(e) => {
                tracing::warn!("Could not read skill name: {e:#}");
                UNKNOWN_SKILL.to_string()
            }
        }
    }
}

fn example_tool(skill_name: &str) -> String {
    format!(
        r#""""
Tool: {EXAMPLE_TOOL}
Skill: {skill_name}
"""


def run(**kwargs):
    """Tool entry point."""
    raise NotImplementedError("Implement the logic of this tool")
"#
    )
}
