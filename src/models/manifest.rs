//! Package manifest and its merge policies.
//!
//! Three policies touch the manifest and must stay distinct:
//! - [`Manifest::apply_summary`]: overwrite `description`/`tags` only with non-empty values
//! - [`Manifest::register_tool`]: append a tool name if it is not already listed
//! - [`Manifest::resync_tools`]: replace the tool list with an authoritative scan
//!
//! All three are pure in-memory transforms; persistence is the caller's
//! read-modify-write of the whole file. A package has a single writer.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_VERSION: &str = "0.1.0";
pub const DEFAULT_INDUSTRY: &str = "finance";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_industry")]
    pub industry: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub knowledge: Vec<Value>,
    /// Keys this version does not know about, carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_industry() -> String {
    DEFAULT_INDUSTRY.to_string()
}

/// Summary fields authored by the generative service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ManifestUpdate {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ManifestUpdate {
    /// Parse the JSON body of a manifest-update block.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body.trim()).context("Manifest update is not valid JSON")
    }
}

impl Manifest {
    /// A fresh manifest with defaults, as written at package creation.
    pub fn new(name: &str, author: &str, industry: &str) -> Self {
        Self {
            name: name.to_string(),
            version: default_version(),
            author: author.to_string(),
            description: String::new(),
            industry: industry.to_string(),
            tags: Vec::new(),
            tools: Vec::new(),
            knowledge: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self).context("Failed to serialize manifest")?;
        out.push('\n');
        Ok(out)
    }

    /// Overwrite-if-present merge. Returns true if anything changed.
    ///
    /// Missing, blank or empty values leave the current field untouched.
    pub fn apply_summary(&mut self, update: &ManifestUpdate) -> bool {
        let mut changed = false;

        if let Some(description) = update.description.as_deref().map(str::trim) {
            if !description.is_empty() && description != self.description {
                self.description = description.to_string();
                changed = true;
            }
        }

        if let Some(tags) = &update.tags {
            let tags = dedup_preserving_order(tags);
            if !tags.is_empty() && tags != self.tags {
                self.tags = tags;
                changed = true;
            }
        }

        changed
    }

    /// Append-if-absent. Returns true if the tool was added.
    pub fn register_tool(&mut self, name: &str) -> bool {
        if self.tools.iter().any(|t| t == name) {
            return false;
        }
        self.tools.push(name.to_string());
        true
    }

    /// Replace the tool list with the scanned names. Returns true if it differed.
    pub fn resync_tools<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let names = dedup_preserving_order(&names);
        if names == self.tools {
            return false;
        }
        self.tools = names;
        true
    }

    /// Problems worth reporting in a package summary.
    pub fn lint(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.name.trim().is_empty() {
            issues.push("name is empty".to_string());
        }
        if let Err(e) = semver::Version::parse(&self.version) {
            issues.push(format!("version '{}' is not semver: {e}", self.version));
        }
        if self.description.trim().is_empty() {
            issues.push("description is empty".to_string());
        }
        issues
    }
}

fn dedup_preserving_order(items: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && seen.insert(s.to_string()))
        .map(str::to_string)
        .collect()
}
