use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A scanned tool source file. Identity is the file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolModule {
    pub name: String,
    pub module_doc: Option<String>,
    pub run_doc: Option<String>,
    pub source: String,
}

/// A function the analysis pass proposes to lift into a tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtractionCandidate {
    pub name: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub line_start: Option<u64>,
    #[serde(default)]
    pub line_end: Option<u64>,
    #[serde(default)]
    pub code: String,
}

impl ExtractionCandidate {
    /// Human-readable line range, e.g. `12-40`
    pub fn line_range(&self) -> String {
        match (self.line_start, self.line_end) {
            (Some(start), Some(end)) => format!("{start}-{end}"),
            (Some(start), None) => format!("{start}-?"),
            (None, Some(end)) => format!("?-{end}"),
            (None, None) => "?".to_string(),
        }
    }
}

/// Result of the analysis pass over one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub functions: Vec<ExtractionCandidate>,
}

impl Analysis {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body.trim()).context("Analysis block is not valid JSON")
    }

    /// Candidates worth offering, empty when nothing was found.
    pub fn candidates(&self) -> &[ExtractionCandidate] {
        if self.found {
            &self.functions
        } else {
            &[]
        }
    }
}

/// One tool entry of `tools_schema.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "empty_object_schema")]
    pub input_schema: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn empty_object_schema() -> Value {
    serde_json::json!({ "type": "object", "properties": {} })
}

/// Parse a schema block: a JSON array of per-tool records.
pub fn parse_schema(body: &str) -> Result<Vec<ToolSchema>> {
    let schema: Vec<ToolSchema> =
        serde_json::from_str(body.trim()).context("Schema block is not a valid JSON array")?;
    for entry in &schema {
        if entry.name.trim().is_empty() {
            bail!("Schema entry has an empty name");
        }
        if !entry.input_schema.is_object() {
            bail!("Schema entry '{}' has a non-object input_schema", entry.name);
        }
    }
    Ok(schema)
}
