//! Schema compilation: SKILL.md plus scanned tools to `tools_schema.json`.

use anyhow::Result;

use super::prompts;
use crate::fs::{scan_tools, ScanReport, SkillPackage};
use crate::llm::{Generator, Message};
use crate::models::tool::parse_schema;
use crate::parser::{decode, BlockKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaOutcome {
    /// No tool modules to describe; no call was made
    Skipped,
    /// The response held no usable schema; nothing was written
    NotGenerated { reason: String },
    /// Schema written and manifest tools resynced to the scan
    Compiled {
        entries: usize,
        manifest_updated: bool,
    },
}

#[derive(Debug, Clone)]
pub struct SchemaReport {
    pub scan: ScanReport,
    pub outcome: SchemaOutcome,
    pub warnings: Vec<String>,
}

/// Compile the tool schema of a package.
pub fn compile_schema<G: Generator + ?Sized>(
    generator: &G,
    package: &SkillPackage,
) -> Result<SchemaReport> {
    package.require_tools_dir()?;
    let document = package.read_document()?;
    let scan = scan_tools(package)?;

    let mut warnings: Vec<String> = scan
        .skipped
        .iter()
        .map(|s| format!("Skipped {}: {}", s.path.display(), s.reason))
        .collect();

    if scan.is_empty() {
        tracing::info!("No tool modules found; schema compilation skipped");
        return Ok(SchemaReport {
            scan,
            outcome: SchemaOutcome::Skipped,
            warnings,
        });
    }

    tracing::info!(tools = scan.tools.len(), "Generating tool schema");
    let response = generator.generate(
        &prompts::schema_instruction(),
        &[Message::user(prompts::schema_request(
            document.as_str(),
            &scan.tools,
        ))],
    )?;

    let blocks = decode(&response, &[BlockKind::Schema]);
    let parsed = match blocks.trimmed(BlockKind::Schema) {
        None => Err("No schema block in response".to_string()),
        Some(body) => parse_schema(body).map_err(|e| format!("{e:#}")),
    };

    let schema = match parsed {
        Ok(schema) if !schema.is_empty() => schema,
        Ok(_) => return Ok(not_generated(scan, warnings, "Schema is empty")),
        Err(reason) => return Ok(not_generated(scan, warnings, reason)),
    };

    let names = scan.names();
    for entry in &schema {
        if !names.contains(&entry.name) {
            let message = format!("Schema entry '{}' has no matching tool module", entry.name);
            tracing::warn!("{message}");
            warnings.push(message);
        }
    }

    package.write_schema(&schema)?;
    let manifest_updated = package.update_manifest(|m| m.resync_tools(names))?;

    Ok(SchemaReport {
        scan,
        outcome: SchemaOutcome::Compiled {
            entries: schema.len(),
            manifest_updated,
        },
        warnings,
    })
}

fn not_generated(
    scan: ScanReport,
    mut warnings: Vec<String>,
    reason: impl Into<String>,
) -> SchemaReport {
    let reason = reason.into();
    tracing::warn!("{reason}; tools_schema.json not written");
    warnings.push(reason.clone());
    SchemaReport {
        scan,
        outcome: SchemaOutcome::NotGenerated { reason },
        warnings,
    }
}
