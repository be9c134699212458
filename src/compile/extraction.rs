//! Extraction-and-refactor: lift business logic out of a source file into tools.
//!
//! One analysis call proposes candidates, a human confirms, then each
//! candidate gets its own refactor call. Candidates are processed in order
//! and a failed candidate never undoes the ones before it.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::gate::Confirm;
use super::prompts;
use crate::error::PackageError;
use crate::fs::SkillPackage;
use crate::llm::{Generator, Message};
use crate::models::{Analysis, CanonicalSection, ExtractionCandidate};
use crate::parser::{decode, BlockKind};
use crate::validation::validate_tool_name;

/// A tool written by a successful refactor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTool {
    pub name: String,
    pub path: PathBuf,
    /// A capability entry was appended to SKILL.md
    pub documented: bool,
    /// The manifest gained a new tool entry
    pub registered: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    pub candidates: Vec<ExtractionCandidate>,
    /// The human accepted the candidates
    pub confirmed: bool,
    pub extracted: Vec<ExtractedTool>,
    pub warnings: Vec<String>,
}

/// Check that `path` is an existing Python source file.
pub fn validate_source(path: &Path) -> Result<(), PackageError> {
    if !path.is_file() {
        return Err(PackageError::MissingInput(path.to_path_buf()));
    }
    if path.extension().is_none_or(|ext| ext != "py") {
        return Err(PackageError::NotPython(path.to_path_buf()));
    }
    Ok(())
}

/// Analyze `source_path` and, once confirmed, refactor each candidate into a tool.
pub fn extract<G: Generator + ?Sized>(
    generator: &G,
    package: &SkillPackage,
    source_path: &Path,
    confirm: &mut dyn Confirm,
) -> Result<ExtractionReport> {
    validate_source(source_path)?;
    let source = fs::read_to_string(source_path)
        .with_context(|| format!("Failed to read {}", source_path.display()))?;

    let mut report = ExtractionReport::default();

    tracing::info!("Analyzing {}", source_path.display());
    let Some(analysis) = analyze(generator, &source, &mut report)? else {
        return Ok(report);
    };
    report.candidates = analysis.candidates().to_vec();
    if report.candidates.is_empty() {
        tracing::info!("No extractable business logic found");
        return Ok(report);
    }

    report.confirmed = confirm.confirm(&confirmation_question(&report.candidates))?;
    if !report.confirmed {
        tracing::info!("Extraction declined");
        return Ok(report);
    }

    let skill_name = package.skill_name();
    let candidates = report.candidates.clone();
    for candidate in &candidates {
        match refactor(generator, package, &skill_name, candidate) {
            Ok(Some(tool)) => report.extracted.push(tool),
            Ok(None) => warn(
                &mut report,
                format!("Skipping '{}': no tool code in response", candidate.name),
            ),
            Err(e) => warn(&mut report, format!("Skipping '{}': {e:#}", candidate.name)),
        }
    }

    Ok(report)
}

fn analyze<G: Generator + ?Sized>(
    generator: &G,
    source: &str,
    report: &mut ExtractionReport,
) -> Result<Option<Analysis>> {
    let response = generator.generate(
        &prompts::analysis_instruction(),
        &[Message::user(prompts::analysis_request(source))],
    )?;

    let blocks = decode(&response, &[BlockKind::Analysis]);
    let Some(body) = blocks.trimmed(BlockKind::Analysis) else {
        warn(report, "No analysis block in response");
        return Ok(None);
    };

    match Analysis::from_json(body) {
        Ok(analysis) => Ok(Some(analysis)),
        Err(e) => {
            warn(report, format!("{e:#}"));
            Ok(None)
        }
    }
}

/// Refactor one candidate. `Ok(None)` when the response carried no tool code.
fn refactor<G: Generator + ?Sized>(
    generator: &G,
    package: &SkillPackage,
    skill_name: &str,
    candidate: &ExtractionCandidate,
) -> Result<Option<ExtractedTool>> {
    validate_tool_name(&candidate.name)?;

    tracing::info!("Refactoring {}", candidate.name);
    let response = generator.generate(
        &prompts::refactor_instruction(),
        &[Message::user(prompts::refactor_request(skill_name, candidate))],
    )?;
    let blocks = decode(&response, &[BlockKind::ToolCode, BlockKind::SkillDoc]);

    let Some(code) = blocks.trimmed(BlockKind::ToolCode) else {
        return Ok(None);
    };
    let path = package.write_tool(&candidate.name, code)?;

    let documented = match blocks.trimmed(BlockKind::SkillDoc) {
        Some(doc) => {
            let mut document = package.read_document()?;
            document.append_to_section(&CanonicalSection::Capabilities.heading(), doc);
            package.write_document(&document)?;
            true
        }
        None => false,
    };

    let registered = package.update_manifest(|m| m.register_tool(&candidate.name))?;

    Ok(Some(ExtractedTool {
        name: candidate.name.clone(),
        path,
        documented,
        registered,
    }))
}

fn confirmation_question(candidates: &[ExtractionCandidate]) -> String {
    let mut question = format!(
        "Found {} candidate function(s) for extraction:\n\n",
        candidates.len()
    );
    for (idx, candidate) in candidates.iter().enumerate() {
        question.push_str(&format!(
            "  {}. {} (lines {})\n     Reason: {}\n\n",
            idx + 1,
            candidate.name,
            candidate.line_range(),
            candidate.reason
        ));
    }
    question.push_str("Extract them into this skill package?");
    question
}

fn warn(report: &mut ExtractionReport, message: impl Into<String>) {
    let message = message.into();
    tracing::warn!("{message}");
    report.warnings.push(message);
}
