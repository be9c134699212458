//! Document synthesis: interview transcript to SKILL.md and manifest summary.

use anyhow::Result;

use super::prompts;
use crate::fs::SkillPackage;
use crate::interview::Conversation;
use crate::llm::{Generator, Message};
use crate::models::{CanonicalSection, ManifestUpdate};
use crate::parser::{decode, BlockKind};

#[derive(Debug, Clone, Default)]
pub struct SynthesisReport {
    pub document_replaced: bool,
    pub manifest_updated: bool,
    /// Canonical sections the new document lacks
    pub missing_sections: Vec<CanonicalSection>,
    /// Units that were skipped, and why
    pub warnings: Vec<String>,
}

/// Generate and apply a document and manifest summary from a finished interview.
///
/// The two blocks are independent: either may be absent or malformed without
/// affecting the other.
pub fn synthesize<G: Generator + ?Sized>(
    generator: &G,
    package: &SkillPackage,
    conversation: &Conversation,
) -> Result<SynthesisReport> {
    let mut report = SynthesisReport::default();

    let request = prompts::synthesis_request(&conversation.transcript());
    let response = generator.generate(
        &prompts::synthesis_instruction(),
        &[Message::user(request)],
    )?;
    let blocks = decode(
        &response,
        &[BlockKind::SkillDocument, BlockKind::ManifestUpdate],
    );

    match blocks.trimmed(BlockKind::SkillDocument) {
        Some(text) => {
            let mut document = package.read_document()?;
            document.replace(text);
            package.write_document(&document)?;
            report.document_replaced = true;
            report.missing_sections = document.missing_sections();
        }
        None => warn(&mut report, "No skill document block in response; SKILL.md left unchanged"),
    }

    match blocks.trimmed(BlockKind::ManifestUpdate) {
        Some(body) => match ManifestUpdate::from_json(body) {
            Ok(update) => {
                report.manifest_updated = package.update_manifest(|m| m.apply_summary(&update))?;
            }
            Err(e) => warn(&mut report, format!("{e:#}; manifest left unchanged")),
        },
        None => warn(&mut report, "No manifest update block in response; manifest left unchanged"),
    }

    Ok(report)
}

fn warn(report: &mut SynthesisReport, message: impl Into<String>) {
    let message = message.into();
    tracing::warn!("{message}");
    report.warnings.push(message);
}
