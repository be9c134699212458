//! Document synthesis against a scaffolded package

use std::fs;

use skillsmith::compile::synthesize;
use skillsmith::interview::{Conversation, Speaker, SEED_TURN};
use skillsmith::parser::BlockKind;

use super::helpers::{create_package, manifest_bytes, ScriptedGenerator};

const DOCUMENT: &str = "# risk-eval\n\n## Role\nCredit analyst\n\n## Capabilities\n- Score applicants\n";

fn sample_conversation() -> Conversation {
    let mut conversation = Conversation::new();
    conversation.push(Speaker::Respondent, SEED_TURN).unwrap();
    conversation
        .push(Speaker::Elicitor, "What do you assess first?")
        .unwrap();
    conversation
        .push(Speaker::Respondent, "Debt-to-income ratio.")
        .unwrap();
    conversation
}

#[test]
fn test_synthesis_updates_document_and_manifest() {
    let (_temp, package) = create_package("risk-eval");
    let summary = r#"{"description": "Evaluates credit risk", "tags": ["credit", "risk", "credit"]}"#;
    let response = format!(
        "Here you go.\n{}\n{}",
        BlockKind::SkillDocument.wrap(DOCUMENT),
        BlockKind::ManifestUpdate.wrap(summary)
    );
    let generator = ScriptedGenerator::new([response]);

    let report = synthesize(&generator, &package, &sample_conversation()).unwrap();

    assert!(report.document_replaced);
    assert!(report.manifest_updated);
    assert!(report.warnings.is_empty());
    assert_eq!(
        report
            .missing_sections
            .iter()
            .map(|s| s.title())
            .collect::<Vec<_>>(),
        vec!["Decision Chain", "Constraints", "Output Spec"]
    );

    assert_eq!(fs::read_to_string(package.document_path()).unwrap(), DOCUMENT);

    let manifest = package.read_manifest().unwrap();
    assert_eq!(manifest.name, "risk-eval");
    assert_eq!(manifest.description, "Evaluates credit risk");
    assert_eq!(manifest.tags, vec!["credit", "risk"]);

    // The transcript reaches the service with both speakers labelled
    let request = &generator.requests()[0];
    assert!(request.contains("Interviewer: What do you assess first?"));
    assert!(request.contains("Expert: Debt-to-income ratio."));
}

#[test]
fn test_missing_manifest_end_marker_leaves_manifest_unchanged() {
    let (_temp, package) = create_package("risk-eval");
    let before = manifest_bytes(&package);
    let (start, _) = BlockKind::ManifestUpdate.markers();
    let response = format!(
        "{}\n{start}\n{{\"description\": \"never applied\"}}\n",
        BlockKind::SkillDocument.wrap(DOCUMENT)
    );
    let generator = ScriptedGenerator::new([response]);

    let report = synthesize(&generator, &package, &sample_conversation()).unwrap();

    assert!(report.document_replaced);
    assert!(!report.manifest_updated);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(manifest_bytes(&package), before);
}

#[test]
fn test_malformed_manifest_update_is_skipped_independently() {
    let (_temp, package) = create_package("risk-eval");
    let document_before = fs::read_to_string(package.document_path()).unwrap();
    let manifest_before = manifest_bytes(&package);
    let response = BlockKind::ManifestUpdate.wrap("{not json");
    let generator = ScriptedGenerator::new([response]);

    let report = synthesize(&generator, &package, &sample_conversation()).unwrap();

    assert!(!report.document_replaced);
    assert!(!report.manifest_updated);
    assert_eq!(report.warnings.len(), 2);
    assert_eq!(
        fs::read_to_string(package.document_path()).unwrap(),
        document_before
    );
    assert_eq!(manifest_bytes(&package), manifest_before);
}

#[test]
fn test_blank_summary_fields_do_not_overwrite() {
    let (_temp, package) = create_package("risk-eval");
    package
        .update_manifest(|m| {
            m.description = "Existing".to_string();
            true
        })
        .unwrap();
    let response = BlockKind::ManifestUpdate.wrap(r#"{"description": "  ", "tags": []}"#);
    let generator = ScriptedGenerator::new([response]);

    let report = synthesize(&generator, &package, &sample_conversation()).unwrap();

    assert!(!report.manifest_updated);
    assert_eq!(package.read_manifest().unwrap().description, "Existing");
}
