//! Extraction-and-refactor against a scaffolded package

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use skillsmith::compile::extract;
use skillsmith::models::CanonicalSection;
use skillsmith::parser::BlockKind;

use super::helpers::{create_package, manifest_bytes, ScriptedGenerator};

const LEGACY: &str = "def calc_score(income, debt):\n    ratio = debt / income\n    return 100 - ratio * 50\n";

fn write_legacy(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("legacy.py");
    fs::write(&path, LEGACY).unwrap();
    path
}

fn analysis_response(name: &str) -> String {
    analysis_response_for(&[name])
}

fn analysis_response_for(names: &[&str]) -> String {
    let functions: Vec<_> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "name": name,
                "reason": "multi-step scoring",
                "line_start": 1,
                "line_end": 3,
                "code": LEGACY,
            })
        })
        .collect();
    let body = serde_json::json!({ "found": true, "functions": functions });
    format!("Analysis follows.\n{}", BlockKind::Analysis.wrap(&body.to_string()))
}

fn refactor_response() -> String {
    format!(
        "{}\n{}",
        BlockKind::ToolCode.wrap(
            "\"\"\"\nTool: calc_score\n\"\"\"\n\ndef run(income, debt):\n    \"\"\"Score an applicant.\"\"\"\n    return 100 - debt / income * 50",
        ),
        BlockKind::SkillDoc.wrap("- calc_score: scores an applicant from income and debt")
    )
}

fn named_refactor_response(name: &str) -> String {
    format!(
        "{}\n{}",
        BlockKind::ToolCode.wrap(&format!(
            "\"\"\"\nTool: {name}\n\"\"\"\n\ndef run(**kwargs):\n    return 0"
        )),
        BlockKind::SkillDoc.wrap(&format!("- {name}: documented"))
    )
}

#[test]
fn test_declined_confirmation_writes_nothing() {
    let (temp, package) = create_package("risk-eval");
    let source = write_legacy(temp.path());
    let manifest_before = manifest_bytes(&package);
    let document_before = fs::read_to_string(package.document_path()).unwrap();
    let generator = ScriptedGenerator::new([analysis_response("calc_score")]);

    let mut asked = Vec::new();
    let mut decline = |question: &str| -> Result<bool> {
        asked.push(question.to_string());
        Ok(false)
    };
    let report = extract(&generator, &package, &source, &mut decline).unwrap();

    assert_eq!(report.candidates.len(), 1);
    assert!(!report.confirmed);
    assert!(report.extracted.is_empty());
    assert_eq!(generator.calls(), 1);
    assert_eq!(asked.len(), 1);
    assert!(asked[0].contains("calc_score"));

    assert!(!package.tool_path("calc_score").exists());
    assert_eq!(manifest_bytes(&package), manifest_before);
    assert_eq!(
        fs::read_to_string(package.document_path()).unwrap(),
        document_before
    );
}

#[test]
fn test_confirmed_extraction_writes_documents_and_registers() {
    let (temp, package) = create_package("risk-eval");
    let source = write_legacy(temp.path());
    let generator = ScriptedGenerator::new([analysis_response("calc_score"), refactor_response()]);

    let mut accept = |_: &str| -> Result<bool> { Ok(true) };
    let report = extract(&generator, &package, &source, &mut accept).unwrap();

    assert!(report.confirmed);
    assert!(report.warnings.is_empty());
    assert_eq!(report.extracted.len(), 1);
    let tool = &report.extracted[0];
    assert!(tool.documented);
    assert!(tool.registered);

    let code = fs::read_to_string(package.tool_path("calc_score")).unwrap();
    assert!(code.starts_with("\"\"\"\nTool: calc_score"));
    assert!(code.ends_with("* 50\n"));

    // The capability doc lands inside the Capabilities section, before the next heading
    let document = fs::read_to_string(package.document_path()).unwrap();
    let capabilities = document
        .find(&CanonicalSection::Capabilities.heading())
        .unwrap();
    let doc_line = document.find("- calc_score: scores an applicant").unwrap();
    let decision_chain = document
        .find(&CanonicalSection::DecisionChain.heading())
        .unwrap();
    assert!(capabilities < doc_line && doc_line < decision_chain);

    // The refactor request carries the skill name from the manifest
    assert!(generator.requests()[1].contains("Skill: risk-eval"));

    assert_eq!(package.read_manifest().unwrap().tools, vec!["calc_score"]);
}

#[test]
fn test_repeated_extraction_registers_once() {
    let (temp, package) = create_package("risk-eval");
    let source = write_legacy(temp.path());
    let mut accept = |_: &str| -> Result<bool> { Ok(true) };

    for _ in 0..2 {
        let generator =
            ScriptedGenerator::new([analysis_response("calc_score"), refactor_response()]);
        extract(&generator, &package, &source, &mut accept).unwrap();
    }

    assert_eq!(package.read_manifest().unwrap().tools, vec!["calc_score"]);
    let document = fs::read_to_string(package.document_path()).unwrap();
    assert_eq!(document.matches("- calc_score: scores an applicant").count(), 2);
}

#[test]
fn test_unsafe_candidate_name_is_skipped() {
    let (temp, package) = create_package("risk-eval");
    let source = write_legacy(temp.path());
    let manifest_before = manifest_bytes(&package);
    let generator = ScriptedGenerator::new([analysis_response("../escape")]);

    let mut accept = |_: &str| -> Result<bool> { Ok(true) };
    let report = extract(&generator, &package, &source, &mut accept).unwrap();

    assert!(report.extracted.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("../escape"));
    // Rejected before any refactor request is made
    assert_eq!(generator.calls(), 1);
    assert!(!temp.path().join("risk-eval").join("escape.py").exists());
    assert_eq!(manifest_bytes(&package), manifest_before);
}

#[test]
fn test_nothing_found_skips_confirmation() {
    let (temp, package) = create_package("risk-eval");
    let source = write_legacy(temp.path());
    let generator = ScriptedGenerator::new([BlockKind::Analysis.wrap(r#"{"found": false}"#)]);

    let mut never = |_: &str| -> Result<bool> { panic!("confirmation should not be requested") };
    let report = extract(&generator, &package, &source, &mut never).unwrap();

    assert!(report.candidates.is_empty());
    assert!(!report.confirmed);
    assert_eq!(generator.calls(), 1);
}

#[test]
fn test_failed_candidate_does_not_roll_back_others() {
    let (temp, package) = create_package("risk-eval");
    let source = write_legacy(temp.path());
    let (start, _) = BlockKind::ToolCode.markers();
    let truncated = format!(
        "{start}\ndef run(**kwargs):\n    return 0\n{}",
        BlockKind::SkillDoc.wrap("- calc_b: documented")
    );
    let generator = ScriptedGenerator::new([
        analysis_response_for(&["calc_a", "calc_b", "calc_c"]),
        named_refactor_response("calc_a"),
        truncated,
        named_refactor_response("calc_c"),
    ]);

    let mut accept = |_: &str| -> Result<bool> { Ok(true) };
    let report = extract(&generator, &package, &source, &mut accept).unwrap();

    assert_eq!(generator.calls(), 4);
    let names: Vec<&str> = report.extracted.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["calc_a", "calc_c"]);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("calc_b"));

    assert!(package.tool_path("calc_a").is_file());
    assert!(!package.tool_path("calc_b").exists());
    assert!(package.tool_path("calc_c").is_file());
    assert_eq!(
        package.read_manifest().unwrap().tools,
        vec!["calc_a", "calc_c"]
    );

    let document = fs::read_to_string(package.document_path()).unwrap();
    assert!(document.contains("- calc_a: documented"));
    assert!(!document.contains("- calc_b: documented"));
    assert!(document.contains("- calc_c: documented"));
}
