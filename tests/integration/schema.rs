//! Schema compilation against a scaffolded package

use std::fs;

use skillsmith::compile::{compile_schema, SchemaOutcome};
use skillsmith::fs::package::EXAMPLE_TOOL;
use skillsmith::parser::BlockKind;

use super::helpers::{create_package, manifest_bytes, ScriptedGenerator};

const SCORE_TOOL: &str = "\"\"\"Credit scoring.\"\"\"\n\ndef run(income, debt):\n    \"\"\"Score an applicant.\"\"\"\n    return 0\n";

#[test]
fn test_no_tools_skips_without_calling_service() {
    let (_temp, package) = create_package("risk-eval");
    fs::remove_file(package.tool_path(EXAMPLE_TOOL)).unwrap();
    let before = manifest_bytes(&package);
    let generator = ScriptedGenerator::new(Vec::<String>::new());

    let report = compile_schema(&generator, &package).unwrap();

    assert_eq!(report.outcome, SchemaOutcome::Skipped);
    assert_eq!(generator.calls(), 0);
    assert!(!package.schema_path().exists());
    assert_eq!(manifest_bytes(&package), before);
}

#[test]
fn test_compile_writes_schema_and_resyncs_tools() {
    let (_temp, package) = create_package("risk-eval");
    fs::write(package.tool_path("score"), SCORE_TOOL).unwrap();
    package
        .update_manifest(|m| m.register_tool("retired_tool"))
        .unwrap();

    let schema = r#"[
        {"name": "example_tool", "description": "Example", "input_schema": {"type": "object", "properties": {}, "required": []}},
        {"name": "score", "description": "Score an applicant", "input_schema": {"type": "object", "properties": {"income": {"type": "number"}}, "required": ["income"]}}
    ]"#;
    let generator = ScriptedGenerator::new([BlockKind::Schema.wrap(schema)]);

    let report = compile_schema(&generator, &package).unwrap();

    assert_eq!(
        report.outcome,
        SchemaOutcome::Compiled {
            entries: 2,
            manifest_updated: true,
        }
    );
    assert_eq!(report.scan.names(), vec!["example_tool", "score"]);
    assert_eq!(
        package.read_manifest().unwrap().tools,
        vec!["example_tool", "score"]
    );

    let written = package.read_schema().unwrap().unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(written[1].name, "score");

    // Docstrings and source reach the service
    let request = &generator.requests()[0];
    assert!(request.contains("### Tool: score"));
    assert!(request.contains("Score an applicant."));
}

#[test]
fn test_malformed_schema_writes_nothing() {
    let (_temp, package) = create_package("risk-eval");
    let before = manifest_bytes(&package);
    let generator = ScriptedGenerator::new([BlockKind::Schema.wrap("[{\"name\": ")]);

    let report = compile_schema(&generator, &package).unwrap();

    assert!(matches!(report.outcome, SchemaOutcome::NotGenerated { .. }));
    assert!(!package.schema_path().exists());
    assert_eq!(manifest_bytes(&package), before);
}

#[test]
fn test_missing_end_marker_writes_nothing() {
    let (_temp, package) = create_package("risk-eval");
    let (start, _) = BlockKind::Schema.markers();
    let generator = ScriptedGenerator::new([format!("{start}\n[]")]);

    let report = compile_schema(&generator, &package).unwrap();

    assert!(matches!(report.outcome, SchemaOutcome::NotGenerated { .. }));
    assert!(!package.schema_path().exists());
}

#[test]
fn test_unparseable_tool_is_not_registered() {
    let (_temp, package) = create_package("risk-eval");
    fs::write(package.tool_path("broken"), "def run():\n    return return\n").unwrap();

    let schema = r#"[{"name": "example_tool", "description": "Example"}]"#;
    let generator = ScriptedGenerator::new([BlockKind::Schema.wrap(schema)]);

    let report = compile_schema(&generator, &package).unwrap();

    assert_eq!(report.scan.names(), vec!["example_tool"]);
    assert_eq!(report.scan.skipped.len(), 1);
    assert!(report.warnings.iter().any(|w| w.contains("broken.py")));
    assert_eq!(package.read_manifest().unwrap().tools, vec!["example_tool"]);
    assert!(!generator.requests()[0].contains("### Tool: broken"));
}
