//! Interview followed by document synthesis

use anyhow::Result;
use std::collections::VecDeque;

use skillsmith::compile::synthesize;
use skillsmith::config::DEFAULT_SENTINEL;
use skillsmith::interview::{Interview, InterviewSettings, TerminationReason, SEED_TURN};
use skillsmith::parser::BlockKind;

use super::helpers::{create_package, ScriptedGenerator};

#[test]
fn test_interview_then_synthesis() {
    let (_temp, package) = create_package("loan-review");

    let interviewer = ScriptedGenerator::new([
        "What is your role?".to_string(),
        format!("Thanks, that covers it. {DEFAULT_SENTINEL}"),
    ]);
    let mut answers = VecDeque::from(["I review small business loans.".to_string()]);
    let mut respondent = move || -> Result<Option<String>> { Ok(answers.pop_front()) };

    let outcome = Interview::new(&interviewer, InterviewSettings::default())
        .run(&mut respondent)
        .unwrap();

    assert_eq!(outcome.reason, TerminationReason::Signaled);
    assert!(outcome.is_sufficient());
    assert_eq!(interviewer.calls(), 2);
    // The seed goes out with the very first request
    assert_eq!(interviewer.requests()[0], SEED_TURN);

    let writer = ScriptedGenerator::new([BlockKind::SkillDocument.wrap(
        "# loan-review\n\n## Role\nLoan officer\n\n## Capabilities\n\n## Decision Chain\n\n## Constraints\n\n## Output Spec\n",
    )]);
    let report = synthesize(&writer, &package, &outcome.conversation).unwrap();

    assert!(report.document_replaced);
    assert!(report.missing_sections.is_empty());
    assert!(writer.requests()[0].contains("Expert: I review small business loans."));
}

#[test]
fn test_cancel_before_answering_is_insufficient() {
    let interviewer = ScriptedGenerator::new(["What is your role?"]);
    let mut respondent = || -> Result<Option<String>> { Ok(Some("QUIT".to_string())) };

    let outcome = Interview::new(&interviewer, InterviewSettings::default())
        .run(&mut respondent)
        .unwrap();

    assert_eq!(outcome.reason, TerminationReason::Cancelled);
    assert!(!outcome.is_sufficient());
    assert_eq!(interviewer.calls(), 1);
}
