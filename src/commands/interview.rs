//! `skillsmith interview`: run an expert interview, then synthesize the document.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::common::{open_package, print_warnings, section, success};
use crate::compile::synthesize;
use crate::config::Config;
use crate::interview::{Interview, InterviewSettings, StdinRespondent, TerminationReason};
use crate::llm::AnthropicClient;
use crate::utils::display_path;

pub fn execute(skill_dir: &Path, config: &Config) -> Result<()> {
    let package = open_package(skill_dir)?;
    let settings = InterviewSettings::from(&config.interview);

    section("Expert interview");
    let tokens = settings.cancel_tokens.join(" or ");
    println!("  {}", format!("(type {tokens} to end the interview at any time)").dimmed());

    let interviewer = AnthropicClient::from_config(&config.llm, config.llm.interview_max_tokens)?;
    let outcome = Interview::new(&interviewer, settings).run(&mut StdinRespondent)?;

    match outcome.reason {
        TerminationReason::Signaled => println!("\n  {} Interview complete", "✓".green().bold()),
        TerminationReason::Cancelled => println!("\n  {} Interview ended", "→".yellow().bold()),
    }

    if !outcome.is_sufficient() {
        println!(
            "  {} Not enough interview content; document generation skipped",
            "!".yellow().bold()
        );
        return Ok(());
    }

    section("Generate documents");
    let writer = AnthropicClient::from_config(&config.llm, config.llm.generation_max_tokens)?;
    let report = synthesize(&writer, &package, &outcome.conversation)?;

    if report.document_replaced {
        success(format!(
            "Updated {}",
            display_path(&package.document_path(), package.root())
        ));
    }
    if report.manifest_updated {
        success(format!(
            "Updated {}",
            display_path(&package.manifest_path(), package.root())
        ));
    }
    if !report.missing_sections.is_empty() {
        let titles: Vec<&str> = report.missing_sections.iter().map(|s| s.title()).collect();
        println!(
            "  {} Document lacks sections: {}",
            "!".yellow().bold(),
            titles.join(", ")
        );
    }
    print_warnings(&report.warnings);

    Ok(())
}
