//! Validation for names that end up in file paths.
//!
//! Skill names become package directories and tool names become
//! `tools/<name>.py`, so both are checked before any path is built from them.
//! Tool names usually come from generated text and are treated as untrusted.

use anyhow::{bail, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum allowed length for skill and tool names.
pub const MAX_NAME_LENGTH: usize = 128;

/// Reserved names that cannot be used as skill names (case-insensitive).
const RESERVED_NAMES: &[&str] = &[
    ".", "..", "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
    "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

static PYTHON_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Validates that a skill name is safe for use as a directory name.
///
/// A name is valid if:
/// - It is not empty
/// - It is no longer than MAX_NAME_LENGTH characters
/// - It contains only alphanumeric characters, dashes, and underscores
/// - It does not use reserved system names
///
/// # Examples
///
/// ```
/// use skillsmith::validation::validate_skill_name;
///
/// assert!(validate_skill_name("risk-eval").is_ok());
/// assert!(validate_skill_name("").is_err());
/// assert!(validate_skill_name("../etc").is_err());
/// ```
pub fn validate_skill_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Skill name cannot be empty");
    }

    if name.len() > MAX_NAME_LENGTH {
        bail!(
            "Skill name too long: {} characters (max {})",
            name.len(),
            MAX_NAME_LENGTH
        );
    }

    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_chars {
        bail!("Skill name '{name}' contains invalid characters. Use only alphanumeric characters, dashes (-), and underscores (_)");
    }

    if RESERVED_NAMES.contains(&name.to_lowercase().as_str()) {
        bail!("Skill name '{name}' uses a reserved name");
    }

    Ok(())
}

/// Validates that a tool name is an importable Python module name.
///
/// Identifiers cannot contain path separators or dots, so a valid name
/// always resolves to a file directly inside `tools/`.
pub fn validate_tool_name(name: &str) -> Result<()> {
    if name.len() > MAX_NAME_LENGTH {
        bail!(
            "Tool name too long: {} characters (max {})",
            name.len(),
            MAX_NAME_LENGTH
        );
    }

    if !PYTHON_IDENTIFIER.is_match(name) {
        bail!("Tool name '{name}' is not a valid Python identifier");
    }

    if PYTHON_KEYWORDS.contains(&name) {
        bail!("Tool name '{name}' is a Python keyword");
    }

    if name == "__init__" {
        bail!("Tool name '{name}' is reserved for the package marker");
    }

    Ok(())
}

/// Clap value parser for validating skill name arguments.
///
/// ```ignore
/// #[arg(value_parser = clap_skill_name_validator)]
/// name: String,
/// ```
pub fn clap_skill_name_validator(s: &str) -> Result<String, String> {
    validate_skill_name(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
