//! Layered configuration.
//!
//! Layers, lowest precedence first: built-in defaults, the user config file
//! (`<config dir>/skillsmith/config.toml`), the project file
//! (`./skillsmith.toml`), then environment variables. An explicit `--config`
//! path replaces both file layers.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE: &str = "skillsmith.toml";
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const MODEL_ENV: &str = "SKILLSMITH_MODEL";
pub const BASE_URL_ENV: &str = "SKILLSMITH_BASE_URL";

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_SENTINEL: &str = "[INTERVIEW COMPLETE]";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub interview: InterviewConfig,
    #[serde(default)]
    pub package: PackageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: String,
    pub interview_max_tokens: u32,
    pub generation_max_tokens: u32,
    pub timeout_secs: u64,
    /// Only ever read from the environment
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            interview_max_tokens: 2048,
            generation_max_tokens: 4096,
            timeout_secs: 300,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewConfig {
    pub sentinel: String,
    pub cancel_tokens: Vec<String>,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            cancel_tokens: vec!["quit".to_string(), "exit".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageConfig {
    pub author: String,
    pub industry: String,
    pub output_dir: PathBuf,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            author: "anonymous".to_string(),
            industry: crate::models::manifest::DEFAULT_INDUSTRY.to_string(),
            output_dir: PathBuf::from("./skills"),
        }
    }
}

impl Config {
    /// Load all layers. `project_dir` is where `skillsmith.toml` is looked up.
    pub fn load(explicit_path: Option<&Path>, project_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = explicit_path {
            if !path.exists() {
                bail!("Config file '{}' does not exist", path.display());
            }
            if let Some(patch) = load_patch(path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(path) = global_config_path() {
                if let Some(patch) = load_patch(&path)? {
                    config.merge_patch(patch);
                }
            }
            if let Some(patch) = load_patch(&project_dir.join(PROJECT_CONFIG_FILE))? {
                config.merge_patch(patch);
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.llm {
            self.llm.merge(patch);
        }
        if let Some(patch) = patch.interview {
            self.interview.merge(patch);
        }
        if let Some(patch) = patch.package {
            self.package.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_string(API_KEY_ENV) {
            self.llm.api_key = Some(value);
        }
        if let Some(value) = env_string(MODEL_ENV) {
            self.llm.model = value;
        }
        if let Some(value) = env_string(BASE_URL_ENV) {
            self.llm.base_url = value;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.llm.timeout_secs == 0 {
            bail!("llm.timeout_secs must be greater than zero");
        }
        if self.llm.interview_max_tokens == 0 || self.llm.generation_max_tokens == 0 {
            bail!("llm max_tokens values must be greater than zero");
        }
        if self.interview.sentinel.trim().is_empty() {
            bail!("interview.sentinel cannot be empty");
        }
        if self.interview.cancel_tokens.iter().any(|t| t.trim().is_empty()) {
            bail!("interview.cancel_tokens cannot contain blank entries");
        }
        Ok(())
    }
}

impl LlmConfig {
    fn merge(&mut self, patch: LlmPatch) {
        if let Some(value) = patch.model {
            self.model = value;
        }
        if let Some(value) = patch.base_url {
            self.base_url = value;
        }
        if let Some(value) = patch.interview_max_tokens {
            self.interview_max_tokens = value;
        }
        if let Some(value) = patch.generation_max_tokens {
            self.generation_max_tokens = value;
        }
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = value;
        }
    }
}

impl InterviewConfig {
    fn merge(&mut self, patch: InterviewPatch) {
        if let Some(value) = patch.sentinel {
            self.sentinel = value;
        }
        if let Some(value) = patch.cancel_tokens {
            self.cancel_tokens = value;
        }
    }
}

impl PackageConfig {
    fn merge(&mut self, patch: PackagePatch) {
        if let Some(value) = patch.author {
            self.author = value;
        }
        if let Some(value) = patch.industry {
            self.industry = value;
        }
        if let Some(value) = patch.output_dir {
            self.output_dir = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    llm: Option<LlmPatch>,
    interview: Option<InterviewPatch>,
    package: Option<PackagePatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LlmPatch {
    model: Option<String>,
    base_url: Option<String>,
    interview_max_tokens: Option<u32>,
    generation_max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct InterviewPatch {
    sentinel: Option<String>,
    cancel_tokens: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackagePatch {
    author: Option<String>,
    industry: Option<String>,
    output_dir: Option<PathBuf>,
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("skillsmith").join("config.toml"))
}

fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let patch = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(Some(patch))
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
