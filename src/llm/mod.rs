//! Generative text service boundary.
//!
//! Every mode of the pipeline talks to the service through [`Generator`], so
//! tests can substitute a closure returning canned responses.

pub mod anthropic;

use anyhow::Result;
use serde::Serialize;

pub use anthropic::AnthropicClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message of a conversation sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A service that turns a system instruction plus a conversation into text.
pub trait Generator {
    fn generate(&self, system: &str, messages: &[Message]) -> Result<String>;
}

impl<F> Generator for F
where
    F: Fn(&str, &[Message]) -> Result<String>,
{
    fn generate(&self, system: &str, messages: &[Message]) -> Result<String> {
        self(system, messages)
    }
}
