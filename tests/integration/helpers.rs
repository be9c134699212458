//! Shared test helpers for generation mode integration tests

use anyhow::{bail, Result};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fs;
use tempfile::TempDir;

use skillsmith::fs::SkillPackage;
use skillsmith::llm::{Generator, Message};

/// Test helper: Scaffold a package named `name` in a fresh temporary directory
pub fn create_package(name: &str) -> (TempDir, SkillPackage) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let package = SkillPackage::create(temp_dir.path(), name, "tester", "finance")
        .expect("Failed to scaffold package");
    (temp_dir, package)
}

/// Test helper: Current manifest bytes, for unchanged-file assertions
pub fn manifest_bytes(package: &SkillPackage) -> String {
    fs::read_to_string(package.manifest_path()).expect("Failed to read manifest")
}

/// Generator that replays canned responses in order and records each request.
pub struct ScriptedGenerator {
    responses: RefCell<VecDeque<String>>,
    requests: RefCell<Vec<String>>,
    calls: Cell<usize>,
}

impl ScriptedGenerator {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: RefCell::new(responses.into_iter().map(Into::into).collect()),
            requests: RefCell::new(Vec::new()),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Content of the last message of each request, in call order
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Generator for ScriptedGenerator {
    fn generate(&self, _system: &str, messages: &[Message]) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        if let Some(last) = messages.last() {
            self.requests.borrow_mut().push(last.content.clone());
        }
        match self.responses.borrow_mut().pop_front() {
            Some(response) => Ok(response),
            None => bail!("no scripted response left"),
        }
    }
}
