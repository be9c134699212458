pub mod document;
pub mod manifest;
pub mod tool;

pub use document::{CanonicalSection, SkillDocument};
pub use manifest::{Manifest, ManifestUpdate};
pub use tool::{Analysis, ExtractionCandidate, ToolModule, ToolSchema};
