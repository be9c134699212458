//! Package compilation modes.
//!
//! Each mode gathers context, makes generative calls, decodes the marker
//! blocks, applies them, and persists the package. Skipped units are
//! collected in the mode's report; applied units are never rolled back.

pub mod extraction;
pub mod gate;
pub mod prompts;
pub mod schema;
pub mod synthesis;

pub use extraction::{extract, ExtractedTool, ExtractionReport};
pub use gate::{Confirm, StdinConfirm};
pub use schema::{compile_schema, SchemaOutcome, SchemaReport};
pub use synthesis::{synthesize, SynthesisReport};
