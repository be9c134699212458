pub mod markdown;
pub mod markers;
pub mod python;

pub use markers::{decode, extract_between, BlockKind, BlockSet};
