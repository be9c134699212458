pub mod atomic;
pub mod package;
pub mod scanner;

pub use atomic::write_atomic;
pub use package::SkillPackage;
pub use scanner::{scan_tools, ScanReport, SkippedTool};
