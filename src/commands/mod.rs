pub mod common;
pub mod compile;
pub mod init;
pub mod interview;
pub mod scan;
pub mod status;
