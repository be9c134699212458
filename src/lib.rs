pub mod commands;
pub mod compile;
pub mod config;
pub mod error;
pub mod fs;
pub mod interview;
pub mod llm;
pub mod models;
pub mod parser;
pub mod utils;
pub mod validation;
