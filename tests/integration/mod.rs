//! Integration tests for skillsmith's generation modes
//!
//! Each test drives a mode end-to-end against a scaffolded package in a
//! temporary directory, with a scripted generator standing in for the service.

pub mod extraction;
pub mod helpers;
pub mod interview;
pub mod schema;
pub mod synthesis;
