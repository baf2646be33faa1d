//! Integration Tests Module
//!
//! End-to-end tests driving the scanner over in-memory collaborators.

pub mod scanner_pipeline;
