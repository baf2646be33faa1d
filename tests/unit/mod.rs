//! Unit Tests Module
//!
//! Component-level tests for the detection pipeline, the posted-alert store
//! and alert formatting.

pub mod detection;
