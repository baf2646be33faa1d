//! Shared formatting helpers

pub mod currency;
