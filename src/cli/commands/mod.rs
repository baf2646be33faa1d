pub mod classify;
pub mod rate;
pub mod run;
pub mod stats;
