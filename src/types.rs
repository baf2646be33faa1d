//! BTC↔XMR Atomic Swap Watcher - Type System
//!
//! - `transaction`: decoded transaction view (inputs with witness stacks, outputs with values)
//! - `swap`: swap lifecycle steps, candidate scripts and classification verdicts

mod swap;
mod transaction;

pub use swap::*;
pub use transaction::*;
