//! Consensus module - block and coinbase structures, compact targets, rule sets

mod block;
mod difficulty;
mod params;
mod script;
mod transaction;

pub use block::*;
pub use difficulty::*;
pub use params::*;
pub use script::*;
pub use transaction::*;
