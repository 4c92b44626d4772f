//! Node bootstrap - genesis block construction

mod genesis;

pub use genesis::*;
