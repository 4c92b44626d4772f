//! P2P module - network magic and bootstrap seeds

mod protocol;
mod seeds;

pub use protocol::*;
pub use seeds::*;
