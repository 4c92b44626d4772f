//! Address prefixes and base58check encoding
//!
//! Key management lives elsewhere; this module only knows how a network
//! tags and checksums the data a wallet hands to users.

mod address;
mod prefixes;

pub use address::*;
pub use prefixes::*;
