//! Cryptography module - double-SHA256, merkle roots, curve keys, PoW hash seam

mod hash;
mod keys;
mod merkle;
mod pow;

pub use hash::*;
pub use keys::*;
pub use merkle::*;
pub use pow::*;
