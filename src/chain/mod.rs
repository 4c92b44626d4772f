//! Chain parameters - per-network constants, checkpoints, selection

mod checkpoints;
pub(crate) mod literals;
mod network;
mod params;
mod registry;
mod validate;

pub use checkpoints::*;
pub use network::*;
pub use params::*;
pub use registry::*;
