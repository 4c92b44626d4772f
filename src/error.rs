//! Error types for parameter construction, selection and validation
//!
//! None of these are retryable: they mean either a bad network name from the
//! operator or broken compiled-in constants.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Network already selected: current {current}, requested {requested}")]
    AlreadySelected { current: String, requested: String },

    #[error("Invalid hex in {field}: {reason}")]
    InvalidHex { field: &'static str, reason: String },

    #[error("Invalid public key in {field}: {reason}")]
    InvalidPublicKey { field: &'static str, reason: String },

    #[error("Genesis {field} mismatch on {network}: expected {expected}, computed {computed}")]
    GenesisMismatch {
        network: String,
        field: &'static str,
        expected: String,
        computed: String,
    },

    #[error("Invalid fixed seed: {0}")]
    InvalidSeed(String),

    #[error("Invalid checkpoints: {0}")]
    InvalidCheckpoints(String),

    #[error("Invalid address prefixes: {0}")]
    InvalidPrefixes(String),

    #[error("Invalid deployments: {0}")]
    InvalidDeployments(String),

    #[error("Invalid consensus parameters: {0}")]
    InvalidConsensus(String),
}

pub type Result<T> = std::result::Result<T, ParamsError>;
