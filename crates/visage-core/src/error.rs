//! Error types for Visage
//!
//! Per-frame animation paths never fail; these errors only surface at the
//! edges (configuration, scene construction, strict parsing).

use thiserror::Error;

/// Core Visage errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisageError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    // Scene errors
    #[error("Morph arity mismatch: {names} channel names, {weights} weights")]
    MorphArityMismatch { names: usize, weights: usize },

    #[error("Duplicate morph channel: {0}")]
    DuplicateChannel(String),

    #[error("Unknown scene node: {0}")]
    UnknownNode(usize),

    // Parsing errors
    #[error("Unknown viseme symbol: {0}")]
    UnknownViseme(String),
}

/// Result type for Visage operations
pub type VisageResult<T> = Result<T, VisageError>;
