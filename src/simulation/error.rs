//! Error types and handling
//!
//! This module contains error types for the simulation. Composition misuse is
//! the only error the generator itself raises; the remaining variants belong
//! to configuration loading and output.

use thiserror::Error;

/// Errors that can occur while composing or running a simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// An operand was composed into a position that cannot hold it
    #[error("Invalid composition: cannot add {operand} to {target}")]
    InvalidComposition {
        /// Kind of value being composed into
        target: &'static str,
        /// Kind of value that was rejected
        operand: &'static str,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create an invalid composition error
    pub fn invalid_composition(target: &'static str, operand: &'static str) -> Self {
        Self::InvalidComposition { target, operand }
    }

    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Whether this error is a composition contract violation
    pub fn is_invalid_composition(&self) -> bool {
        matches!(self, SimulationError::InvalidComposition { .. })
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::InvalidComposition { .. } => "Composition",
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
