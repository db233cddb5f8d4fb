//! Error types for couzin operations.
//!
//! Every failure is local and synchronous: construction mismatches,
//! misconfigured agents and invalid parameters surface to the caller
//! as a [`CouzinError`] instead of a panic.

use thiserror::Error;

/// Result type for couzin operations.
pub type Result<T> = std::result::Result<T, CouzinError>;

/// Errors that can occur while building or stepping a board.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CouzinError {
    /// Board construction errors.
    #[error("Construction error: {0}")]
    Construction(#[from] ConstructionError),
    /// Agent-related errors.
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),
    /// Graph and matrix errors.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
    /// Configuration errors.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while constructing a board.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    /// The agent factory produced the wrong number of agents.
    #[error("agent factory returned {found} agents, expected {expected}")]
    AgentCountMismatch { expected: usize, found: usize },
    /// The operation needs at least one agent.
    #[error("board has no agents")]
    EmptyBoard,
}

/// Agent-related errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    /// The agent's kind has no steering rule.
    #[error("agent {index} of kind {kind} has no steering rule")]
    NotImplemented { index: usize, kind: String },
    /// An index outside the board's agent sequence.
    #[error("agent index {index} out of range (n = {n})")]
    IndexOutOfRange { index: usize, n: usize },
}

/// Graph and matrix errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Two matrices that must agree in size do not.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
    /// A coordinate vector does not match the number of agents.
    #[error("state vector has length {found}, expected {expected}")]
    StateLength { expected: usize, found: usize },
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid value.
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Out of range.
    #[error("{field} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

// Convenience constructors
impl CouzinError {
    pub fn count_mismatch(expected: usize, found: usize) -> Self {
        CouzinError::Construction(ConstructionError::AgentCountMismatch { expected, found })
    }

    pub fn not_implemented(index: usize, kind: impl Into<String>) -> Self {
        CouzinError::Agent(AgentError::NotImplemented {
            index,
            kind: kind.into(),
        })
    }

    pub fn dimension_mismatch(left: usize, right: usize) -> Self {
        CouzinError::Graph(GraphError::DimensionMismatch { left, right })
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CouzinError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        CouzinError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_mismatch_message_names_both_counts() {
        let err = CouzinError::count_mismatch(5, 4);
        let msg = err.to_string();
        assert!(msg.contains("returned 4"), "{}", msg);
        assert!(msg.contains("expected 5"), "{}", msg);
    }

    #[test]
    fn not_implemented_is_an_agent_error() {
        let err = CouzinError::not_implemented(3, "generic");
        assert!(matches!(
            err,
            CouzinError::Agent(AgentError::NotImplemented { index: 3, .. })
        ));
    }
}
