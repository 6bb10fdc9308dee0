use std::fmt;

use thiserror::Error;

/// Which stage of the two-phase method was running when a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Minimizing the sum of artificial variables to find a feasible basis
    One,
    /// Optimizing the real objective from a feasible basis
    Two,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::One => f.write_str("phase 1"),
            Phase::Two => f.write_str("phase 2"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Problem is Unbounded (no admissible leaving row in {phase})")]
    Unbounded { phase: Phase },
    #[error("Problem is Infeasible: artificial sum {residual:e} remains after phase 1")]
    Infeasible { residual: f64 },
    #[error("Max iterations ({limit}) reached in {phase}")]
    MaxIterations { limit: usize, phase: Phase },
}

pub type Result<T> = std::result::Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_match_words() {
        let unbounded = SolverError::Unbounded { phase: Phase::Two };
        assert!(unbounded.to_string().contains("Unbounded"));

        let infeasible = SolverError::Infeasible { residual: 5.0 };
        assert!(infeasible.to_string().contains("Infeasible"));

        let limit = SolverError::MaxIterations { limit: 1, phase: Phase::One };
        assert_eq!(limit.to_string(), "Max iterations (1) reached in phase 1");

        let invalid = SolverError::InvalidInput("empty objective".to_string());
        assert_eq!(invalid.to_string(), "Invalid input: empty objective");
    }
}
