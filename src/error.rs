// Error type shared by every fallible operation in the crate
use thiserror::Error;

/// Precondition violations, surfaced synchronously and never clamped.
///
/// Infinite answers and "no solution" are not errors; see
/// [`crate::solvers::Solution`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("parameter `{name}` must be non-negative, got {value}")]
    NegativeParameter { name: &'static str, value: f64 },

    #[error("K must be non-negative, got {0}")]
    NegativeK(f64),

    #[error("math domain error: {0} has no real value")]
    ComplexResult(&'static str),

    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),

    #[error("indeterminate form 0/0: {0}")]
    Indeterminate(&'static str),

    #[error("height is unreachable: discriminant {discriminant} is negative")]
    UnreachableHeight { discriminant: f64 },

    #[error("root not bracketed: f({lo}) = {f_lo}, f({hi}) = {f_hi}")]
    NotBracketed { lo: f64, hi: f64, f_lo: f64, f_hi: f64 },

    #[error("invalid bracket [{lo}, {hi}]")]
    InvalidBracket { lo: f64, hi: f64 },

    #[error("function is not finite at x = {x}")]
    NonFiniteEvaluation { x: f64 },

    #[error("no bracket found after {iterations} expansions")]
    BracketSearchFailed { iterations: usize },

    #[error("n must be a unit vector, got length {length}")]
    NotUnitVector { length: f64 },
}

pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = DomainError::NegativeParameter { name: "tau", value: -1.0 };
        assert!(err.to_string().contains("tau"));

        let err = DomainError::NotBracketed { lo: 1.0, hi: 3.0, f_lo: 2.0, f_hi: 10.0 };
        assert!(err.to_string().starts_with("root not bracketed"));
    }
}
