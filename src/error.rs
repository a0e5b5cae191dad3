use std::fmt;

/// Errors raised while building a model or evaluating a formula over it.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A proposition, state or action name is empty or contains a reserved operator character.
    InvalidName { name: String, reserved: Option<char> },
    DuplicateProposition(String),
    DuplicateState(String),
    /// A guard expression refers to a proposition the engine does not know.
    UnknownProposition(String),
    /// A transition record refers to a state the model does not declare.
    UnknownState(String),
    /// Unexpected character at the head of the remaining input.
    Syntax { found: char, position: usize },
    /// The input ended while an operator still expected an operand.
    UnexpectedEnd { position: usize },
    /// A complete expression was read but input remains.
    TrailingInput { position: usize },
    /// Bounded until without a (valid) numeric bound.
    InvalidBound { position: usize },
    /// Formula nesting exceeds the configured limit.
    TooDeep { limit: usize },
    /// The operator parses but has no evaluation algorithm.
    Unsupported(&'static str),
    InvalidComparator(String),
    ProbabilityOutOfRange(f64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidName { name, reserved: Some(c) } => {
                write!(f, "invalid name '{}': contains reserved character '{}'", name, c)
            }
            Error::InvalidName { name, reserved: None } => write!(f, "invalid name '{}'", name),
            Error::DuplicateProposition(name) => write!(f, "duplicate proposition '{}'", name),
            Error::DuplicateState(name) => write!(f, "duplicate state '{}'", name),
            Error::UnknownProposition(name) => write!(f, "unknown proposition '{}'", name),
            Error::UnknownState(name) => write!(f, "unknown state '{}'", name),
            Error::Syntax { found, position } => {
                write!(f, "syntax error: unexpected '{}' at position {}", found, position)
            }
            Error::UnexpectedEnd { position } => {
                write!(f, "syntax error: unexpected end of input at position {}", position)
            }
            Error::TrailingInput { position } => {
                write!(f, "syntax error: trailing input at position {}", position)
            }
            Error::InvalidBound { position } => {
                write!(f, "syntax error: expected a bound at position {}", position)
            }
            Error::TooDeep { limit } => write!(f, "formula nesting exceeds the limit of {}", limit),
            Error::Unsupported(op) => write!(f, "unsupported operator: {}", op),
            Error::InvalidComparator(s) => {
                write!(f, "invalid comparator '{}': expected a combination of '<', '>' and '='", s)
            }
            Error::ProbabilityOutOfRange(p) => {
                write!(f, "probability threshold {} is outside [0, 1]", p)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T, E = Error> = std::result::Result<T, E>;
