//! Error types for the four pipeline phases.
//!
//! Each phase has its own error type; [`LangError`] unifies them so the
//! pipeline runner can catch any phase failure at a single boundary and
//! format it with one `Display` call.

use thiserror::Error;

/// Lexing or parsing failure, with a 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at line {line}:{col}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub line: u32,
    pub col: u32,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: u32, col: u32) -> Self {
        Self {
            message: message.into(),
            line,
            col,
        }
    }
}

/// Three-address-code generation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("program generates more than {limit} intermediate instructions")]
    TooManyInstructions { limit: usize },
}

/// Optimizer failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizationError {
    #[error("integer overflow in constant expression")]
    Overflow,
}

/// Runtime error during interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    Overflow,
    #[error("loop bounds must be integers")]
    NonIntegerBounds,
    #[error("execution exceeded {0} steps")]
    StepLimit(u64),
    #[error("output write failed")]
    Write(#[from] std::fmt::Error),
}

/// Any failure from any pipeline phase.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LangError {
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
    #[error("{0}")]
    Generation(#[from] GenerationError),
    #[error("{0}")]
    Optimization(#[from] OptimizationError),
    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_display_carries_position() {
        let e = SyntaxError::new("unexpected '}'", 4, 9);
        assert_eq!(e.to_string(), "syntax error at line 4:9: unexpected '}'");
    }

    #[test]
    fn lang_error_display_is_transparent() {
        let e = LangError::from(RuntimeError::DivisionByZero);
        assert_eq!(e.to_string(), "division by zero");
        let e = LangError::from(OptimizationError::Overflow);
        assert_eq!(e.to_string(), "integer overflow in constant expression");
    }
}
