//! The PatternScript language.
//!
//! This crate implements the compiler backend consumed by the studio:
//! - Lexing and parsing source text into an AST ([`parse`])
//! - Generating textual three-address code ([`tac::TacGenerator`])
//! - Constant folding and dead-branch elimination ([`optimize::optimize`])
//! - Tree-walking interpretation ([`interp::Interpreter`])
//!
//! The interpreter takes its input and output channels as injected seams:
//! an [`interp::InputProvider`] resolves `ask` statements, and a
//! `std::fmt::Write` sink receives everything `plot` emits. The crate itself
//! never touches stdin or stdout.

pub mod ast;
pub mod error;
pub mod interp;
mod lexer;
pub mod optimize;
mod parser;
pub mod tac;
pub mod value;

pub use ast::{BinOp, ChooseArm, Expr, ExprKind, Literal, Span, Stmt};
pub use error::{GenerationError, LangError, OptimizationError, RuntimeError, SyntaxError};
pub use interp::{InputProvider, Interpreter};
pub use optimize::optimize;
pub use tac::TacGenerator;
pub use value::Value;

/// Parse source text into a list of top-level statements.
///
/// This is the first pipeline phase: it runs the lexer and the recursive
/// descent parser and reports the first failure as a [`SyntaxError`] with a
/// line:column position.
pub fn parse(source: &str) -> Result<Vec<Stmt>, SyntaxError> {
    let tokens = lexer::lex(source)?;
    parser::parse(tokens)
}
