//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the equation engine.
//! CONTEXT: Re-exports the compiled-equation type and the evaluator, plus
//! the parser crate's public surface, so hosts only need one dependency.
//!
//! Usage: build a Grammar with the host's named callbacks, compile the
//! designer-authored equation text against it once, then solve as often
//! as needed with fresh parameter/tier callbacks.

pub mod equation;
pub mod evaluator;

// Re-export commonly used types at the crate root
pub use equation::Equation;
pub use evaluator::{solve, ParamCallback, TierCallback};
pub use parser::{
    BinaryOperator, FunctionCallback, Grammar, Node, ParseError, ParseResult, Token, TokenKind,
};
