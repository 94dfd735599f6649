//! FILENAME: engine/src/equation.rs
//! PURPOSE: The host-facing compiled equation.
//! CONTEXT: Hosts build a Grammar, compile equation text against it, and
//! call solve whenever they need a value. Compiling replaces the previous
//! tree and grammar wholesale; solving is read-only and never fails.

use crate::evaluator::{self, ParamCallback, TierCallback};
use log::{debug, warn};
use parser::{parse, Grammar, Node, ParseResult};

/// One compiled equation plus the grammar it was compiled against.
///
/// The tree is immutable once compiled. Re-compiling swaps the whole
/// instance state and must not race with concurrent solves.
#[derive(Debug, Default)]
pub struct Equation {
    text: String,
    grammar: Grammar,
    root: Option<Node>,
}

impl Equation {
    /// Creates an empty equation that solves to 0.0.
    pub fn new() -> Self {
        Equation::default()
    }

    /// Compiles `text` against `grammar`, replacing whatever this equation
    /// previously held. On failure the equation is left not-ready and
    /// solves to 0.0 until a later compile succeeds.
    pub fn compile(&mut self, text: &str, grammar: Grammar) -> ParseResult<()> {
        self.text = text.to_string();
        self.grammar = grammar;
        self.root = None;

        match parse(text, &self.grammar) {
            Ok(root) => {
                debug!("compiled equation {:?}", text);
                self.root = root;
                Ok(())
            }
            Err(error) => {
                warn!("failed to compile equation {:?}: {}", text, error);
                Err(error)
            }
        }
    }

    /// Solves the equation. `params` feeds `$1`..`$9` references and
    /// `tier` feeds the reserved `$tier` scalar; leaving either out makes
    /// the matching leaves evaluate to 0.0, as does an empty equation.
    pub fn solve(&self, params: Option<ParamCallback>, tier: Option<TierCallback>) -> f64 {
        match &self.root {
            Some(root) => evaluator::solve(root, params, tier),
            None => 0.0,
        }
    }

    /// The source text handed to the last compile call.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The grammar the equation was compiled against.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }
}
