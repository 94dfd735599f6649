//! FILENAME: engine/src/evaluator.rs
//! PURPOSE: Walks a compiled equation tree and computes its value.
//! CONTEXT: One exhaustive match over the node kinds. Leaves pull from the
//! caller-supplied callbacks, operator nodes combine their two solved
//! children. Solving never fails: missing callbacks and division by zero
//! degrade to 0.0.

use parser::{BinaryOperator, Node};

/// Solve-time callback feeding `$1`..`$9` parameter leaves.
pub type ParamCallback<'a> = &'a dyn Fn(u8) -> f64;

/// Solve-time callback feeding the reserved `$tier` leaf.
pub type TierCallback<'a> = &'a dyn Fn() -> f64;

/// Recursively solves `node` against the caller's callbacks.
pub fn solve(node: &Node, params: Option<ParamCallback>, tier: Option<TierCallback>) -> f64 {
    match node {
        Node::Literal(value) => *value,
        Node::Param(index) => match params {
            Some(callback) => callback(*index),
            None => 0.0,
        },
        // Bound at compile time; the callback's value may still change
        // between solves.
        Node::Function { callback, .. } => callback(),
        Node::Rand => rand::random::<f64>(),
        Node::Tier => match tier {
            Some(callback) => callback(),
            None => 0.0,
        },
        Node::SubExpression(child) => solve(child, params, tier),
        Node::Operator { op, left, right } => {
            let left = solve(left, params, tier);
            let right = solve(right, params, tier);
            apply(*op, left, right)
        }
    }
}

/// Applies one binary operator. Dividing or taking the remainder by
/// exactly 0.0 yields 0.0 instead of an infinity or NaN.
fn apply(op: BinaryOperator, left: f64, right: f64) -> f64 {
    match op {
        BinaryOperator::Power => left.powf(right),
        BinaryOperator::Multiply => left * right,
        BinaryOperator::Divide => {
            if right == 0.0 {
                0.0
            } else {
                left / right
            }
        }
        BinaryOperator::Modulo => {
            if right == 0.0 {
                0.0
            } else {
                left % right
            }
        }
        BinaryOperator::Add => left + right,
        BinaryOperator::Subtract => left - right,
    }
}
