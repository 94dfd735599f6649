//! FILENAME: parser/src/treeify.rs
//! PURPOSE: Reduces a flat operand/operator chain into a binary tree whose
//! shape encodes operator precedence.
//! CONTEXT: This is the third stage of the compilation pipeline. One scan
//! finds the loosest-binding operator, the chain splits there, and both
//! halves recurse. The chosen operator becomes the subtree root, so the
//! loosest operator is applied last when the tree is solved.

use crate::ast::{ChainItem, Node};

/// Turns `chain` into its expression tree.
///
/// The chain must strictly alternate operand/operator and hold at least
/// one operand; the flat builder guarantees this for every chain it
/// produces. A single-operand chain collapses to that operand.
///
/// # Panics
///
/// Panics if the chain is empty or does not alternate.
pub fn treeify(mut chain: Vec<ChainItem>) -> Node {
    debug_assert!(
        chain.len() % 2 == 1,
        "flat chain must alternate operand/operator"
    );

    if chain.len() == 1 {
        return match chain.pop() {
            Some(ChainItem::Operand(node)) => node,
            _ => unreachable!("flat chain must start with an operand"),
        };
    }

    // Operators sit at the odd indices. Scanning left to right with `>=`
    // keeps the rightmost operator of the loosest band, which makes that
    // operator the root and gives left-associativity within the band.
    let mut split_index = 1;
    let mut split_band = 0;
    for index in (1..chain.len()).step_by(2) {
        let band = match &chain[index] {
            ChainItem::Operator(op) => op.band(),
            ChainItem::Operand(_) => unreachable!("flat chain does not alternate"),
        };
        if band >= split_band {
            split_index = index;
            split_band = band;
        }
    }

    let right = chain.split_off(split_index + 1);
    let op = match chain.pop() {
        Some(ChainItem::Operator(op)) => op,
        _ => unreachable!("flat chain does not alternate"),
    };

    Node::Operator {
        op,
        left: Box::new(treeify(chain)),
        right: Box::new(treeify(right)),
    }
}
