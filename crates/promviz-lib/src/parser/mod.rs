//! Parser infrastructure for PromQL.
//!
//! # Architecture
//!
//! This parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder.
//! Every byte of the input, including whitespace, comments and garbage, is present in the tree,
//! so node ranges can be used to splice the original text.
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace/comments collected, then flushed into the enclosing node
//! - Checkpoint-based wrapping: binary operators and `[range]`/`offset`/`@` suffixes wrap
//!   the already-built left operand
//! - Explicit recovery sets: per-production sets determine when to bail vs consume
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree. Recovery follows these rules:
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic and a zero-width `Error` node, consuming nothing
//! 3. Recovery sets define "synchronization points" per production
//!
//! However, fuel exhaustion (exec_fuel, recursion_fuel) returns an actual error immediately.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;
mod invariants;
mod printer;

#[cfg(test)]
mod tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use core::Parser;
pub use grammar::is_aggregation_op;
pub use printer::CstPrinter;

use crate::PassResult;
use lexer::lex;

/// Nesting depth accepted by [`parse`].
pub const DEFAULT_RECURSION_LIMIT: u32 = 256;

/// Parse result containing the green tree.
///
/// The tree is always complete; diagnostics are returned separately.
/// Error nodes in the tree represent recovery points.
#[derive(Debug, Clone)]
pub struct Parse {
    cst: rowan::GreenNode,
}

impl Parse {
    pub fn as_cst(&self) -> &rowan::GreenNode {
        &self.cst
    }

    /// Creates a typed view over the immutable green tree.
    /// SyntaxNode is a thin wrapper with parent pointers.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.cst.clone())
    }

    pub fn root(&self) -> ast::Root {
        ast::Root::from_root(self.syntax())
    }

    pub fn printer(&self) -> CstPrinter {
        CstPrinter::new(self.syntax())
    }
}

/// Main entry point. Returns Err on fuel exhaustion.
pub fn parse(source: &str) -> PassResult<Parse> {
    parse_with_parser(
        Parser::new(source, lex(source)).with_recursion_fuel(Some(DEFAULT_RECURSION_LIMIT)),
    )
}

/// Parse with a pre-configured parser (for custom fuel limits).
pub fn parse_with_parser(mut parser: Parser) -> PassResult<Parse> {
    parser.parse_root();
    let (cst, diagnostics) = parser.finish()?;
    Ok((Parse { cst }, diagnostics))
}
