//! Push-down decision and translation engine.
//!
//! Given a linear operator chain (scan at the leaf), the planner accepts the
//! longest prefix the remote dialect can express and compiles it into one
//! query string. Rejection at any operator terminates the chain there; the
//! suffix stays with the host engine.
//!
//! Rejection is control flow, not an error: a plan that cannot be pushed at
//! all still compiles to a bare `SELECT * FROM /region` with the entire
//! operator chain left as residual work.

pub mod classifier;
pub mod rules;
pub mod translator;

pub use classifier::{classify_atom, conjunctions, disjunctions, AtomClass};
pub use translator::OqlTranslator;

use serde::Deserialize;

use crate::oql::{build_query, OqlContext};
use crate::plan::{RelNode, RowSchema};

/// Marker for an expression or operator shape the dialect cannot express.
///
/// Always recovered inside [`PushdownPlanner::compile`]; it never reaches
/// callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unsupported;

/// Tunables for the acceptance rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PushdownOptions {
    /// Refuse predicates whose operands are cast-wrapped instead of ignoring
    /// the casts. Cast stripping can change comparison semantics, so strict
    /// deployments keep such filters local.
    pub strict_casts: bool,
}

/// One compiled remote query plus the row shape it produces.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub oql: String,
    pub schema: RowSchema,
}

/// Outcome of compiling a plan: the query for the accepted prefix and how
/// much of the chain it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct PushdownResult {
    pub query: CompiledQuery,
    /// Operators accepted into the remote query, counting the scan.
    pub accepted: usize,
    /// Operators left for the host engine, from the first rejection upward.
    pub residual: usize,
}

impl PushdownResult {
    /// True when the whole chain executes remotely.
    pub fn is_complete(&self) -> bool {
        self.residual == 0
    }
}

/// Compiles the maximal remote-executable prefix of an operator chain.
#[derive(Debug, Clone, Default)]
pub struct PushdownPlanner {
    options: PushdownOptions,
}

impl PushdownPlanner {
    pub fn new(options: PushdownOptions) -> Self {
        Self { options }
    }

    /// Compile `plan` into a remote query for its accepted prefix.
    ///
    /// Returns `None` when the chain is not anchored at a region scan -
    /// nothing can be delegated then. Compilation never mutates the plan;
    /// only the transient context accumulates state.
    pub fn compile(&self, plan: &RelNode) -> Option<PushdownResult> {
        // Walk down to the leaf, remembering the chain top-down.
        let mut chain = vec![plan];
        let mut current = plan;
        while let Some(input) = current.input() {
            chain.push(input);
            current = input;
        }
        chain.reverse();

        let RelNode::Scan(scan) = chain[0] else {
            return None;
        };

        let mut context = OqlContext::new(&scan.region);
        let mut accepted_node: &RelNode = chain[0];
        let mut accepted = 1;

        for &node in &chain[1..] {
            if !rules::matches(node, accepted_node, &self.options) {
                tracing::trace!(operator = ?operator_kind(node), "push-down stopped: shape unsupported");
                break;
            }
            // Apply against a scratch copy so a mid-apply translation failure
            // leaves no partial contribution behind.
            let mut trial = context.clone();
            if rules::apply(node, accepted_node, &mut trial, &self.options).is_err() {
                tracing::trace!(operator = ?operator_kind(node), "push-down stopped: not translatable");
                break;
            }
            context = trial;
            accepted_node = node;
            accepted += 1;
        }

        let schema = accepted_node.row_type();
        let oql = build_query(&context);
        Some(PushdownResult {
            query: CompiledQuery { oql, schema },
            accepted,
            residual: chain.len() - accepted,
        })
    }
}

fn operator_kind(node: &RelNode) -> &'static str {
    match node {
        RelNode::Scan(_) => "scan",
        RelNode::Filter(_) => "filter",
        RelNode::Project(_) => "project",
        RelNode::Aggregate(_) => "aggregate",
        RelNode::Sort(_) => "sort",
    }
}
