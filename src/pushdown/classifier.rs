//! Predicate classifier - decides which filter conditions the dialect can
//! hold as indexable atoms.

use crate::rex::{RexNode, RexOp};

use super::PushdownOptions;

/// Classification of one candidate predicate atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomClass {
    /// Comparison of a resolvable field against a literal.
    FieldLiteral { field: usize },
    /// Comparison of two resolvable fields.
    FieldPair { left: usize, right: usize },
    Unsupported,
}

impl AtomClass {
    pub fn is_supported(&self) -> bool {
        !matches!(self, AtomClass::Unsupported)
    }
}

/// Split a condition into its top-level disjuncts, flattening nested ORs.
pub fn disjunctions(condition: &RexNode) -> Vec<&RexNode> {
    let mut out = Vec::new();
    collect(condition, RexOp::Or, &mut out);
    out
}

/// Split a condition into its top-level conjuncts, flattening nested ANDs.
pub fn conjunctions(condition: &RexNode) -> Vec<&RexNode> {
    let mut out = Vec::new();
    collect(condition, RexOp::And, &mut out);
    out
}

fn collect<'a>(node: &'a RexNode, op: RexOp, out: &mut Vec<&'a RexNode>) {
    match node {
        RexNode::Call {
            op: node_op,
            operands,
        } if *node_op == op => {
            for operand in operands {
                collect(operand, op, out);
            }
        }
        other => out.push(other),
    }
}

/// Classify one conjunct as a supported equality/range atom or not.
///
/// An atom is a two-operand comparison where, after unwrapping casts, one
/// side is a field reference resolvable against `field_count` and the other
/// is a literal, or both sides are field references. With
/// `strict_casts` set, a cast on either operand makes the atom unsupported
/// instead of being ignored - cast stripping can change comparison semantics
/// (truncating narrowing vs. widening), so strict deployments refuse to push
/// such predicates.
pub fn classify_atom(expr: &RexNode, field_count: usize, options: &PushdownOptions) -> AtomClass {
    let RexNode::Call { op, operands } = expr else {
        return AtomClass::Unsupported;
    };
    if !op.is_comparison() || operands.len() != 2 {
        return AtomClass::Unsupported;
    }

    if options.strict_casts
        && (matches!(operands[0], RexNode::Cast { .. })
            || matches!(operands[1], RexNode::Cast { .. }))
    {
        return AtomClass::Unsupported;
    }

    let left = operands[0].skip_casts();
    let right = operands[1].skip_casts();

    match (left, right) {
        (RexNode::FieldRef(f), RexNode::Literal(_)) | (RexNode::Literal(_), RexNode::FieldRef(f))
            if *f < field_count =>
        {
            AtomClass::FieldLiteral { field: *f }
        }
        (RexNode::FieldRef(l), RexNode::FieldRef(r)) if *l < field_count && *r < field_count => {
            AtomClass::FieldPair {
                left: *l,
                right: *r,
            }
        }
        _ => AtomClass::Unsupported,
    }
}
