//! Scalar expression AST.
//!
//! Expressions are immutable trees shared by reference during translation;
//! the translator and classifier never mutate them.

use crate::plan::schema::{FieldType, RowSchema};

/// A scalar expression.
#[derive(Debug, Clone, PartialEq)]
pub enum RexNode {
    /// Reference to a field of the input row, by ordinal.
    FieldRef(usize),

    /// Literal value.
    Literal(Literal),

    /// Type cast. Classification and translation look through casts
    /// (subject to the strictness toggle).
    Cast { expr: Box<RexNode>, ty: FieldType },

    /// Operator application: comparisons, boolean combinators, item access.
    Call { op: RexOp, operands: Vec<RexNode> },
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
}

/// Operators usable in a `RexNode::Call`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RexOp {
    // Comparison
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    // Logical
    And,
    Or,
    Not,
    // Item access: operands are [base, key]
    Item,
}

impl RexOp {
    /// True for the two-operand comparison operators.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            RexOp::Eq | RexOp::Ne | RexOp::Lt | RexOp::Lte | RexOp::Gt | RexOp::Gte
        )
    }
}

impl RexNode {
    /// Strip any number of leading casts.
    pub fn skip_casts(&self) -> &RexNode {
        let mut node = self;
        while let RexNode::Cast { expr, .. } = node {
            node = expr;
        }
        node
    }

    /// True when stripping casts reveals a field reference.
    pub fn is_field_ref(&self) -> bool {
        matches!(self.skip_casts(), RexNode::FieldRef(_))
    }

    /// Static result type of this expression against `input`, when known.
    ///
    /// Item access over a schema-flexible object has no static type; casts
    /// report their target type.
    pub fn result_type(&self, input: &RowSchema) -> Option<FieldType> {
        match self {
            RexNode::FieldRef(i) => input.field_type(*i),
            RexNode::Literal(lit) => Some(match lit {
                Literal::Int(_) => FieldType::Integer,
                Literal::Float(_) => FieldType::Float,
                Literal::String(_) => FieldType::String,
                Literal::Bool(_) => FieldType::Boolean,
                Literal::Null => FieldType::Object,
            }),
            RexNode::Cast { ty, .. } => Some(*ty),
            RexNode::Call { op, .. } => match op {
                RexOp::Item => None,
                _ => Some(FieldType::Boolean),
            },
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

/// Field reference by ordinal.
pub fn field(index: usize) -> RexNode {
    RexNode::FieldRef(index)
}

pub fn lit_int(v: i64) -> RexNode {
    RexNode::Literal(Literal::Int(v))
}

pub fn lit_float(v: f64) -> RexNode {
    RexNode::Literal(Literal::Float(v))
}

pub fn lit_str(v: impl Into<String>) -> RexNode {
    RexNode::Literal(Literal::String(v.into()))
}

pub fn lit_bool(v: bool) -> RexNode {
    RexNode::Literal(Literal::Bool(v))
}

pub fn lit_null() -> RexNode {
    RexNode::Literal(Literal::Null)
}

pub fn cast(expr: RexNode, ty: FieldType) -> RexNode {
    RexNode::Cast {
        expr: Box::new(expr),
        ty,
    }
}

fn binary(op: RexOp, left: RexNode, right: RexNode) -> RexNode {
    RexNode::Call {
        op,
        operands: vec![left, right],
    }
}

pub fn eq(left: RexNode, right: RexNode) -> RexNode {
    binary(RexOp::Eq, left, right)
}

pub fn ne(left: RexNode, right: RexNode) -> RexNode {
    binary(RexOp::Ne, left, right)
}

pub fn lt(left: RexNode, right: RexNode) -> RexNode {
    binary(RexOp::Lt, left, right)
}

pub fn lte(left: RexNode, right: RexNode) -> RexNode {
    binary(RexOp::Lte, left, right)
}

pub fn gt(left: RexNode, right: RexNode) -> RexNode {
    binary(RexOp::Gt, left, right)
}

pub fn gte(left: RexNode, right: RexNode) -> RexNode {
    binary(RexOp::Gte, left, right)
}

pub fn and(left: RexNode, right: RexNode) -> RexNode {
    binary(RexOp::And, left, right)
}

pub fn or(left: RexNode, right: RexNode) -> RexNode {
    binary(RexOp::Or, left, right)
}

pub fn not(expr: RexNode) -> RexNode {
    RexNode::Call {
        op: RexOp::Not,
        operands: vec![expr],
    }
}

/// Item access: `base[key]` for integer keys, `base.key` for string keys.
pub fn item(base: RexNode, key: RexNode) -> RexNode {
    binary(RexOp::Item, base, key)
}
