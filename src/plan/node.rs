//! Relational operator nodes.
//!
//! The operator set is fixed: the push-down dispatcher matches exhaustively
//! over these variants, so adding a variant forces every acceptance rule to
//! be revisited.

use crate::plan::schema::{Field, FieldType, RowSchema};
use crate::rex::RexNode;

/// Relational plan - a linear operator chain anchored at a region scan.
#[derive(Debug, Clone, PartialEq)]
pub enum RelNode {
    Scan(ScanNode),
    Filter(FilterNode),
    Project(ProjectNode),
    Aggregate(AggregateNode),
    Sort(SortNode),
}

/// Scan of a named region.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanNode {
    pub region: String,
    pub schema: RowSchema,
}

/// Filter rows by a condition expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterNode {
    pub input: Box<RelNode>,
    pub condition: RexNode,
}

/// Project expressions with output names.
///
/// `exprs` and `names` are parallel; `names` supplies the output field names.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectNode {
    pub input: Box<RelNode>,
    pub exprs: Vec<RexNode>,
    pub names: Vec<String>,
}

/// Aggregate with grouping sets and aggregate calls.
///
/// `group_sets` holds one entry per grouping set; plain GROUP BY queries have
/// exactly one. ROLLUP/CUBE expansions produce several, which the dialect
/// cannot express.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateNode {
    pub input: Box<RelNode>,
    pub group_sets: Vec<Vec<usize>>,
    pub calls: Vec<AggCall>,
}

impl AggregateNode {
    /// Fields of the primary grouping set, in declaration order.
    pub fn group_fields(&self) -> &[usize] {
        self.group_sets.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Kind of aggregate function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggKind {
    Count,
    Sum,
    Min,
    Max,
    Avg,
}

impl AggKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggKind::Count => "COUNT",
            AggKind::Sum => "SUM",
            AggKind::Min => "MIN",
            AggKind::Max => "MAX",
            AggKind::Avg => "AVG",
        }
    }
}

/// One aggregate call: kind, argument field indices, optional output name.
#[derive(Debug, Clone, PartialEq)]
pub struct AggCall {
    pub kind: AggKind,
    pub args: Vec<usize>,
    pub distinct: bool,
    pub name: Option<String>,
}

impl AggCall {
    pub fn new(kind: AggKind, args: Vec<usize>) -> Self {
        Self {
            kind,
            args,
            distinct: false,
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Output field name: the explicit name, or a positional fallback.
    pub fn output_name(&self, ordinal: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("agg_{}", ordinal))
    }
}

/// Sort collation key: field index into the input schema plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collation {
    pub field: usize,
    pub descending: bool,
}

impl Collation {
    pub fn asc(field: usize) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn desc(field: usize) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

/// Sort rows, optionally limiting the result.
#[derive(Debug, Clone, PartialEq)]
pub struct SortNode {
    pub input: Box<RelNode>,
    pub collations: Vec<Collation>,
    pub fetch: Option<u64>,
    pub offset: Option<u64>,
}

impl RelNode {
    /// The node's input, or `None` for the scan leaf.
    pub fn input(&self) -> Option<&RelNode> {
        match self {
            RelNode::Scan(_) => None,
            RelNode::Filter(n) => Some(&n.input),
            RelNode::Project(n) => Some(&n.input),
            RelNode::Aggregate(n) => Some(&n.input),
            RelNode::Sort(n) => Some(&n.input),
        }
    }

    /// Output row schema of this node.
    pub fn row_type(&self) -> RowSchema {
        match self {
            RelNode::Scan(n) => n.schema.clone(),
            // Filter and Sort pass rows through unchanged.
            RelNode::Filter(n) => n.input.row_type(),
            RelNode::Sort(n) => n.input.row_type(),
            RelNode::Project(n) => {
                let input = n.input.row_type();
                n.exprs
                    .iter()
                    .zip(&n.names)
                    .map(|(expr, name)| {
                        let ty = expr
                            .result_type(&input)
                            .unwrap_or(FieldType::Object);
                        Field::new(name.clone(), ty)
                    })
                    .collect()
            }
            RelNode::Aggregate(n) => {
                let input = n.input.row_type();
                let mut fields = Vec::new();
                for &g in n.group_fields() {
                    if let Some(f) = input.field(g) {
                        fields.push(f.clone());
                    }
                }
                for (i, call) in n.calls.iter().enumerate() {
                    let ty = match call.kind {
                        AggKind::Count => FieldType::Long,
                        _ => call
                            .args
                            .first()
                            .and_then(|&a| input.field_type(a))
                            .unwrap_or(FieldType::Float),
                    };
                    fields.push(Field::new(call.output_name(i), ty));
                }
                RowSchema::new(fields)
            }
        }
    }
}
