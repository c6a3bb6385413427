//! Relational plan model: operator nodes and row schemas.

pub mod node;
pub mod schema;

pub use node::{
    AggCall, AggKind, AggregateNode, Collation, FilterNode, ProjectNode, RelNode, ScanNode,
    SortNode,
};
pub use schema::{Field, FieldType, RowSchema};
