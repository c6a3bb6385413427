//! # regionql
//!
//! Push-down planning and query translation for a region-based object store.
//!
//! A host relational engine hands this crate a linear operator chain
//! (scan → filter → project → aggregate → sort/limit). The crate decides
//! which prefix of that chain the store's restricted object-query dialect
//! can execute, translates the accepted operators into one query string,
//! and shapes the remote results back into rows.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            Relational Plan (operator chain)              │
//! │        scan → filter → project → aggregate → sort        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [pushdown: acceptance rules]
//! ┌─────────────────────────────────────────────────────────┐
//! │       Query Context (selects, atoms, groups, limit)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [oql: token builder]
//! ┌─────────────────────────────────────────────────────────┐
//! │        "SELECT ... FROM /Region WHERE ... LIMIT n"       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [exec: boundary adapter]
//! ┌─────────────────────────────────────────────────────────┐
//! │           Region store session (rows shaped out)         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Push-down rejection is silent: an operator the dialect cannot express
//! simply caps the accepted prefix, and the host engine executes the rest.

pub mod config;
pub mod exec;
pub mod oql;
pub mod plan;
pub mod pushdown;
pub mod rex;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{Endpoint, Settings};
    pub use crate::exec::{RegionExecutor, RegionSession, Row};
    pub use crate::oql::{build_query, OqlContext};
    pub use crate::plan::{
        AggCall, AggKind, AggregateNode, Collation, Field, FieldType, FilterNode, ProjectNode,
        RelNode, RowSchema, ScanNode, SortNode,
    };
    pub use crate::pushdown::{
        CompiledQuery, PushdownOptions, PushdownPlanner, PushdownResult,
    };
    pub use crate::rex::{
        // Constructors
        and,
        cast,
        eq,
        field,
        gt,
        gte,
        item,
        lit_bool,
        lit_float,
        lit_int,
        lit_null,
        lit_str,
        lt,
        lte,
        ne,
        not,
        or,
        // Types
        Literal,
        RexNode,
        RexOp,
    };
}

// Also export the main entry points at the crate root for convenience
pub use pushdown::{CompiledQuery, PushdownOptions, PushdownPlanner, PushdownResult};
