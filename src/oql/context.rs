//! Query context - the accumulator shared by the acceptance rules.
//!
//! One context is created per push-down attempt at the scan, threaded
//! mutably through each accepted ancestor, and consumed exactly once by the
//! query builder. Contexts are never shared between plan compilations.

use thiserror::Error;

/// Context misuse detected while an acceptance rule contributed to it.
///
/// These indicate an operator shape the dialect cannot hold in one query
/// (a second LIMIT, nested aggregation); the enclosing rule converts them
/// into a silent rejection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("limit already set")]
    LimitAlreadySet,

    #[error("context already holds an aggregate")]
    AlreadyAggregated,
}

/// One ORDER BY term: field name plus direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTerm {
    pub field: String,
    pub descending: bool,
}

/// Accumulator for one remote-executable plan prefix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OqlContext {
    region: String,
    /// (source field text, output alias), insertion-ordered.
    select_fields: Vec<(String, String)>,
    /// Rendered predicate fragments, implicitly ANDed.
    where_atoms: Vec<String>,
    group_by_fields: Vec<String>,
    /// (rendered aggregate call, optional output alias), insertion-ordered.
    aggregate_calls: Vec<(String, Option<String>)>,
    order_terms: Vec<OrderTerm>,
    limit: Option<u64>,
    aggregated: bool,
}

impl OqlContext {
    /// Fresh context rooted at `region`.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn select_fields(&self) -> &[(String, String)] {
        &self.select_fields
    }

    pub fn where_atoms(&self) -> &[String] {
        &self.where_atoms
    }

    pub fn group_by_fields(&self) -> &[String] {
        &self.group_by_fields
    }

    pub fn aggregate_calls(&self) -> &[(String, Option<String>)] {
        &self.aggregate_calls
    }

    pub fn order_terms(&self) -> &[OrderTerm] {
        &self.order_terms
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn is_aggregated(&self) -> bool {
        self.aggregated
    }

    /// Append a select entry. Idempotent on the output alias: re-adding an
    /// alias that is already selected is a no-op, preserving the original
    /// position.
    pub fn add_select(&mut self, source: impl Into<String>, alias: impl Into<String>) {
        let alias = alias.into();
        if self.select_fields.iter().any(|(_, a)| *a == alias) {
            return;
        }
        self.select_fields.push((source.into(), alias));
    }

    /// Drop every accumulated select entry. An operator whose output
    /// supersedes a lower projection rebuilds the list from scratch.
    pub fn clear_selects(&mut self) {
        self.select_fields.clear();
    }

    /// Append a rendered predicate fragment. Fragments carry their own
    /// boolean combinators; the builder only joins them with AND.
    pub fn add_where_atom(&mut self, atom: impl Into<String>) {
        self.where_atoms.push(atom.into());
    }

    pub fn add_group_by(&mut self, field: impl Into<String>) {
        let field = field.into();
        if self.group_by_fields.contains(&field) {
            return;
        }
        self.group_by_fields.push(field);
    }

    pub fn add_aggregate(&mut self, rendered: impl Into<String>, alias: Option<String>) {
        self.aggregate_calls.push((rendered.into(), alias));
    }

    /// Mark this context as holding an aggregate. The dialect has no nested
    /// aggregation, so a second call fails.
    pub fn mark_aggregated(&mut self) -> Result<(), ContextError> {
        if self.aggregated {
            return Err(ContextError::AlreadyAggregated);
        }
        self.aggregated = true;
        Ok(())
    }

    pub fn add_order(&mut self, field: impl Into<String>, descending: bool) {
        self.order_terms.push(OrderTerm {
            field: field.into(),
            descending,
        });
    }

    /// Set the row limit. At most one operator may contribute a limit per
    /// accepted prefix, so overwriting fails rather than replacing.
    pub fn set_limit(&mut self, limit: u64) -> Result<(), ContextError> {
        if self.limit.is_some() {
            return Err(ContextError::LimitAlreadySet);
        }
        self.limit = Some(limit);
        Ok(())
    }
}
