//! Operator acceptance rules.
//!
//! One rule per operator kind: `matches` is a pure shape predicate, `apply`
//! pushes the operator's contribution into the query context via the
//! expression translator. The dispatcher matches exhaustively over the
//! closed operator set.
//!
//! Both functions take the operator's already-accepted input node: the chain
//! is linear and only extends over accepted nodes, so `prev` is the node
//! whose output schema the operator consumes.
//!
//! The store evaluates every clause against raw region fields, while field
//! references in the plan resolve against logical input schemas. Operators
//! above a renaming Project therefore resolve each reference back to region
//! text through the context's select entries; operators that would run after
//! grouping (Filter, Project over an aggregated context) reject in `apply`.

use crate::oql::{OqlContext, Token, TokenStream};
use crate::plan::{AggKind, AggregateNode, FilterNode, ProjectNode, RelNode, SortNode};
use crate::plan::FieldType;
use crate::rex::{Literal, RexNode, RexOp};

use super::classifier::{classify_atom, conjunctions, disjunctions};
use super::translator::OqlTranslator;
use super::{PushdownOptions, Unsupported};

/// Shape predicate: can `node` extend the accepted prefix ending at `prev`?
pub fn matches(node: &RelNode, prev: &RelNode, options: &PushdownOptions) -> bool {
    match node {
        // Scan only ever starts a chain; it cannot extend one.
        RelNode::Scan(_) => false,
        RelNode::Filter(filter) => filter_matches(filter, options),
        RelNode::Project(project) => project_matches(project),
        RelNode::Aggregate(aggregate) => aggregate_matches(aggregate),
        RelNode::Sort(sort) => sort_matches(sort, prev),
    }
}

/// Push `node`'s contribution into `context`. Translation failures surface
/// as [`Unsupported`] and reject the operator.
pub fn apply(
    node: &RelNode,
    _prev: &RelNode,
    context: &mut OqlContext,
    _options: &PushdownOptions,
) -> Result<(), Unsupported> {
    match node {
        RelNode::Scan(_) => Err(Unsupported),
        RelNode::Filter(filter) => filter_apply(filter, context),
        RelNode::Project(project) => project_apply(project, context),
        RelNode::Aggregate(aggregate) => aggregate_apply(aggregate, context),
        RelNode::Sort(sort) => sort_apply(sort, context),
    }
}

/// Region-field text for each of `input`'s output fields.
///
/// A renaming Project below the current operator leaves its alias→source
/// pairs in the context's select entries; references to those aliases must
/// render the source text, since the store knows nothing of the alias. A
/// name without an entry is a region field already.
fn source_texts(input: &RelNode, context: &OqlContext) -> Vec<String> {
    input
        .row_type()
        .uniquified_names()
        .into_iter()
        .map(|name| {
            context
                .select_fields()
                .iter()
                .find(|(_, alias)| *alias == name)
                .map(|(source, _)| source.clone())
                .unwrap_or(name)
        })
        .collect()
}

// =============================================================================
// Filter
// =============================================================================

/// A single-disjunct condition is accepted only when every conjunct is a
/// supported equality/range atom. Multi-disjunct conditions are accepted
/// without per-atom checking: the dialect combines OR/AND natively and the
/// whole condition is pushed as rendered text.
fn filter_matches(filter: &FilterNode, options: &PushdownOptions) -> bool {
    let disjuncts = disjunctions(&filter.condition);
    if disjuncts.len() != 1 {
        return true;
    }
    let field_count = filter.input.row_type().len();
    conjunctions(disjuncts[0])
        .iter()
        .all(|conjunct| classify_atom(conjunct, field_count, options).is_supported())
}

fn filter_apply(filter: &FilterNode, context: &mut OqlContext) -> Result<(), Unsupported> {
    // WHERE evaluates before grouping; a predicate over aggregate output
    // cannot run remotely.
    if context.is_aggregated() {
        return Err(Unsupported);
    }
    let translator = OqlTranslator::new(source_texts(&filter.input, context));
    let disjuncts = disjunctions(&filter.condition);
    if disjuncts.len() == 1 {
        for conjunct in conjunctions(disjuncts[0]) {
            context.add_where_atom(translator.translate(conjunct)?);
        }
    } else {
        // One combined fragment; its OR structure is preserved verbatim.
        context.add_where_atom(translator.translate(&filter.condition)?);
    }
    Ok(())
}

// =============================================================================
// Project
// =============================================================================

/// Accepted when every projection is a direct field reference or a supported
/// item-access call. Item access over a geometry-typed base cannot be
/// computed by the store and forces rejection.
fn project_matches(project: &ProjectNode) -> bool {
    let input = project.input.row_type();
    project.exprs.iter().all(|expr| match expr {
        RexNode::FieldRef(i) => *i < input.len(),
        RexNode::Call { op: RexOp::Item, operands } if operands.len() == 2 => {
            let base_ok = match &operands[0] {
                RexNode::FieldRef(i) => {
                    input.field_type(*i).is_some_and(|ty| ty != FieldType::Geometry)
                }
                _ => false,
            };
            let key_ok = matches!(
                operands[1].skip_casts(),
                RexNode::Literal(Literal::Int(_)) | RexNode::Literal(Literal::String(_))
            );
            base_ok && key_ok
        }
        _ => false,
    })
}

fn project_apply(project: &ProjectNode, context: &mut OqlContext) -> Result<(), Unsupported> {
    // Renaming aggregate output is left to the host engine.
    if context.is_aggregated() {
        return Err(Unsupported);
    }
    let translator = OqlTranslator::new(source_texts(&project.input, context));
    let mut entries = Vec::with_capacity(project.exprs.len());
    for (expr, name) in project.exprs.iter().zip(&project.names) {
        entries.push((translator.translate(expr)?, name.clone()));
    }
    // This projection defines the output; a lower Project's entries are
    // superseded, not extended.
    context.clear_selects();
    for (source, alias) in entries {
        context.add_select(source, alias);
    }
    Ok(())
}

// =============================================================================
// Aggregate
// =============================================================================

/// Exactly one grouping set; the dialect has no multi-grouping-set
/// primitive. DISTINCT-qualified calls are rejected as well: the store would
/// silently compute the non-distinct aggregate, which is a wrong answer, not
/// a degraded one.
fn aggregate_matches(aggregate: &AggregateNode) -> bool {
    if aggregate.group_sets.len() != 1 {
        return false;
    }
    if aggregate.calls.iter().any(|call| call.distinct) {
        tracing::trace!("distinct aggregate call cannot be pushed down");
        return false;
    }
    true
}

fn aggregate_apply(aggregate: &AggregateNode, context: &mut OqlContext) -> Result<(), Unsupported> {
    let input_names = aggregate.input.row_type().uniquified_names();
    let input_sources = source_texts(&aggregate.input, context);

    context.mark_aggregated().map_err(|_| Unsupported)?;
    // The aggregate's output replaces whatever a lower Project selected;
    // GROUP BY and aggregate arguments always reference region text.
    context.clear_selects();

    for &group in aggregate.group_fields() {
        let source = input_sources.get(group).ok_or(Unsupported)?;
        let alias = input_names.get(group).ok_or(Unsupported)?;
        context.add_select(source.clone(), alias.clone());
        context.add_group_by(source.clone());
    }

    for call in &aggregate.calls {
        let mut args = Vec::with_capacity(call.args.len().max(1));
        for &arg in &call.args {
            args.push(input_sources.get(arg).ok_or(Unsupported)?.clone());
        }
        // The store rejects aliasing a bare zero-argument count, so COUNT()
        // takes the first input field as a synthetic argument.
        if call.kind == AggKind::Count && args.is_empty() {
            args.push(input_sources.first().ok_or(Unsupported)?.clone());
        }
        let mut rendered = TokenStream::new();
        rendered
            .push(Token::FunctionName(call.kind.as_str().into()))
            .lparen();
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                rendered.comma().space();
            }
            rendered.push(Token::Ident(arg.clone()));
        }
        rendered.rparen();
        context.add_aggregate(rendered.serialize(), call.name.clone());
    }
    Ok(())
}

// =============================================================================
// Sort
// =============================================================================

/// The dialect has no OFFSET, and ORDER BY is only legal when the immediate
/// input is an aggregation whose grouping cardinality covers the ordered
/// columns. A collation-free sort with a fetch degrades to a bare LIMIT.
fn sort_matches(sort: &SortNode, prev: &RelNode) -> bool {
    if sort.offset.is_some() {
        return false;
    }
    if sort.collations.is_empty() {
        return sort.fetch.is_some();
    }
    match prev {
        RelNode::Aggregate(aggregate) => {
            aggregate.group_fields().len() >= sort.collations.len()
        }
        _ => false,
    }
}

fn sort_apply(sort: &SortNode, context: &mut OqlContext) -> Result<(), Unsupported> {
    let input_sources = source_texts(&sort.input, context);
    for collation in &sort.collations {
        let name = input_sources.get(collation.field).ok_or(Unsupported)?;
        context.add_order(name.clone(), collation.descending);
    }
    if let Some(fetch) = sort.fetch {
        context.set_limit(fetch).map_err(|_| Unsupported)?;
    }
    Ok(())
}
