//! Query text builder - renders a populated context into one query string.
//!
//! Rendering is deterministic: the same context always produces the same
//! text. Predicate atoms and aggregate calls arrive already rendered and are
//! spliced in as fragments, never re-parsed.

use super::context::OqlContext;
use super::token::{Token, TokenStream};

/// Render `context` into a complete query string.
///
/// Shape: `SELECT <list|*> FROM /<region> [WHERE ...] [GROUP BY ...]
/// [ORDER BY ...] [LIMIT n]`.
pub fn build_query(context: &OqlContext) -> String {
    let mut ts = TokenStream::new();
    ts.push(Token::Select).space();
    ts.append(&select_list(context));
    ts.space()
        .push(Token::From)
        .space()
        .push(Token::Region(context.region().to_string()));

    if !context.where_atoms().is_empty() {
        ts.space().push(Token::Where).space();
        for (i, atom) in context.where_atoms().iter().enumerate() {
            if i > 0 {
                ts.space().push(Token::And).space();
            }
            ts.push(Token::Fragment(atom.clone()));
        }
    }

    if !context.group_by_fields().is_empty() {
        ts.space().push(Token::GroupBy).space();
        for (i, field) in context.group_by_fields().iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.push(Token::Ident(field.clone()));
        }
    }

    if !context.order_terms().is_empty() {
        ts.space().push(Token::OrderBy).space();
        for (i, term) in context.order_terms().iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.push(Token::Ident(term.field.clone())).space();
            ts.push(if term.descending {
                Token::Desc
            } else {
                Token::Asc
            });
        }
    }

    if let Some(limit) = context.limit() {
        ts.space()
            .push(Token::Limit)
            .space()
            .push(Token::LitUint(limit));
    }

    let oql = ts.serialize();
    tracing::debug!(query = %oql, "built region query");
    oql
}

/// Select list: projected fields first, then aggregate calls. An alias is
/// emitted only when it differs from the source text - the store rejects
/// self-aliasing in some builds.
fn select_list(context: &OqlContext) -> TokenStream {
    let mut ts = TokenStream::new();
    if context.select_fields().is_empty() && context.aggregate_calls().is_empty() {
        ts.push(Token::Star);
        return ts;
    }

    let mut first = true;
    for (source, alias) in context.select_fields() {
        if !first {
            ts.comma().space();
        }
        first = false;
        ts.push(Token::Fragment(source.clone()));
        if alias != source {
            ts.space()
                .push(Token::As)
                .space()
                .push(Token::Ident(alias.clone()));
        }
    }
    for (rendered, alias) in context.aggregate_calls() {
        if !first {
            ts.comma().space();
        }
        first = false;
        ts.push(Token::Fragment(rendered.clone()));
        if let Some(alias) = alias {
            ts.space()
                .push(Token::As)
                .space()
                .push(Token::Ident(alias.clone()));
        }
    }
    ts
}

/// Parse a rendered select list back into ordered (source, alias) pairs.
///
/// Inverse of the select-list rendering above; an entry without `AS` maps to
/// itself. Splitting is parenthesis-aware so aggregate arguments survive.
pub fn parse_select_list(list: &str) -> Vec<(String, String)> {
    if list.trim() == "*" {
        return vec![];
    }
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in list.chars() {
        match ch {
            '(' | '[' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                entries.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        entries.push(current);
    }

    entries
        .iter()
        .map(|entry| {
            let entry = entry.trim();
            match entry.split_once(" AS ") {
                Some((source, alias)) => (source.trim().to_string(), alias.trim().to_string()),
                None => (entry.to_string(), entry.to_string()),
            }
        })
        .collect()
}
