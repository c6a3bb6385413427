//! Atom classification through the public push-down API.

use regionql::prelude::*;
use regionql::pushdown::{classify_atom, conjunctions, disjunctions, AtomClass};

fn lenient() -> PushdownOptions {
    PushdownOptions::default()
}

#[test]
fn test_every_comparison_operator_forms_an_atom() {
    let atoms = vec![
        eq(field(0), lit_int(1)),
        ne(field(0), lit_int(1)),
        lt(field(0), lit_int(1)),
        lte(field(0), lit_int(1)),
        gt(field(0), lit_int(1)),
        gte(field(0), lit_int(1)),
    ];
    for atom in &atoms {
        assert_eq!(
            classify_atom(atom, 2, &lenient()),
            AtomClass::FieldLiteral { field: 0 }
        );
    }
}

#[test]
fn test_literal_kinds_all_classify() {
    for literal in [lit_int(7), lit_float(1.5), lit_str("x"), lit_bool(true), lit_null()] {
        let atom = eq(field(1), literal);
        assert!(classify_atom(&atom, 2, &lenient()).is_supported());
    }
}

#[test]
fn test_logical_connectives_are_not_atoms() {
    let conj = and(eq(field(0), lit_int(1)), eq(field(1), lit_int(2)));
    assert_eq!(classify_atom(&conj, 2, &lenient()), AtomClass::Unsupported);

    let negated = not(eq(field(0), lit_int(1)));
    assert_eq!(classify_atom(&negated, 2, &lenient()), AtomClass::Unsupported);
}

#[test]
fn test_literal_vs_literal_is_unsupported() {
    let atom = eq(lit_int(1), lit_int(2));
    assert_eq!(classify_atom(&atom, 2, &lenient()), AtomClass::Unsupported);
}

#[test]
fn test_field_pair_requires_both_sides_resolvable() {
    let atom = lt(field(0), field(5));
    assert_eq!(classify_atom(&atom, 2, &lenient()), AtomClass::Unsupported);

    let atom = lt(field(0), field(1));
    assert_eq!(
        classify_atom(&atom, 2, &lenient()),
        AtomClass::FieldPair { left: 0, right: 1 }
    );
}

#[test]
fn test_casts_strip_on_both_sides() {
    let atom = eq(
        cast(field(0), FieldType::Long),
        cast(lit_int(9), FieldType::Long),
    );
    assert_eq!(
        classify_atom(&atom, 2, &lenient()),
        AtomClass::FieldLiteral { field: 0 }
    );
    assert_eq!(
        classify_atom(&atom, 2, &PushdownOptions { strict_casts: true }),
        AtomClass::Unsupported
    );
}

#[test]
fn test_mixed_connectives_flatten_only_their_own_level() {
    // (a = 1 AND b = 2) OR c = 3 has two disjuncts; the conjunction stays
    // intact inside the first one.
    let cond = or(
        and(eq(field(0), lit_int(1)), eq(field(1), lit_int(2))),
        eq(field(2), lit_int(3)),
    );
    let disjuncts = disjunctions(&cond);
    assert_eq!(disjuncts.len(), 2);
    assert_eq!(conjunctions(disjuncts[0]).len(), 2);
    assert_eq!(conjunctions(disjuncts[1]).len(), 1);
}

#[test]
fn test_single_atom_is_its_own_disjunct_and_conjunct() {
    let atom = eq(field(0), lit_int(1));
    assert_eq!(disjunctions(&atom).len(), 1);
    assert_eq!(conjunctions(&atom).len(), 1);
}
