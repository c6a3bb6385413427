//! Aggregate acceptance: one grouping set, no DISTINCT qualifiers.

use regionql::prelude::*;

fn book_scan() -> RelNode {
    RelNode::Scan(ScanNode {
        region: "BookMaster".into(),
        schema: RowSchema::new(vec![
            Field::new("itemNumber", FieldType::Integer),
            Field::new("retailCost", FieldType::Float),
            Field::new("yearPublished", FieldType::Integer),
        ]),
    })
}

fn aggregate(group_sets: Vec<Vec<usize>>, calls: Vec<AggCall>) -> RelNode {
    RelNode::Aggregate(AggregateNode {
        input: Box::new(book_scan()),
        group_sets,
        calls,
    })
}

fn compile(plan: &RelNode) -> PushdownResult {
    PushdownPlanner::default().compile(plan).unwrap()
}

#[test]
fn test_group_by_with_named_call() {
    let plan = aggregate(
        vec![vec![2]],
        vec![AggCall::new(AggKind::Max, vec![1]).named("maxCost")],
    );
    let result = compile(&plan);

    assert!(result.is_complete());
    assert_eq!(
        result.query.oql,
        "SELECT yearPublished, MAX(retailCost) AS maxCost FROM /BookMaster GROUP BY yearPublished"
    );
    assert_eq!(
        result.query.schema.uniquified_names(),
        vec!["yearPublished", "maxCost"]
    );
}

#[test]
fn test_unnamed_call_renders_without_alias() {
    let plan = aggregate(vec![vec![2]], vec![AggCall::new(AggKind::Max, vec![1])]);
    let result = compile(&plan);

    assert!(result.is_complete());
    assert_eq!(
        result.query.oql,
        "SELECT yearPublished, MAX(retailCost) FROM /BookMaster GROUP BY yearPublished"
    );
    // The output schema still names the call positionally.
    assert_eq!(
        result.query.schema.uniquified_names(),
        vec!["yearPublished", "agg_0"]
    );
}

#[test]
fn test_bare_count_takes_first_input_field() {
    let plan = aggregate(
        vec![vec![]],
        vec![AggCall::new(AggKind::Count, vec![]).named("rows")],
    );
    let result = compile(&plan);

    assert!(result.is_complete());
    assert_eq!(
        result.query.oql,
        "SELECT COUNT(itemNumber) AS rows FROM /BookMaster"
    );
}

#[test]
fn test_global_aggregate_has_no_group_by() {
    let plan = aggregate(
        vec![vec![]],
        vec![
            AggCall::new(AggKind::Sum, vec![1]).named("total"),
            AggCall::new(AggKind::Avg, vec![1]).named("mean"),
        ],
    );
    let result = compile(&plan);

    assert!(result.is_complete());
    assert_eq!(
        result.query.oql,
        "SELECT SUM(retailCost) AS total, AVG(retailCost) AS mean FROM /BookMaster"
    );
}

#[test]
fn test_multiple_grouping_sets_are_rejected() {
    let plan = aggregate(vec![vec![2], vec![]], vec![AggCall::new(AggKind::Count, vec![])]);
    let result = compile(&plan);

    assert_eq!(result.accepted, 1);
    assert_eq!(result.residual, 1);
    assert_eq!(result.query.oql, "SELECT * FROM /BookMaster");
}

#[test]
fn test_distinct_call_is_rejected() {
    let plan = aggregate(
        vec![vec![2]],
        vec![AggCall::new(AggKind::Count, vec![0]).distinct()],
    );
    let result = compile(&plan);

    assert_eq!(result.accepted, 1);
    assert_eq!(result.query.oql, "SELECT * FROM /BookMaster");
}

#[test]
fn test_second_aggregation_is_rejected() {
    let inner = aggregate(
        vec![vec![2]],
        vec![AggCall::new(AggKind::Max, vec![1]).named("maxCost")],
    );
    let plan = RelNode::Aggregate(AggregateNode {
        input: Box::new(inner),
        group_sets: vec![vec![0]],
        calls: vec![AggCall::new(AggKind::Count, vec![]).named("n")],
    });
    let result = compile(&plan);

    assert_eq!(result.accepted, 2);
    assert_eq!(result.residual, 1);
    assert_eq!(
        result.query.oql,
        "SELECT yearPublished, MAX(retailCost) AS maxCost FROM /BookMaster GROUP BY yearPublished"
    );
}

#[test]
fn test_aggregate_over_renaming_project_uses_region_fields() {
    // GROUP BY and the aggregate argument must render region text; the
    // projection's aliases survive only in the select list and the schema.
    let renamed = RelNode::Project(ProjectNode {
        input: Box::new(book_scan()),
        exprs: vec![field(2), field(1)],
        names: vec!["year".into(), "cost".into()],
    });
    let plan = RelNode::Aggregate(AggregateNode {
        input: Box::new(renamed),
        group_sets: vec![vec![0]],
        calls: vec![AggCall::new(AggKind::Max, vec![1]).named("maxCost")],
    });
    let result = compile(&plan);

    assert!(result.is_complete());
    assert_eq!(
        result.query.oql,
        "SELECT yearPublished AS year, MAX(retailCost) AS maxCost FROM /BookMaster \
         GROUP BY yearPublished"
    );
    assert_eq!(result.query.schema.uniquified_names(), vec!["year", "maxCost"]);
}

#[test]
fn test_aggregate_over_accepted_filter() {
    let filtered = RelNode::Filter(FilterNode {
        input: Box::new(book_scan()),
        condition: gt(field(2), lit_int(2000)),
    });
    let plan = RelNode::Aggregate(AggregateNode {
        input: Box::new(filtered),
        group_sets: vec![vec![2]],
        calls: vec![AggCall::new(AggKind::Min, vec![1]).named("cheapest")],
    });
    let result = compile(&plan);

    assert!(result.is_complete());
    assert_eq!(
        result.query.oql,
        "SELECT yearPublished, MIN(retailCost) AS cheapest FROM /BookMaster \
         WHERE yearPublished > 2000 GROUP BY yearPublished"
    );
}
