//! Remote execution adapter - issues compiled queries and shapes results.

use serde_json::Value;

use crate::plan::RowSchema;
use crate::pushdown::CompiledQuery;

use super::session::{ExecError, ExecResult, RegionSession};

/// One result row, positionally matching the compiled query's schema.
pub type Row = Vec<Value>;

/// Issues a compiled query against a session and converts each result
/// object into the row shape of the accepted prefix's output schema.
pub struct RegionExecutor;

impl RegionExecutor {
    /// Run `compiled` on `session` and shape the results.
    ///
    /// Any execution failure propagates as an error.
    pub async fn query(
        session: &dyn RegionSession,
        compiled: &CompiledQuery,
    ) -> ExecResult<Vec<Row>> {
        let results = session.execute(&compiled.oql).await?;
        results
            .into_iter()
            .map(|object| shape_row(&compiled.schema, object))
            .collect()
    }
}

/// Shape one result object into a row.
///
/// The store returns struct-like objects for multi-field results but may
/// return bare scalars when a single field was selected. The store is
/// schema-flexible, so a member missing from an object maps to null; a
/// non-object result against a multi-field schema is a shape error.
fn shape_row(schema: &RowSchema, object: Value) -> ExecResult<Row> {
    let names = schema.uniquified_names();

    if names.len() == 1 {
        let value = match object {
            Value::Object(mut members) => members.remove(&names[0]).unwrap_or(Value::Null),
            scalar => scalar,
        };
        return Ok(vec![value]);
    }

    match object {
        Value::Object(mut members) => Ok(names
            .iter()
            .map(|name| members.remove(name).unwrap_or(Value::Null))
            .collect()),
        other => Err(ExecError::RowShape {
            expected: names.len(),
            got: other.to_string(),
        }),
    }
}
