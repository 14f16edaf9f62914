use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::core::models::cost::CostRow;
use crate::core::models::query::{QueryColumn, QueryProperties};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Response is missing the '{0}' column")]
    MissingColumn(&'static str),
    #[error("Row {index} has a missing or non-numeric '{column}' value")]
    BadValue { index: usize, column: &'static str },
}

/// Resolved positions of the columns this tool consumes. Resolution is by
/// name and fails when a required column is absent; ChargeType is optional
/// because the single-day query does not group by it.
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    cost: usize,
    usage_date: usize,
    resource_type: usize,
    charge_type: Option<usize>,
}

impl ColumnSchema {
    pub fn resolve(columns: &[QueryColumn]) -> Result<Self, ParseError> {
        let find = |name: &str| columns.iter().position(|c| c.name == name);
        Ok(Self {
            cost: find("Cost").ok_or(ParseError::MissingColumn("Cost"))?,
            usage_date: find("UsageDate").ok_or(ParseError::MissingColumn("UsageDate"))?,
            resource_type: find("ResourceType").ok_or(ParseError::MissingColumn("ResourceType"))?,
            charge_type: find("ChargeType"),
        })
    }

    fn cost_row(&self, index: usize, raw: &[Value]) -> Result<CostRow, ParseError> {
        let cost = raw
            .get(self.cost)
            .and_then(Value::as_f64)
            .ok_or(ParseError::BadValue {
                index,
                column: "Cost",
            })?;
        let usage_date = raw
            .get(self.usage_date)
            .and_then(Value::as_u64)
            .ok_or(ParseError::BadValue {
                index,
                column: "UsageDate",
            })? as u32;

        // A missing resource type is legal and buckets the row into Others.
        let string_at = |position: usize| {
            raw.get(position)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Ok(CostRow {
            cost,
            usage_date,
            resource_type: string_at(self.resource_type),
            charge_type: self.charge_type.map(string_at).unwrap_or_default(),
        })
    }
}

/// Group the response rows by their YYYYMMDD date key, preserving response
/// order within each day. A response without rows yields an empty map.
pub fn group_by_date(props: &QueryProperties) -> Result<BTreeMap<u32, Vec<CostRow>>, ParseError> {
    let rows = match &props.rows {
        Some(rows) => rows,
        None => return Ok(BTreeMap::new()),
    };

    let schema = ColumnSchema::resolve(&props.columns)?;

    let mut daily: BTreeMap<u32, Vec<CostRow>> = BTreeMap::new();
    for (index, raw) in rows.iter().enumerate() {
        let row = schema.cost_row(index, raw)?;
        daily.entry(row.usage_date).or_default().push(row);
    }
    Ok(daily)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns(names: &[&str]) -> Vec<QueryColumn> {
        names
            .iter()
            .map(|name| QueryColumn {
                name: name.to_string(),
                kind: None,
            })
            .collect()
    }

    fn props(columns: Vec<QueryColumn>, rows: Option<Vec<Vec<Value>>>) -> QueryProperties {
        QueryProperties { columns, rows }
    }

    #[test]
    fn resolve_finds_columns_in_any_order() {
        let cols = columns(&["UsageDate", "ResourceType", "ChargeType", "Cost"]);
        let schema = ColumnSchema::resolve(&cols).unwrap();
        let raw = vec![
            json!(20250601),
            json!("Microsoft.Storage/storageAccounts"),
            json!("Usage"),
            json!(9.5),
        ];
        let row = schema.cost_row(0, &raw).unwrap();
        assert!((row.cost - 9.5).abs() < 1e-10);
        assert_eq!(row.usage_date, 20250601);
        assert_eq!(row.resource_type, "Microsoft.Storage/storageAccounts");
        assert_eq!(row.charge_type, "Usage");
    }

    #[test]
    fn resolve_fails_on_missing_required_column() {
        let cols = columns(&["Cost", "ResourceType"]);
        let err = ColumnSchema::resolve(&cols).unwrap_err();
        assert!(err.to_string().contains("UsageDate"));
    }

    #[test]
    fn resolve_allows_missing_charge_type() {
        let cols = columns(&["Cost", "UsageDate", "ResourceType"]);
        let schema = ColumnSchema::resolve(&cols).unwrap();
        let raw = vec![json!(1.0), json!(20250601), json!("x")];
        let row = schema.cost_row(0, &raw).unwrap();
        assert_eq!(row.charge_type, "");
    }

    #[test]
    fn group_by_date_buckets_rows() {
        let cols = columns(&["Cost", "UsageDate", "ResourceType", "ChargeType"]);
        let rows = vec![
            vec![json!(1.0), json!(20250601), json!("a"), json!("Usage")],
            vec![json!(2.0), json!(20250602), json!("b"), json!("Usage")],
            vec![json!(3.0), json!(20250601), json!("c"), json!("Usage")],
        ];
        let daily = group_by_date(&props(cols, Some(rows))).unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[&20250601].len(), 2);
        assert_eq!(daily[&20250602].len(), 1);
        // Response order is preserved within a day.
        assert_eq!(daily[&20250601][0].resource_type, "a");
        assert_eq!(daily[&20250601][1].resource_type, "c");
    }

    #[test]
    fn group_by_date_no_rows_field_is_empty() {
        let cols = columns(&["Cost", "UsageDate", "ResourceType"]);
        let daily = group_by_date(&props(cols, None)).unwrap();
        assert!(daily.is_empty());
    }

    #[test]
    fn group_by_date_missing_resource_type_is_empty_string() {
        let cols = columns(&["Cost", "UsageDate", "ResourceType"]);
        let rows = vec![vec![json!(4.2), json!(20250601)]];
        let daily = group_by_date(&props(cols, Some(rows))).unwrap();
        assert_eq!(daily[&20250601][0].resource_type, "");
    }

    #[test]
    fn group_by_date_non_numeric_cost_fails() {
        let cols = columns(&["Cost", "UsageDate", "ResourceType"]);
        let rows = vec![vec![json!("free"), json!(20250601), json!("x")]];
        let err = group_by_date(&props(cols, Some(rows))).unwrap_err();
        assert!(err.to_string().contains("Cost"));
    }
}
