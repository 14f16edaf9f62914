use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// --- Query request body ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub timeframe: &'static str,
    pub time_period: TimePeriod,
    pub dataset: Dataset,
}

#[derive(Debug, Serialize)]
pub struct TimePeriod {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct Dataset {
    pub granularity: &'static str,
    pub aggregation: Aggregation,
    pub grouping: Vec<Grouping>,
}

#[derive(Debug, Serialize)]
pub struct Aggregation {
    #[serde(rename = "totalCost")]
    pub total_cost: AggregationFunction,
}

#[derive(Debug, Serialize)]
pub struct AggregationFunction {
    pub name: &'static str,
    pub function: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Grouping {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
}

fn day_start(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT00:00:00Z").to_string()
}

fn day_end(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT23:59:59Z").to_string()
}

impl QueryRequest {
    fn custom(from: String, to: String, grouping: Vec<Grouping>) -> Self {
        Self {
            kind: "Usage",
            timeframe: "Custom",
            time_period: TimePeriod { from, to },
            dataset: Dataset {
                granularity: "Daily",
                aggregation: Aggregation {
                    total_cost: AggregationFunction {
                        name: "Cost",
                        function: "Sum",
                    },
                },
                grouping,
            },
        }
    }

    /// One query spanning the whole window, grouped by resource and charge type.
    pub fn daily_range(start: NaiveDate, end: NaiveDate) -> Self {
        Self::custom(
            day_start(start),
            day_end(end),
            vec![
                Grouping {
                    kind: "Dimension",
                    name: "ResourceType",
                },
                Grouping {
                    kind: "Dimension",
                    name: "ChargeType",
                },
            ],
        )
    }

    /// Single-day variant, grouped by resource type only.
    pub fn single_day(date: NaiveDate) -> Self {
        Self::custom(
            day_start(date),
            day_end(date),
            vec![Grouping {
                kind: "Dimension",
                name: "ResourceType",
            }],
        )
    }
}

// --- Query response body ---

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub properties: Option<QueryProperties>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryProperties {
    #[serde(default)]
    pub columns: Vec<QueryColumn>,
    /// Rows are positional tuples of mixed types; positions are described by
    /// `columns`.
    pub rows: Option<Vec<Vec<serde_json::Value>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryColumn {
    pub name: String,
    #[allow(dead_code)]
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_range_body_shape() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
        let body = serde_json::to_value(QueryRequest::daily_range(start, end)).unwrap();

        assert_eq!(body["type"], "Usage");
        assert_eq!(body["timeframe"], "Custom");
        assert_eq!(body["timePeriod"]["from"], "2025-06-01T00:00:00Z");
        assert_eq!(body["timePeriod"]["to"], "2025-06-07T23:59:59Z");
        assert_eq!(body["dataset"]["granularity"], "Daily");
        assert_eq!(body["dataset"]["aggregation"]["totalCost"]["name"], "Cost");
        assert_eq!(body["dataset"]["aggregation"]["totalCost"]["function"], "Sum");

        let grouping = body["dataset"]["grouping"].as_array().unwrap();
        assert_eq!(grouping.len(), 2);
        assert_eq!(grouping[0]["name"], "ResourceType");
        assert_eq!(grouping[1]["name"], "ChargeType");
        assert_eq!(grouping[0]["type"], "Dimension");
    }

    #[test]
    fn single_day_groups_by_resource_type_only() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        let body = serde_json::to_value(QueryRequest::single_day(date)).unwrap();

        assert_eq!(body["timePeriod"]["from"], "2025-06-03T00:00:00Z");
        assert_eq!(body["timePeriod"]["to"], "2025-06-03T23:59:59Z");
        let grouping = body["dataset"]["grouping"].as_array().unwrap();
        assert_eq!(grouping.len(), 1);
        assert_eq!(grouping[0]["name"], "ResourceType");
    }

    #[test]
    fn deserialize_query_response() {
        let json = r#"{
            "properties": {
                "columns": [
                    {"name": "Cost", "type": "Number"},
                    {"name": "UsageDate", "type": "Number"},
                    {"name": "ResourceType", "type": "String"},
                    {"name": "ChargeType", "type": "String"},
                    {"name": "Currency", "type": "String"}
                ],
                "rows": [
                    [12.34, 20250601, "Microsoft.Compute/virtualMachines", "Usage", "USD"],
                    [0.56, 20250601, "Microsoft.Storage/storageAccounts", "Usage", "USD"]
                ]
            }
        }"#;
        let resp: QueryResponse = serde_json::from_str(json).unwrap();
        let props = resp.properties.unwrap();
        assert_eq!(props.columns.len(), 5);
        assert_eq!(props.columns[0].name, "Cost");
        assert_eq!(props.columns[0].kind.as_deref(), Some("Number"));
        let rows = props.rows.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], serde_json::json!(20250601));
    }

    #[test]
    fn deserialize_response_without_rows() {
        let json = r#"{"properties": {"columns": []}}"#;
        let resp: QueryResponse = serde_json::from_str(json).unwrap();
        let props = resp.properties.unwrap();
        assert!(props.rows.is_none());
    }

    #[test]
    fn deserialize_response_without_properties() {
        let resp: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.properties.is_none());
    }
}
