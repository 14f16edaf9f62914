use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::models::cost::{CostRow, DailyBreakdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Databricks,
    VirtualMachine,
    Storage,
    Others,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Databricks,
        Category::VirtualMachine,
        Category::Storage,
        Category::Others,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Databricks => "Databricks",
            Self::VirtualMachine => "Virtual Machine",
            Self::Storage => "Storage",
            Self::Others => "Others",
        }
    }
}

/// Substring rules applied to the lowercased resource type; first match wins,
/// no match falls through to Others. The patterns are unprefixed suffixes, so
/// both "Microsoft.Compute/virtualMachines" and bare "compute/virtualmachines"
/// hit the same rule, and "databricks/workspace" also covers the plural form.
const RULES: &[(&str, Category)] = &[
    ("databricks/workspace", Category::Databricks),
    ("compute/virtualmachines", Category::VirtualMachine),
    ("storage/storageaccounts", Category::Storage),
];

pub fn categorize(resource_type: &str) -> Category {
    let lowered = resource_type.to_lowercase();
    for (pattern, category) in RULES {
        if lowered.contains(pattern) {
            return *category;
        }
    }
    Category::Others
}

/// Fold one day's rows into a per-category breakdown. All four buckets start
/// at zero whether or not any row lands in them.
pub fn summarize(date: NaiveDate, rows: &[CostRow]) -> DailyBreakdown {
    let mut breakdown = DailyBreakdown::empty(date);
    for row in rows {
        breakdown.add(categorize(&row.resource_type), row.cost);
    }
    breakdown
}
