use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::categorize::Category;
use crate::core::subscription::Subscription;

/// One raw row from the Cost Management query response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRow {
    pub cost: f64,
    /// Usage date as the API reports it: YYYYMMDD.
    pub usage_date: u32,
    /// Empty when the response carried no resource type for the row.
    pub resource_type: String,
    /// Empty when the query did not group by ChargeType.
    pub charge_type: String,
}

/// Accumulated cost per category for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBreakdown {
    pub date: NaiveDate,
    pub databricks: f64,
    pub virtual_machine: f64,
    pub storage: f64,
    pub others: f64,
}

impl DailyBreakdown {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            databricks: 0.0,
            virtual_machine: 0.0,
            storage: 0.0,
            others: 0.0,
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Databricks => self.databricks,
            Category::VirtualMachine => self.virtual_machine,
            Category::Storage => self.storage,
            Category::Others => self.others,
        }
    }

    pub fn add(&mut self, category: Category, amount: f64) {
        match category {
            Category::Databricks => self.databricks += amount,
            Category::VirtualMachine => self.virtual_machine += amount,
            Category::Storage => self.storage += amount,
            Category::Others => self.others += amount,
        }
    }

    pub fn total(&self) -> f64 {
        self.databricks + self.virtual_machine + self.storage + self.others
    }
}

/// Day-over-day percentage change per category. Defined for days 2..N of the
/// window only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeltaRow {
    pub date: NaiveDate,
    pub databricks: f64,
    pub virtual_machine: f64,
    pub storage: f64,
    pub others: f64,
}

impl DeltaRow {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Databricks => self.databricks,
            Category::VirtualMachine => self.virtual_machine,
            Category::Storage => self.storage,
            Category::Others => self.others,
        }
    }
}

/// Everything rendered for one subscription: the date-ordered breakdowns,
/// their deltas, and the category set the document shows.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionReport {
    pub subscription: Subscription,
    pub days: Vec<DailyBreakdown>,
    pub deltas: Vec<DeltaRow>,
    /// Exclusion-aware header set (see the exclusion rule in core::report).
    pub active_categories: Vec<Category>,
}
