use crate::core::categorize::Category;
use crate::core::models::cost::{DailyBreakdown, DeltaRow};

/// Day-over-day percentage change. A zero baseline is a defined policy, not
/// an error: 0 -> 0 reads as no change, 0 -> anything reads as +100 (clamped,
/// not a true ratio).
pub fn percent_change(prev: f64, curr: f64) -> f64 {
    if prev == 0.0 {
        if curr == 0.0 {
            0.0
        } else {
            100.0
        }
    } else {
        ((curr - prev) / prev) * 100.0
    }
}

/// Signed, two-decimal rendering: "+50.00%", "-12.34%", "+0.00%".
pub fn format_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

/// Delta rows for days 2..N of a date-ordered window; the first day has no
/// baseline and produces no row.
pub fn delta_rows(days: &[DailyBreakdown]) -> Vec<DeltaRow> {
    days.windows(2)
        .map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            let change = |category| percent_change(prev.get(category), curr.get(category));
            DeltaRow {
                date: curr.date,
                databricks: change(Category::Databricks),
                virtual_machine: change(Category::VirtualMachine),
                storage: change(Category::Storage),
                others: change(Category::Others),
            }
        })
        .collect()
}
