use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::core::categorize::{self, Category};
use crate::core::delta;
use crate::core::models::cost::{CostRow, DailyBreakdown, SubscriptionReport};
use crate::core::subscription::Subscription;

/// Reporting window: consecutive dates ending yesterday.
#[derive(Debug, Clone, Copy)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    pub fn trailing(days: u32, today: NaiveDate) -> Self {
        let end = today - Duration::days(1);
        let start = end - Duration::days(i64::from(days) - 1);
        Self { start, end }
    }

    pub fn ending_yesterday(days: u32) -> Self {
        Self::trailing(days, Local::now().date_naive())
    }

    /// Window dates oldest to newest.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut date = self.start;
        while date <= self.end {
            dates.push(date);
            date = date + Duration::days(1);
        }
        dates
    }
}

/// Date key in the YYYYMMDD form the API uses for UsageDate.
pub fn date_key(date: NaiveDate) -> u32 {
    date.year() as u32 * 10_000 + date.month() * 100 + date.day()
}

/// Assemble one subscription's report from the grouped response rows. Days
/// the response never mentioned get an all-zero breakdown so the window stays
/// dense.
pub fn build_report(
    subscription: Subscription,
    window: &ReportWindow,
    daily: &BTreeMap<u32, Vec<CostRow>>,
) -> SubscriptionReport {
    let days: Vec<DailyBreakdown> = window
        .dates()
        .into_iter()
        .map(|date| match daily.get(&date_key(date)) {
            Some(rows) => categorize::summarize(date, rows),
            None => DailyBreakdown::empty(date),
        })
        .collect();

    let deltas = delta::delta_rows(&days);
    let active_categories = active_categories(subscription, &days);

    SubscriptionReport {
        subscription,
        days,
        deltas,
        active_categories,
    }
}

/// Exclusion rule: only `main` drops Databricks, and only when no day in the
/// window has nonzero Databricks cost. Every other subscription always shows
/// all four categories.
fn active_categories(subscription: Subscription, days: &[DailyBreakdown]) -> Vec<Category> {
    let mut categories = Category::ALL.to_vec();
    if subscription == Subscription::Main {
        let has_databricks = days.iter().any(|day| day.get(Category::Databricks) > 0.0);
        if !has_databricks {
            categories.retain(|c| *c != Category::Databricks);
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vm_row(date: NaiveDate, cost: f64) -> CostRow {
        CostRow {
            cost,
            usage_date: date_key(date),
            resource_type: "Microsoft.Compute/virtualMachines".to_string(),
            charge_type: "Usage".to_string(),
        }
    }

    fn databricks_row(date: NaiveDate, cost: f64) -> CostRow {
        CostRow {
            cost,
            usage_date: date_key(date),
            resource_type: "Microsoft.Databricks/workspaces".to_string(),
            charge_type: "Usage".to_string(),
        }
    }

    #[test]
    fn trailing_window_ends_yesterday() {
        let window = ReportWindow::trailing(7, ymd(2025, 6, 15));
        assert_eq!(window.end, ymd(2025, 6, 14));
        assert_eq!(window.start, ymd(2025, 6, 8));
        assert_eq!(window.dates().len(), 7);
    }

    #[test]
    fn one_day_window_is_just_yesterday() {
        let window = ReportWindow::trailing(1, ymd(2025, 6, 15));
        assert_eq!(window.start, window.end);
        assert_eq!(window.dates(), vec![ymd(2025, 6, 14)]);
    }

    #[test]
    fn window_crosses_month_boundary() {
        let window = ReportWindow::trailing(3, ymd(2025, 7, 2));
        assert_eq!(window.dates(), vec![ymd(2025, 6, 29), ymd(2025, 6, 30), ymd(2025, 7, 1)]);
    }

    #[test]
    fn date_key_is_yyyymmdd() {
        assert_eq!(date_key(ymd(2025, 6, 3)), 20250603);
        assert_eq!(date_key(ymd(2025, 12, 31)), 20251231);
    }

    #[test]
    fn build_report_zero_fills_missing_days() {
        let window = ReportWindow::trailing(3, ymd(2025, 6, 4));
        let mut daily = BTreeMap::new();
        // Only the middle day has data.
        daily.insert(20250602, vec![vm_row(ymd(2025, 6, 2), 11.0)]);

        let report = build_report(Subscription::Dev, &window, &daily);
        assert_eq!(report.days.len(), 3);
        assert!((report.days[0].total() - 0.0).abs() < 1e-10);
        assert!((report.days[1].get(Category::VirtualMachine) - 11.0).abs() < 1e-10);
        assert!((report.days[2].total() - 0.0).abs() < 1e-10);
        // 3-day window -> 2 delta rows.
        assert_eq!(report.deltas.len(), 2);
    }

    #[test]
    fn main_without_databricks_drops_the_category() {
        let window = ReportWindow::trailing(2, ymd(2025, 6, 3));
        let mut daily = BTreeMap::new();
        daily.insert(20250601, vec![vm_row(ymd(2025, 6, 1), 4.0)]);

        let report = build_report(Subscription::Main, &window, &daily);
        assert_eq!(
            report.active_categories,
            vec![Category::VirtualMachine, Category::Storage, Category::Others]
        );
    }

    #[test]
    fn main_with_any_databricks_keeps_all_categories() {
        let window = ReportWindow::trailing(2, ymd(2025, 6, 3));
        let mut daily = BTreeMap::new();
        daily.insert(20250602, vec![databricks_row(ymd(2025, 6, 2), 0.01)]);

        let report = build_report(Subscription::Main, &window, &daily);
        assert_eq!(report.active_categories, Category::ALL.to_vec());
    }

    #[test]
    fn non_main_keeps_all_categories_even_without_databricks() {
        let window = ReportWindow::trailing(2, ymd(2025, 6, 3));
        let daily = BTreeMap::new();

        for sub in [Subscription::Prod, Subscription::Dev, Subscription::Test] {
            let report = build_report(sub, &window, &daily);
            assert_eq!(report.active_categories, Category::ALL.to_vec());
        }
    }
}
