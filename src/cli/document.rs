use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::core::delta::format_percent;
use crate::core::models::cost::SubscriptionReport;
use crate::core::report::ReportWindow;
use crate::core::subscription::DOCUMENT_ORDER;

pub fn document_filename(timestamp: DateTime<Local>) -> String {
    timestamp
        .format("Azure_Cost_Report_%Y%m%d_%H%M%S.md")
        .to_string()
}

/// "Monday (06/02), Tuesday (06/03), ..." over the whole window.
fn weekday_list(window: &ReportWindow) -> String {
    window
        .dates()
        .into_iter()
        .map(|date| format!("{} ({})", date.format("%A"), date.format("%m/%d")))
        .collect::<Vec<_>>()
        .join(", ")
}

fn markdown_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(&format!("| {} |\n", headers.join(" | ")));
    out.push_str(&format!(
        "|{}|\n",
        headers.iter().map(|_| " --- ").collect::<Vec<_>>().join("|")
    ));
    for row in rows {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    out
}

/// One environment section: heading, cost table, captioned delta table. The
/// document uses the report's exclusion-aware category set, unlike the
/// console view.
fn section(report: &SubscriptionReport) -> String {
    let mut headers = vec!["Date".to_string()];
    for category in &report.active_categories {
        headers.push(category.display_name().to_string());
    }

    let cost_rows: Vec<Vec<String>> = report
        .days
        .iter()
        .map(|day| {
            let mut row = vec![day.date.format("%m/%d").to_string()];
            for category in &report.active_categories {
                row.push(format!("${:.2}", day.get(*category)));
            }
            row
        })
        .collect();

    let delta_rows: Vec<Vec<String>> = report
        .deltas
        .iter()
        .map(|delta| {
            let mut row = vec![delta.date.format("%m/%d").to_string()];
            for category in &report.active_categories {
                row.push(format_percent(delta.get(*category)));
            }
            row
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format!("## {}\n\n", report.subscription.heading()));
    out.push_str(&markdown_table(&headers, &cost_rows));
    out.push('\n');
    out.push_str(&format!(
        "**Percentage difference for {}**\n\n",
        report.subscription.id()
    ));
    out.push_str(&markdown_table(&headers, &delta_rows));
    out.push('\n');
    out
}

/// The full report document. Subscriptions that failed to fetch simply have
/// no section; the environment order is fixed.
pub fn render_document(reports: &[SubscriptionReport], window: &ReportWindow) -> String {
    let mut doc = String::new();
    doc.push_str("# Azure Cost Summary Report\n\n");
    doc.push_str("Hi Team,\n\n");
    doc.push_str(&format!(
        "Please find below the Azure cost summary for {} for all subscriptions, \
         along with percentage changes compared to the previous day.\n\n",
        weekday_list(window)
    ));

    for sub in DOCUMENT_ORDER {
        if let Some(report) = reports.iter().find(|r| r.subscription == sub) {
            doc.push_str(&section(report));
        }
    }

    doc.push_str("Thank you.\n");
    doc
}

/// Render and save the document to the working directory under a timestamped
/// name.
pub fn write_document(reports: &[SubscriptionReport], window: &ReportWindow) -> Result<PathBuf> {
    let path = PathBuf::from(document_filename(Local::now()));
    std::fs::write(&path, render_document(reports, window))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
