use chrono::NaiveDate;
use colored::{control, Colorize};
use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::core::categorize::Category;
use crate::core::delta::format_percent;
use crate::core::models::cost::{DailyBreakdown, DeltaRow, SubscriptionReport};
use crate::core::subscription::Subscription;

const BANNER_WIDTH: usize = 80;

pub fn banner_line() -> String {
    "=".repeat(BANNER_WIDTH)
}

pub fn subscription_banner(sub: Subscription, use_color: bool) -> String {
    control::set_override(use_color);
    let title = format!("{} SUBSCRIPTION", sub.id().to_uppercase());
    format!("{}\n{}\n{}", banner_line(), title.bold(), banner_line())
}

fn date_label(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}

fn header_cells(use_color: bool) -> Vec<Cell> {
    let mut cells = vec![header_cell("Date", use_color)];
    for category in Category::ALL {
        cells.push(header_cell(category.display_name(), use_color));
    }
    cells
}

fn header_cell(text: &str, use_color: bool) -> Cell {
    if use_color {
        Cell::new(text).fg(Color::Cyan)
    } else {
        Cell::new(text)
    }
}

/// Daily cost grid. The console view always shows all four categories, even
/// when the document view drops one.
pub fn cost_table(days: &[DailyBreakdown], use_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header_cells(use_color));

    for day in days {
        let mut row = vec![date_label(day.date)];
        for category in Category::ALL {
            row.push(format!("${:.2}", day.get(category)));
        }
        table.add_row(row);
    }
    table
}

/// Day-over-day percent-change grid, same fixed four categories.
pub fn delta_table(deltas: &[DeltaRow], use_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header_cells(use_color));

    for delta in deltas {
        let mut row = vec![date_label(delta.date)];
        for category in Category::ALL {
            row.push(format_percent(delta.get(category)));
        }
        table.add_row(row);
    }
    table
}

/// Full console block for one subscription: cost table then delta table.
pub fn render_subscription(report: &SubscriptionReport, use_color: bool) -> String {
    let mut sections: Vec<String> = Vec::new();
    sections.push("Cost Table:".to_string());
    sections.push(cost_table(&report.days, use_color).to_string());
    sections.push(String::new());
    sections.push("Percentage Change (Day over Day):".to_string());
    sections.push(delta_table(&report.deltas, use_color).to_string());
    sections.join("\n")
}
