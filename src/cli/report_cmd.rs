use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::{control, Colorize};

use crate::cli::document;
use crate::cli::output::OutputOptions;
use crate::cli::prompt;
use crate::cli::renderer;
use crate::core::auth;
use crate::core::categorize;
use crate::core::config::AppConfig;
use crate::core::fetcher::CostClient;
use crate::core::models::cost::SubscriptionReport;
use crate::core::parser;
use crate::core::report::{self, ReportWindow};
use crate::core::subscription::{Subscription, CONSOLE_ORDER};

/// Pause between subscriptions, a rate-limit courtesy toward the Cost
/// Management API. Do not parallelize the loop without re-deriving safe
/// limits against its rate policy.
const SUBSCRIPTION_DELAY: Duration = Duration::from_secs(2);

pub async fn run(days: Option<u32>, opts: &OutputOptions) -> Result<()> {
    control::set_override(opts.use_color);

    // Fail fast on configuration before prompting or touching the network.
    let config = AppConfig::from_env()?;

    let num_days = match days {
        Some(n) => n,
        None => prompt::prompt_days()?,
    };
    let window = ReportWindow::ending_yesterday(num_days);

    let http = reqwest::Client::new();
    let token = auth::acquire_token(&http, &config.credentials)
        .await
        .context("Azure AD authentication failed")?;
    let client = CostClient::new(token)?;

    println!();
    println!("{}", renderer::banner_line());
    println!(
        "{}",
        format!("AZURE COST REPORT - LAST {} DAYS (ending yesterday)", num_days).bold()
    );
    println!("{}", renderer::banner_line());

    let mut reports: Vec<SubscriptionReport> = Vec::new();

    for (idx, sub) in CONSOLE_ORDER.into_iter().enumerate() {
        if idx > 0 {
            println!("Waiting 2 seconds before next subscription...");
            tokio::time::sleep(SUBSCRIPTION_DELAY).await;
        }

        println!("\n{}\n", renderer::subscription_banner(sub, opts.use_color));
        println!("Fetching data from {} to {}...", window.start, window.end);

        match fetch_subscription(&client, &config, sub, &window).await {
            Ok(report) => {
                println!("{}", renderer::render_subscription(&report, opts.use_color));
                reports.push(report);
            }
            Err(err) => {
                let detail = if opts.verbose {
                    format!("{:#}", err)
                } else {
                    err.to_string()
                };
                let line = format!("Failed to fetch data for {} subscription: {}", sub.id(), detail);
                eprintln!("{}", line.red());
            }
        }
    }

    println!("{}", renderer::banner_line());
    println!("Console report generation completed!");
    println!("{}", renderer::banner_line());

    println!("\nGenerating report document...");
    let path = document::write_document(&reports, &window)?;
    println!("Report document created: {}", path.display());

    Ok(())
}

async fn fetch_subscription(
    client: &CostClient,
    config: &AppConfig,
    sub: Subscription,
    window: &ReportWindow,
) -> Result<SubscriptionReport> {
    let props = client
        .fetch_range(config.subscription_id(sub), window.start, window.end)
        .await?;
    let daily = parser::group_by_date(&props)?;
    Ok(report::build_report(sub, window, &daily))
}

/// The single-day variant: one subscription, one date, one breakdown table.
pub async fn run_day(subscription: &str, date: &str, opts: &OutputOptions) -> Result<()> {
    control::set_override(opts.use_color);

    let sub = Subscription::from_id(subscription)
        .with_context(|| format!("Unknown subscription: '{}'", subscription))?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))?;

    let config = AppConfig::from_env()?;

    let http = reqwest::Client::new();
    let token = auth::acquire_token(&http, &config.credentials)
        .await
        .context("Azure AD authentication failed")?;
    let client = CostClient::new(token)?;

    let props = client.fetch_day(config.subscription_id(sub), date).await?;
    let daily = parser::group_by_date(&props)?;
    let rows = daily.get(&report::date_key(date)).cloned().unwrap_or_default();
    let breakdown = categorize::summarize(date, &rows);

    println!("\n{}\n", renderer::subscription_banner(sub, opts.use_color));
    println!("{}", renderer::cost_table(&[breakdown], opts.use_color));

    Ok(())
}
