use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;

use crate::core::auth::AccessToken;
use crate::core::models::query::{QueryProperties, QueryRequest, QueryResponse};

const MANAGEMENT_BASE: &str = "https://management.azure.com";
const API_VERSION: &str = "2023-03-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Rate-limit retry caps. The range path honors Retry-After exactly and gets
/// a generous cap; the single-day path keeps the tighter exponential policy.
const MAX_RANGE_RETRIES: u32 = 5;
const MAX_DAY_RETRIES: u32 = 3;

const DEFAULT_RANGE_RETRY_SECS: u64 = 60;

type RetryDelay = fn(u32, Option<u64>) -> Duration;

/// Cost Management query client. Holds the bearer token it was given; the
/// token is never read from ambient state.
pub struct CostClient {
    http: reqwest::Client,
    token: AccessToken,
}

impl CostClient {
    pub fn new(token: AccessToken) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, token })
    }

    /// One query covering the whole window at daily granularity, grouped by
    /// ResourceType and ChargeType.
    pub async fn fetch_range(
        &self,
        subscription_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<QueryProperties> {
        let body = QueryRequest::daily_range(start, end);
        self.query(subscription_id, &body, MAX_RANGE_RETRIES, range_retry_delay)
            .await
    }

    /// Single-day variant, grouped by ResourceType only.
    pub async fn fetch_day(
        &self,
        subscription_id: &str,
        date: NaiveDate,
    ) -> Result<QueryProperties> {
        let body = QueryRequest::single_day(date);
        self.query(subscription_id, &body, MAX_DAY_RETRIES, day_retry_delay)
            .await
    }

    async fn query(
        &self,
        subscription_id: &str,
        body: &QueryRequest,
        max_retries: u32,
        delay_policy: RetryDelay,
    ) -> Result<QueryProperties> {
        let url = query_url(subscription_id);
        let mut retries = 0u32;

        loop {
            let response = self
                .http
                .post(&url)
                .bearer_auth(self.token.secret())
                .json(body)
                .send()
                .await
                .context("Failed to send cost query")?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                if retries >= max_retries {
                    anyhow::bail!("Still rate limited after {} retries", max_retries);
                }
                let wait = delay_policy(retries, parse_retry_after(response.headers()));
                retries += 1;
                eprintln!(
                    "Rate limit hit. Waiting {} seconds before retry...",
                    wait.as_secs()
                );
                tokio::time::sleep(wait).await;
                continue;
            }

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                anyhow::bail!("HTTP {} from cost query: {}", status.as_u16(), text);
            }

            let parsed: QueryResponse = response
                .json()
                .await
                .context("Failed to parse cost query response")?;
            return parsed
                .properties
                .context("Cost query response had no properties");
        }
    }
}

fn query_url(subscription_id: &str) -> String {
    format!(
        "{}/subscriptions/{}/providers/Microsoft.CostManagement/query?api-version={}",
        MANAGEMENT_BASE, subscription_id, API_VERSION
    )
}

fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()
}

/// Range path: the server's Retry-After drives the wait, 60 seconds when the
/// header is absent.
fn range_retry_delay(_retries: u32, retry_after: Option<u64>) -> Duration {
    Duration::from_secs(retry_after.unwrap_or(DEFAULT_RANGE_RETRY_SECS))
}

/// Single-day path: Retry-After when present, else 2^n seconds for the n-th
/// retry.
fn day_retry_delay(retries: u32, retry_after: Option<u64>) -> Duration {
    Duration::from_secs(retry_after.unwrap_or(1u64 << retries))
}
