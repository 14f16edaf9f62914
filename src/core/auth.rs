use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::config::Credentials;

const LOGIN_BASE: &str = "https://login.microsoftonline.com";
const MANAGEMENT_RESOURCE: &str = "https://management.azure.com/";

/// Bearer token obtained once at startup and passed explicitly into the cost
/// client; nothing holds it as ambient process state.
#[derive(Debug, Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn secret(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// OAuth2 client-credentials exchange against Azure AD. Failure here is
/// fatal: the run cannot proceed without a token.
pub async fn acquire_token(
    http: &reqwest::Client,
    credentials: &Credentials,
) -> Result<AccessToken> {
    let url = format!("{}/{}/oauth2/token", LOGIN_BASE, credentials.tenant_id);
    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("resource", MANAGEMENT_RESOURCE),
    ];

    let response = http
        .post(&url)
        .form(&form)
        .send()
        .await
        .context("Failed to send token request to Azure AD")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("HTTP {} from token endpoint: {}", status.as_u16(), body);
    }

    let token: TokenResponse = response
        .json()
        .await
        .context("Failed to parse token response")?;
    let access_token = token
        .access_token
        .context("Token response did not include an access token")?;
    if access_token.is_empty() {
        anyhow::bail!("Empty access token from Azure AD");
    }
    Ok(AccessToken(access_token))
}
