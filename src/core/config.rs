use std::collections::HashMap;

use thiserror::Error;

use crate::core::subscription::{Subscription, CONSOLE_ORDER};

const TENANT_ID_VAR: &str = "AZURE_TENANT_ID";
const CLIENT_ID_VAR: &str = "AZURE_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "AZURE_CLIENT_SECRET";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<String>),
}

/// Azure AD client-credential material.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Everything the run needs, resolved from the process environment before any
/// network call is made.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    subscription_ids: HashMap<Subscription, String>,
}

impl AppConfig {
    /// Read configuration from the environment, collecting every missing
    /// variable so the failure names all of them at once.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut missing: Vec<String> = Vec::new();

        let mut require = |name: &str| match std::env::var(name) {
            Ok(value) if !value.trim().is_empty() => Some(value),
            _ => {
                missing.push(name.to_string());
                None
            }
        };

        let tenant_id = require(TENANT_ID_VAR);
        let client_id = require(CLIENT_ID_VAR);
        let client_secret = require(CLIENT_SECRET_VAR);

        let mut subscription_ids = HashMap::new();
        for sub in CONSOLE_ORDER {
            if let Some(id) = require(sub.env_var()) {
                subscription_ids.insert(sub, id);
            }
        }

        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        Ok(Self {
            credentials: Credentials {
                tenant_id: tenant_id.unwrap_or_default(),
                client_id: client_id.unwrap_or_default(),
                client_secret: client_secret.unwrap_or_default(),
            },
            subscription_ids,
        })
    }

    pub fn subscription_id(&self, sub: Subscription) -> &str {
        self.subscription_ids
            .get(&sub)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
