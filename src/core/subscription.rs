use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subscription {
    Main,
    Prod,
    Dev,
    Test,
}

/// Console output processes subscriptions in this order.
pub const CONSOLE_ORDER: [Subscription; 4] = [
    Subscription::Main,
    Subscription::Prod,
    Subscription::Dev,
    Subscription::Test,
];

/// The report document lists environments in this order.
pub const DOCUMENT_ORDER: [Subscription; 4] = [
    Subscription::Prod,
    Subscription::Dev,
    Subscription::Test,
    Subscription::Main,
];

impl Subscription {
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "main" => Some(Self::Main),
            "prod" => Some(Self::Prod),
            "dev" => Some(Self::Dev),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Prod => "prod",
            Self::Dev => "dev",
            Self::Test => "test",
        }
    }

    /// Environment variable carrying this subscription's Azure id.
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Main => "SUBSCRIPTION_MAIN",
            Self::Prod => "SUBSCRIPTION_PROD",
            Self::Dev => "SUBSCRIPTION_DEV",
            Self::Test => "SUBSCRIPTION_TEST",
        }
    }

    /// Heading used for the document section, e.g. "Prod Environment".
    pub fn heading(&self) -> String {
        let id = self.id();
        let mut chars = id.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
        format!("{} Environment", capitalized)
    }
}
