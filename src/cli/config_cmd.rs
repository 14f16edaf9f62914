use anyhow::Result;
use colored::{control, Colorize};

use crate::cli::output::OutputOptions;
use crate::core::config::AppConfig;
use crate::core::subscription::CONSOLE_ORDER;

/// Validate the environment configuration without touching the network.
pub fn check(opts: &OutputOptions) -> Result<()> {
    control::set_override(opts.use_color);

    let config = AppConfig::from_env()?;

    println!("{}", "Configuration OK".green());
    for sub in CONSOLE_ORDER {
        println!("  {:<5} {}", sub.id(), config.subscription_id(sub));
    }
    Ok(())
}
