use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    /// Seed a demo farmer, customer, sessions, and a few products at startup.
    pub seed_demo: bool,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("MARKET_PORT", "3000"),
            seed_demo: try_load("MARKET_SEED_DEMO", "true"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
