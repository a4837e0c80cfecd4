use std::{env, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    LiveTrading,
    Finnhub,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    pub price_source: PriceSource,
    pub live_trading_url: String,
    pub finnhub_api_key: String,

    pub discord_bot_token: String,
    pub discord_api_base: String,

    pub alert_interval_secs: u64,
    pub lookup_timeout_secs: u64,
    pub alert_soft_limit: usize,
}

impl Settings {
    pub fn alert_interval(&self) -> Duration {
        Duration::from_secs(self.alert_interval_secs)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = parse_or("PORT", 3000u16);

    let price_source = match env::var("PRICE_SOURCE")
        .unwrap_or_default()
        .trim()
        .to_lowercase()
        .as_str()
    {
        "finnhub" => PriceSource::Finnhub,
        _ => PriceSource::LiveTrading,
    };

    let live_trading_url = env::var("LIVE_TRADING_URL")
        .unwrap_or_else(|_| "https://www.sharesansar.com/live-trading".to_string());
    let finnhub_api_key = env::var("FINNHUB_API_KEY").unwrap_or_default();

    let discord_bot_token = env::var("DISCORD_BOT_TOKEN").unwrap_or_default();
    let discord_api_base = env::var("DISCORD_API_BASE")
        .unwrap_or_else(|_| "https://discord.com/api/v10".to_string());

    // zero would make tokio::time::interval panic
    let alert_interval_secs = parse_or("ALERT_INTERVAL_SECS", 30u64).max(1);
    let lookup_timeout_secs = parse_or("LOOKUP_TIMEOUT_SECS", 10u64).max(1);
    let alert_soft_limit = parse_or("ALERT_SOFT_LIMIT", 10usize);

    Settings {
        host,
        port,
        price_source,
        live_trading_url,
        finnhub_api_key,
        discord_bot_token,
        discord_api_base,
        alert_interval_secs,
        lookup_timeout_secs,
        alert_soft_limit,
    }
}
