#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use http_body_util::BodyExt;
use tickerbot::{
    AppState,
    config::{PriceSource, Settings},
    error::{DeliveryError, LookupError},
    events,
    models::{Symbol, UserId},
    services::{
        alert_store::AlertStore,
        notifier::NotificationSink,
        price_lookup::PriceLookup,
    },
    templates,
};

#[derive(Debug, Clone, Copy)]
pub enum Quote {
    Price(f64),
    NotFound,
    Fail,
    Hang,
    Panic,
}

/// Price source answering from a script, counting calls per symbol.
#[derive(Default)]
pub struct FakeLookup {
    quotes: Mutex<HashMap<String, Quote>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl FakeLookup {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, symbol: &str, quote: Quote) {
        self.quotes.lock().unwrap().insert(symbol.to_uppercase(), quote);
    }

    pub fn calls(&self, symbol: &str) -> usize {
        self.calls.lock().unwrap().get(&symbol.to_uppercase()).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl PriceLookup for FakeLookup {
    async fn lookup(&self, symbol: &Symbol) -> Result<Option<f64>, LookupError> {
        *self.calls.lock().unwrap().entry(symbol.to_string()).or_default() += 1;
        let quote = self
            .quotes
            .lock()
            .unwrap()
            .get(symbol.as_str())
            .copied()
            .unwrap_or(Quote::NotFound);

        match quote {
            Quote::Price(p) => Ok(Some(p)),
            Quote::NotFound => Ok(None),
            Quote::Fail => Err(LookupError::Layout("scripted failure".to_string())),
            Quote::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(None)
            }
            Quote::Panic => panic!("scripted panic for {symbol}"),
        }
    }
}

/// Records every notification; can be told to refuse delivery.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(UserId, String)>>,
    failing: Mutex<bool>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_all(&self) {
        *self.failing.lock().unwrap() = true;
    }

    pub fn sent(&self) -> Vec<(UserId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, user: UserId, message: &str) -> Result<(), DeliveryError> {
        if *self.failing.lock().unwrap() {
            return Err(DeliveryError::NoListeners);
        }
        self.sent.lock().unwrap().push((user, message.to_string()));
        Ok(())
    }
}

pub fn test_settings() -> Settings {
    Settings {
        host: "127.0.0.1".to_string(),
        port: 0,
        price_source: PriceSource::LiveTrading,
        live_trading_url: "http://127.0.0.1:9/live-trading".to_string(),
        finnhub_api_key: String::new(),
        discord_bot_token: String::new(),
        discord_api_base: "http://127.0.0.1:9".to_string(),
        alert_interval_secs: 30,
        lookup_timeout_secs: 1,
        alert_soft_limit: 10,
    }
}

pub fn test_state(lookup: Arc<FakeLookup>) -> AppState {
    AppState {
        hbs: templates::build_handlebars(),
        settings: test_settings(),
        store: Arc::new(AlertStore::new()),
        lookup,
        events_tx: events::channel(),
    }
}

pub fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

pub async fn response_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
