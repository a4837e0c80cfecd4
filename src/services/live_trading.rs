use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::LookupError;
use crate::html;
use crate::models::Symbol;
use crate::services::price_lookup::PriceLookup;

// Columns of the live-trading table: S.No, Symbol, LTP, ...
const SYMBOL_COL: usize = 1;
const LTP_COL: usize = 2;

/// Scrapes last traded prices from the exchange's live-trading page.
#[derive(Clone)]
pub struct LiveTradingClient {
    http: Client,
    url: String,
}

impl LiveTradingClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("tickerbot/0.1")
            .build()?;
        Ok(Self { http, url })
    }

    async fn fetch_page(&self) -> Result<String, LookupError> {
        let res = self.http.get(&self.url).send().await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(LookupError::Status { status, body });
        }

        Ok(res.text().await?)
    }
}

#[async_trait]
impl PriceLookup for LiveTradingClient {
    async fn lookup(&self, symbol: &Symbol) -> Result<Option<f64>, LookupError> {
        let page = self.fetch_page().await?;
        find_price(&page, symbol)
    }
}

/// Price of `symbol` in a live-trading page, rounded to 2 decimals.
pub fn find_price(page: &str, symbol: &Symbol) -> Result<Option<f64>, LookupError> {
    let body = html::first_section(page, "tbody")
        .ok_or_else(|| LookupError::Layout("no <tbody> in live-trading page".to_string()))?;

    for row in html::blocks(body, "tr") {
        let cells = html::blocks(row, "td");
        let (Some(sym), Some(ltp)) = (cells.get(SYMBOL_COL), cells.get(LTP_COL)) else {
            continue;
        };
        if html::text(sym).eq_ignore_ascii_case(symbol.as_str()) {
            return parse_price(&html::text(ltp)).map(Some);
        }
    }
    Ok(None)
}

fn parse_price(raw: &str) -> Result<f64, LookupError> {
    let cleaned = raw.replace(',', "");
    let v: f64 = cleaned
        .trim()
        .parse()
        .map_err(|_| LookupError::BadPrice(raw.to_string()))?;
    if !v.is_finite() {
        return Err(LookupError::BadPrice(raw.to_string()));
    }
    Ok((v * 100.0).round() / 100.0)
}
