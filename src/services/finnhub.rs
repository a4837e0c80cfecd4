use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::LookupError;
use crate::models::{Symbol, alert::is_valid_price};
use crate::services::price_lookup::PriceLookup;

#[derive(Clone)]
pub struct FinnhubClient {
    http: Client,
    api_key: String,
}

impl FinnhubClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, LookupError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, api_key })
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub async fn quote(&self, symbol: &str) -> Result<QuoteResponse, LookupError> {
        if !self.has_key() {
            return Err(LookupError::NotConfigured("FINNHUB_API_KEY is missing in .env"));
        }

        let url = "https://finnhub.io/api/v1/quote";
        let res = self
            .http
            .get(url)
            .query(&[("symbol", symbol), ("token", &self.api_key)])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(LookupError::Status { status, body });
        }

        Ok(res.json::<QuoteResponse>().await?)
    }
}

#[async_trait]
impl PriceLookup for FinnhubClient {
    async fn lookup(&self, symbol: &Symbol) -> Result<Option<f64>, LookupError> {
        let quote = self.quote(symbol.as_str()).await?;

        // unknown symbols come back as an all-zero quote
        if !is_valid_price(quote.c) {
            return Ok(None);
        }
        Ok(Some(quote.c))
    }
}

#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    // current
    pub c: f64,
}
