use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::DeliveryError;
use crate::events::{ALERT_NOTIFICATION, BusEvent, EventBus};
use crate::models::UserId;

/// Direct-message channel to a user. Delivery is best effort.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, user: UserId, message: &str) -> Result<(), DeliveryError>;
}

pub type SharedSink = Arc<dyn NotificationSink>;

/// Sends DMs through the Discord REST API with a bot token.
#[derive(Clone)]
pub struct DiscordNotifier {
    http: Client,
    api_base: String,
    token: String,
}

#[derive(Deserialize)]
struct DmChannel {
    id: String,
}

impl DiscordNotifier {
    pub fn new(api_base: String, token: String, timeout: Duration) -> Result<Self, DeliveryError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<reqwest::Response, DeliveryError> {
        let res = self
            .http
            .post(format!("{}{}", self.api_base, path))
            .header("Authorization", format!("Bot {}", self.token))
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected { status, body });
        }
        Ok(res)
    }
}

#[async_trait]
impl NotificationSink for DiscordNotifier {
    async fn notify(&self, user: UserId, message: &str) -> Result<(), DeliveryError> {
        let channel: DmChannel = self
            .post("/users/@me/channels", json!({ "recipient_id": user.to_string() }))
            .await?
            .json()
            .await?;

        self.post(
            &format!("/channels/{}/messages", channel.id),
            json!({ "content": message }),
        )
        .await?;
        Ok(())
    }
}

/// Publishes notifications on the event bus for `/events` listeners.
#[derive(Clone)]
pub struct EventBusNotifier {
    bus: EventBus,
}

impl EventBusNotifier {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl NotificationSink for EventBusNotifier {
    async fn notify(&self, user: UserId, message: &str) -> Result<(), DeliveryError> {
        let data = json!({
            "user_id": user.to_string(),
            "message": message,
            "at": chrono::Utc::now().timestamp(),
        });

        self.bus
            .send(BusEvent {
                name: ALERT_NOTIFICATION,
                data: data.to_string(),
            })
            .map(|_| ())
            .map_err(|_| DeliveryError::NoListeners)
    }
}
