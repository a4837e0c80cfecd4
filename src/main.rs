use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use tickerbot::{
    AppState,
    config::{self, PriceSource},
    events, routes,
    services::{
        alert_monitor::AlertMonitor,
        alert_store::AlertStore,
        finnhub::FinnhubClient,
        live_trading::LiveTradingClient,
        notifier::{DiscordNotifier, EventBusNotifier, SharedSink},
        price_lookup::SharedLookup,
    },
    templates,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tickerbot=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let settings = config::load();

    let lookup: SharedLookup = match settings.price_source {
        PriceSource::LiveTrading => Arc::new(LiveTradingClient::new(
            settings.live_trading_url.clone(),
            settings.lookup_timeout(),
        )?),
        PriceSource::Finnhub => Arc::new(FinnhubClient::new(
            settings.finnhub_api_key.clone(),
            settings.lookup_timeout(),
        )?),
    };
    tracing::info!("price source: {:?}", settings.price_source);

    let events_tx = events::channel();

    let sink: SharedSink = if settings.discord_bot_token.trim().is_empty() {
        tracing::warn!("DISCORD_BOT_TOKEN is not set; alerts are only published on /events");
        Arc::new(EventBusNotifier::new(events_tx.clone()))
    } else {
        Arc::new(DiscordNotifier::new(
            settings.discord_api_base.clone(),
            settings.discord_bot_token.clone(),
            settings.lookup_timeout(),
        )?)
    };

    let store = Arc::new(AlertStore::new());

    let state = AppState {
        hbs: templates::build_handlebars(),
        settings: settings.clone(),
        store: store.clone(),
        lookup: lookup.clone(),
        events_tx: events_tx.clone(),
    };

    let monitor = AlertMonitor::new(store, lookup, sink, events_tx)
        .with_interval(settings.alert_interval())
        .with_lookup_timeout(settings.lookup_timeout())
        .start();

    let addr = SocketAddr::from((settings.host.parse::<std::net::IpAddr>()?, settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, routes::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    monitor.stop().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received, stopping");
}
