use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::events::{self, EventBus};
use crate::models::alert::{is_crossed, is_valid_price};
use crate::models::{Symbol, SymbolWatch, UserId};
use crate::services::alert_store::AlertStore;
use crate::services::notifier::SharedSink;
use crate::services::price_lookup::{SharedLookup, lookup_within};
use crate::format;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct FiredAlert {
    pub user: UserId,
    pub symbol: Symbol,
    pub target: f64,
    pub price: f64,
    pub delivered: bool,
}

/// What one tick did, for logs and tests.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub looked_up: Vec<Symbol>,
    pub skipped: Vec<Symbol>,
    pub fired: Vec<FiredAlert>,
}

impl TickReport {
    pub fn delivery_failures(&self) -> usize {
        self.fired.iter().filter(|f| !f.delivered).count()
    }
}

/// Periodically compares watched prices against pending targets.
///
/// Each tick snapshots the store, looks every distinct symbol up once with the
/// store unlocked, and removes each crossed target before notifying its owner.
#[derive(Clone)]
pub struct AlertMonitor {
    store: Arc<AlertStore>,
    lookup: SharedLookup,
    sink: SharedSink,
    events: EventBus,
    interval: Duration,
    lookup_timeout: Duration,
}

/// Running monitor task. Dropping the handle also ends the task after its current tick.
pub struct MonitorHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Stops scheduling ticks. A tick already in flight runs to completion first.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::error!("[alert-monitor] task ended abnormally: {e}");
        }
    }
}

impl AlertMonitor {
    pub fn new(store: Arc<AlertStore>, lookup: SharedLookup, sink: SharedSink, events: EventBus) -> Self {
        Self {
            store,
            lookup,
            sink,
            events,
            interval: DEFAULT_INTERVAL,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    pub fn start(self) -> MonitorHandle {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!("[alert-monitor] started, interval={:?}", self.interval);

            loop {
                tokio::select! {
                    // Err means the handle is gone: stop as well
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {}
                }

                // A panic inside one tick must not end the schedule.
                let monitor = self.clone();
                match tokio::spawn(async move { monitor.run_tick().await }).await {
                    Ok(report) if !report.fired.is_empty() || !report.skipped.is_empty() => {
                        tracing::info!(
                            "[alert-monitor] tick: looked_up={} skipped={} fired={} undelivered={}",
                            report.looked_up.len(),
                            report.skipped.len(),
                            report.fired.len(),
                            report.delivery_failures()
                        );
                    }
                    Ok(_) => {}
                    Err(e) => tracing::error!("[alert-monitor] tick panicked: {e}"),
                }
            }

            tracing::info!("[alert-monitor] stopped");
        });

        MonitorHandle { shutdown, task }
    }

    pub async fn run_tick(&self) -> TickReport {
        let mut report = TickReport::default();

        for watch in self.store.for_each_symbol() {
            let symbol = watch.symbol.clone();
            // A panicking source or sink only costs its own symbol this tick.
            let outcome = AssertUnwindSafe(self.evaluate_symbol(watch, &mut report))
                .catch_unwind()
                .await;
            if outcome.is_err() {
                tracing::error!("[alert-monitor] {symbol}: evaluation panicked, deferring");
                report.skipped.push(symbol);
            }
        }

        if !report.fired.is_empty() {
            events::publish_alerts_updated(&self.events);
        }
        report
    }

    async fn evaluate_symbol(&self, watch: SymbolWatch, report: &mut TickReport) {
        let SymbolWatch { symbol, watchers } = watch;
        report.looked_up.push(symbol.clone());

        let price = match lookup_within(self.lookup.as_ref(), &symbol, self.lookup_timeout).await {
            Ok(Some(p)) if is_valid_price(p) => p,
            Ok(Some(p)) => {
                tracing::warn!("[alert-monitor] {symbol}: ignoring invalid price {p}");
                report.skipped.push(symbol);
                return;
            }
            Ok(None) => {
                tracing::debug!("[alert-monitor] {symbol}: not found, deferring");
                report.skipped.push(symbol);
                return;
            }
            Err(e) => {
                tracing::warn!("[alert-monitor] {symbol}: lookup failed, deferring: {e}");
                report.skipped.push(symbol);
                return;
            }
        };

        for (user, target) in watchers {
            if !is_crossed(price, target.price) {
                continue;
            }

            // Claim before notifying so a concurrent removal never yields a second message.
            if !self.store.remove_target(user, &symbol, target.id) {
                continue;
            }

            let message = format::alert_message(symbol.as_str(), target.price, price);
            let delivered = match self.sink.notify(user, &message).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("[alert-monitor] could not notify {user} about {symbol}: {e}");
                    false
                }
            };

            report.fired.push(FiredAlert {
                user,
                symbol: symbol.clone(),
                target: target.price,
                price,
                delivered,
            });
        }
    }
}
