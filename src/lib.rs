//! Library entrypoint for tickerbot.
//!
//! The binary wires these together; integration tests under `tests/` build an
//! [`AppState`] with fake price sources and drive the services, the monitor and
//! the routers directly.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod events;
pub mod models;

pub mod commands;
pub mod html;
pub mod services;

#[path = "views/format.rs"]
pub mod format;
#[path = "views/render.rs"]
pub mod render;
#[path = "views/templates.rs"]
pub mod templates;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub settings: config::Settings,
    pub store: Arc<services::alert_store::AlertStore>,
    pub lookup: services::price_lookup::SharedLookup,
    pub events_tx: events::EventBus,
}
