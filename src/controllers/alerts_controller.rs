use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState,
    error::CommandError,
    models::UserId,
    render,
    services::alerts_service,
};

#[derive(Deserialize)]
pub struct CreateAlertRequest {
    pub user_id: UserId,
    pub symbol: String,
    // number or numeric string, validated here so bad input never reaches the store
    pub target_price: Value,
}

fn target_price(raw: &Value) -> Result<f64, CommandError> {
    match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| CommandError::InvalidPrice(n.to_string()))
            .and_then(alerts_service::validate_price),
        Value::String(s) => alerts_service::parse_target_price(s),
        other => Err(CommandError::InvalidPrice(other.to_string())),
    }
}

// Path ids arrive as text so a bad one gets the same JSON error body as everything else.
fn parse_user_id(raw: &str) -> Result<UserId, CommandError> {
    raw.trim()
        .parse()
        .map(UserId)
        .map_err(|_| CommandError::InvalidUser(raw.to_string()))
}

// POST /alerts
pub async fn post_create_alert(
    State(state): State<AppState>,
    Json(req): Json<CreateAlertRequest>,
) -> Result<(StatusCode, Json<Value>), CommandError> {
    let target = target_price(&req.target_price)?;
    let created = alerts_service::set_alert(&state, req.user_id, &req.symbol, target).await?;
    let reply = render::alert_created(&state, &created)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "reply": reply,
            "symbol": created.symbol,
            "target_price": created.target,
            "current_price": created.current,
            "total": created.total,
            "limit": state.settings.alert_soft_limit,
        })),
    ))
}

// GET /alerts/:user_id
pub async fn get_alerts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, CommandError> {
    let listing = alerts_service::show_alerts(&state, parse_user_id(&user_id)?).await;
    let reply = render::alert_listing(&state, &listing)?;

    // BTreeMap for a stable key order in the JSON body; `reply` keeps insertion order.
    let alerts: BTreeMap<&str, &Vec<f64>> = listing
        .symbols
        .iter()
        .map(|s| (s.symbol.as_str(), &s.targets))
        .collect();
    let current: BTreeMap<&str, Option<f64>> = listing
        .symbols
        .iter()
        .map(|s| (s.symbol.as_str(), s.current))
        .collect();

    Ok(Json(json!({
        "reply": reply,
        "alerts": alerts,
        "current_prices": current,
        "total": listing.total,
        "limit": state.settings.alert_soft_limit,
    })))
}

// DELETE /alerts/:user_id/:symbol
pub async fn delete_alerts(
    State(state): State<AppState>,
    Path((user_id, symbol)): Path<(String, String)>,
) -> Result<Json<Value>, CommandError> {
    let removed = alerts_service::remove_alert(&state, parse_user_id(&user_id)?, &symbol)?;
    let reply = render::alerts_removed(&state, &removed)?;

    Ok(Json(json!({
        "reply": reply,
        "symbol": removed.symbol,
        "removed": removed.removed,
        "remaining": removed.remaining,
    })))
}
