use serde_json::json;

use crate::{
    AppState,
    error::CommandError,
    services::alerts_service::{AlertCreated, AlertListing, AlertsRemoved},
    format::{distance, rupees, signed2},
};

fn render(state: &AppState, tpl: &str, ctx: serde_json::Value) -> Result<String, CommandError> {
    Ok(state.hbs.render(tpl, &ctx)?.trim_end().to_string())
}

/// Marker shown on the confirmation, by percent still to go.
pub fn created_status(percent: f64) -> &'static str {
    if percent > 5.0 {
        "🟠"
    } else if percent > 2.0 {
        "🟡"
    } else if percent > 0.0 {
        "🟢"
    } else {
        "✅"
    }
}

/// Status line used in the alert listing.
pub fn listing_status(percent: f64) -> String {
    if percent.abs() < 0.5 {
        "✅ Near Target!".to_string()
    } else if percent < 0.0 {
        "📉 Below Target".to_string()
    } else if percent > 5.0 {
        format!("🟠 {:.1}% away", percent.abs())
    } else if percent > 2.0 {
        format!("🟡 {:.1}% away", percent.abs())
    } else {
        format!("🟢 {:.1}% away", percent.abs())
    }
}

pub fn alert_created(state: &AppState, created: &AlertCreated) -> Result<String, CommandError> {
    let (diff, percent) = distance(created.target, created.current);

    let ctx = json!({
        "symbol": created.symbol.as_str(),
        "target": rupees(created.target),
        "current": rupees(created.current),
        "diff": signed2(diff),
        "percent": signed2(percent),
        "status": created_status(percent),
        "total": created.total,
        "limit": state.settings.alert_soft_limit,
        "interval": state.settings.alert_interval_secs,
    });

    render(state, "messages/alert_created", ctx)
}

pub fn alert_listing(state: &AppState, listing: &AlertListing) -> Result<String, CommandError> {
    if listing.symbols.is_empty() {
        return render(state, "messages/no_alerts", json!({}));
    }

    let mut items: Vec<serde_json::Value> = vec![];
    for entry in &listing.symbols {
        for &target in &entry.targets {
            let (current, dist, status) = match entry.current {
                Some(cur) => {
                    let (_, percent) = distance(target, cur);
                    (rupees(cur), format!(" ({}%)", signed2(percent)), listing_status(percent))
                }
                None => ("N/A".to_string(), String::new(), "🎯 Pending".to_string()),
            };

            items.push(json!({
                "symbol": entry.symbol.as_str(),
                "target": rupees(target),
                "current": current,
                "distance": dist,
                "status": status,
            }));
        }
    }

    let ctx = json!({
        "items": items,
        "total": listing.total,
        "limit": state.settings.alert_soft_limit,
        "interval": state.settings.alert_interval_secs,
    });

    render(state, "messages/alert_list", ctx)
}

pub fn alerts_removed(state: &AppState, removed: &AlertsRemoved) -> Result<String, CommandError> {
    if removed.removed == 0 {
        return render(
            state,
            "messages/nothing_removed",
            json!({ "symbol": removed.symbol.as_str() }),
        );
    }

    let ctx = json!({
        "symbol": removed.symbol.as_str(),
        "removed": removed.removed,
        "remaining": removed.remaining,
        "limit": state.settings.alert_soft_limit,
    });

    render(state, "messages/alerts_removed", ctx)
}
