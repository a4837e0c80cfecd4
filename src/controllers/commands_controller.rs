use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState,
    commands::{self, Command},
    error::CommandError,
    models::UserId,
    render,
    services::alerts_service,
};

#[derive(Deserialize)]
pub struct CommandRequest {
    pub user_id: UserId,
    pub content: String,
}

pub async fn run_command(state: &AppState, user: UserId, content: &str) -> Result<String, CommandError> {
    match commands::parse(content)? {
        Command::SetAlert { symbol, target } => {
            let created = alerts_service::set_alert(state, user, &symbol, target).await?;
            render::alert_created(state, &created)
        }
        Command::ShowAlerts => {
            let listing = alerts_service::show_alerts(state, user).await;
            render::alert_listing(state, &listing)
        }
        Command::RemoveAlert { symbol } => {
            let removed = alerts_service::remove_alert(state, user, &symbol)?;
            render::alerts_removed(state, &removed)
        }
    }
}

// POST /commands
// Errors are chat replies too, so this always answers 200 with a `reply`.
pub async fn post_command(State(state): State<AppState>, Json(req): Json<CommandRequest>) -> Response {
    let (reply, error) = match run_command(&state, req.user_id, &req.content).await {
        Ok(reply) => (reply, serde_json::Value::Null),
        Err(e) => {
            tracing::debug!("command {:?} from {} rejected: {e:?}", req.content, req.user_id);
            (e.to_string(), json!(e.code()))
        }
    };

    (StatusCode::OK, Json(json!({ "reply": reply, "error": error }))).into_response()
}
