use axum::{Router, routing::{delete, get, post}};
use crate::{AppState, controllers::alerts_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/alerts", post(alerts_controller::post_create_alert))
        .route("/alerts/:user_id", get(alerts_controller::get_alerts))
        .route("/alerts/:user_id/:symbol", delete(alerts_controller::delete_alerts))
}
