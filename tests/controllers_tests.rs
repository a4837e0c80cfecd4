mod common;

use axum::http::{Request, StatusCode, header};
use common::{FakeLookup, Quote, response_json, test_state};
use tickerbot::models::UserId;
use tickerbot::routes;
use tower::ServiceExt;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<axum::body::Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

#[tokio::test]
async fn post_command_replies_with_chat_text() {
    let lookup = FakeLookup::new();
    lookup.set("NICA", Quote::Price(800.0));
    let state = test_state(lookup);
    let app = routes::app(state.clone());

    let req = json_request(
        "POST",
        "/commands",
        serde_json::json!({ "user_id": "123456789012345678", "content": "!setalert nica 820" }),
    );
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert!(body["reply"].as_str().unwrap().contains("NICA"));
    assert!(body["error"].is_null());
    assert_eq!(state.store.total_for(UserId(123456789012345678)), 1);
}

#[tokio::test]
async fn post_command_errors_are_replies_too() {
    let state = test_state(FakeLookup::new());
    let app = routes::app(state.clone());

    let req = json_request(
        "POST",
        "/commands",
        serde_json::json!({ "user_id": 1, "content": "!setalert NICA lots" }),
    );
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert_eq!(body["error"], "invalid_price");
    assert!(body["reply"].as_str().unwrap().contains("Invalid price"));
    assert!(state.store.is_empty());
}

#[tokio::test]
async fn slash_create_list_and_delete() {
    let lookup = FakeLookup::new();
    lookup.set("NABIL", Quote::Price(500.0));
    let state = test_state(lookup);

    let res = routes::app(state.clone())
        .oneshot(json_request(
            "POST",
            "/alerts",
            serde_json::json!({ "user_id": 9, "symbol": "nabil", "target_price": 510 }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = response_json(res).await;
    assert_eq!(body["symbol"], "NABIL");
    assert_eq!(body["total"], 1);

    let res = routes::app(state.clone())
        .oneshot(json_request(
            "POST",
            "/alerts",
            serde_json::json!({ "user_id": 9, "symbol": "NABIL", "target_price": "495.5" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = routes::app(state.clone())
        .oneshot(empty_request("GET", "/alerts/9"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(body["alerts"]["NABIL"], serde_json::json!([510.0, 495.5]));
    assert_eq!(body["current_prices"]["NABIL"], 500.0);
    assert_eq!(body["total"], 2);

    let res = routes::app(state.clone())
        .oneshot(empty_request("DELETE", "/alerts/9/nabil"))
        .await
        .unwrap();
    let body = response_json(res).await;
    assert_eq!(body["removed"], 2);
    assert_eq!(body["remaining"], 0);

    let res = routes::app(state.clone())
        .oneshot(empty_request("DELETE", "/alerts/9/nabil"))
        .await
        .unwrap();
    let body = response_json(res).await;
    assert_eq!(body["removed"], 0);
    assert!(body["reply"].as_str().unwrap().contains("No Alerts Found"));
}

#[tokio::test]
async fn slash_create_unknown_symbol_is_404() {
    let state = test_state(FakeLookup::new());

    let res = routes::app(state.clone())
        .oneshot(json_request(
            "POST",
            "/alerts",
            serde_json::json!({ "user_id": 9, "symbol": "ZZZ", "target_price": 10 }),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = response_json(res).await;
    assert_eq!(body["error"], "symbol_not_found");
    assert!(state.store.is_empty());
}

#[tokio::test]
async fn slash_create_rejects_non_numeric_price() {
    let lookup = FakeLookup::new();
    lookup.set("NABIL", Quote::Price(500.0));
    let state = test_state(lookup);

    let res = routes::app(state.clone())
        .oneshot(json_request(
            "POST",
            "/alerts",
            serde_json::json!({ "user_id": 9, "symbol": "NABIL", "target_price": true }),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(state.store.is_empty());
}

#[tokio::test]
async fn non_numeric_user_id_gets_a_json_error() {
    let state = test_state(FakeLookup::new());

    for (method, uri) in [("GET", "/alerts/not-a-user"), ("DELETE", "/alerts/not-a-user/NABIL")] {
        let res = routes::app(state.clone())
            .oneshot(empty_request(method, uri))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
        let body = response_json(res).await;
        assert_eq!(body["error"], "invalid_user");
        assert!(body["reply"].as_str().unwrap().contains("not-a-user"));
    }
}

#[tokio::test]
async fn health_and_fallback() {
    let state = test_state(FakeLookup::new());

    let res = routes::app(state.clone())
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(body["status"], "ok");

    let res = routes::app(state)
        .oneshot(empty_request("GET", "/nope"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
