use axum::{
    body::{to_bytes, Body},
    extract::{OriginalUri, State},
    http::{header, Method, Request, StatusCode},
    response::IntoResponse,
    Json, Router,
};
use pricewatch_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

fn test_config(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_vars(|key| vars.get(key).cloned()).unwrap()
}

fn test_router(config: &Config) -> Router {
    let state = build_state(config).unwrap();
    app_router(state, config)
}

/// Address of a port nothing listens on.
fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/", addr)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_alert(app: &Router, body: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/send-alert")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

type Captured = Arc<Mutex<Vec<(String, Value)>>>;

/// Fake push gateway: records `(path, json body)` and answers with `status`.
async fn fake_gateway(status: StatusCode, answer: Value) -> (String, Captured) {
    let captured: Captured = Arc::default();
    let router = Router::new()
        .fallback(
            move |State(captured): State<Captured>,
                  OriginalUri(uri): OriginalUri,
                  Json(body): Json<Value>| {
                let answer = answer.clone();
                async move {
                    captured.lock().unwrap().push((uri.path().to_string(), body));
                    (status, Json(answer)).into_response()
                }
            },
        )
        .with_state(captured.clone());
    (serve(router).await, captured)
}

#[tokio::test]
async fn quote_falls_back_when_provider_is_unreachable() {
    let provider_url = closed_url();
    let config = test_config(&[
        ("PW_ALPHA_VANTAGE_API_KEY", "demo"),
        ("PW_ALPHA_VANTAGE_URL", &provider_url),
    ]);
    let app = test_router(&config);

    let (status, first) = get(&app, "/api/quote").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["origin"], "fallback");
    let first_price = first["price"].as_f64().unwrap();
    assert!((399.0..411.0).contains(&first_price), "{}", first_price);

    let (status, second) = get(&app, "/api/quote").await;
    assert_eq!(status, StatusCode::OK);
    let second_price = second["price"].as_f64().unwrap();
    assert!(
        (second_price - first_price).abs() <= 1.0 + 1e-9,
        "{} -> {}",
        first_price,
        second_price
    );
    let change = second["change"].as_f64().unwrap();
    assert!((second_price - first_price - change).abs() < 1e-6);
    assert!(second["changePercent"].is_number());
    assert!(second["timestamp"].is_string());
}

#[tokio::test]
async fn quote_without_provider_is_synthetic() {
    let app = test_router(&test_config(&[]));

    let (status, body) = get(&app, "/api/quote").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["origin"], "synthetic");
}

#[tokio::test]
async fn quote_with_disabled_fallback_reports_error() {
    let provider_url = closed_url();
    let config = test_config(&[
        ("PW_ALPHA_VANTAGE_API_KEY", "demo"),
        ("PW_ALPHA_VANTAGE_URL", &provider_url),
        ("PW_QUOTE_FALLBACK", "none"),
    ]);
    let app = test_router(&config);

    let (status, body) = get(&app, "/api/quote").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Failed to fetch quote"));
}

#[tokio::test]
async fn send_alert_rejects_missing_parameters() {
    let (gateway_url, captured) = fake_gateway(StatusCode::OK, json!({ "code": 0 })).await;
    let app = test_router(&test_config(&[("PW_PUSH_GATEWAY_URL", &gateway_url)]));

    for body in [
        r#"{"key":"","title":"t","content":"c"}"#,
        r#"{"title":"t","content":"c"}"#,
        "",
        "{\"key\":",
    ] {
        let response = post_alert(&app, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["error"].is_string());
    }
    assert!(captured.lock().unwrap().is_empty());
}

#[tokio::test]
async fn send_alert_relays_gateway_answer() {
    let answer = json!({ "code": 0, "message": "", "data": { "pushid": "42" } });
    let (gateway_url, captured) = fake_gateway(StatusCode::OK, answer.clone()).await;
    let app = test_router(&test_config(&[("PW_PUSH_GATEWAY_URL", &gateway_url)]));

    let response = post_alert(
        &app,
        r#"{"key":"SCT123","title":"QQQ moved 1.50%","content":"QQQ price changed 1.50%"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), answer);

    let captured = captured.lock().unwrap().clone();
    assert_eq!(
        captured,
        vec![(
            "/SCT123.send".to_string(),
            json!({ "title": "QQQ moved 1.50%", "desp": "QQQ price changed 1.50%" })
        )]
    );
}

#[tokio::test]
async fn send_alert_relays_gateway_error_status() {
    let answer = json!({ "code": 40001, "message": "bad key" });
    let (gateway_url, _) = fake_gateway(StatusCode::UNAUTHORIZED, answer.clone()).await;
    let app = test_router(&test_config(&[("PW_PUSH_GATEWAY_URL", &gateway_url)]));

    let response = post_alert(&app, r#"{"key":"nope","title":"t","content":"c"}"#).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), answer);
}

#[tokio::test]
async fn send_alert_with_unreachable_gateway_is_server_error() {
    let gateway_url = closed_url();
    let app = test_router(&test_config(&[("PW_PUSH_GATEWAY_URL", &gateway_url)]));

    let response = post_alert(&app, r#"{"key":"k","title":"t","content":"c"}"#).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to send notification"));
}

#[tokio::test]
async fn liveness_reports_symbol() {
    let app = test_router(&test_config(&[("PW_SYMBOL", "SPY")]));

    let (status, body) = get(&app, "/api/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "SPY monitor service is running");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = test_router(&test_config(&[]));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/test")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn cors_preflight_allows_json_post() {
    for origins in ["*", "http://localhost:5173"] {
        let app = test_router(&test_config(&[("PW_CORS_ALLOW_ORIGINS", origins)]));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/send-alert")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{}", origins);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "*");
        assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
