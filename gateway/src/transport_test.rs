use super::*;
use axum::Json;
use axum::Router;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use serde_json::{Value, json};
use std::collections::HashMap;

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn echo(headers: HeaderMap, Query(query): Query<HashMap<String, String>>, body: String) -> Json<Value> {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    Json(json!({ "authorization": authorization, "query": query, "body": body }))
}

async fn teapot() -> (StatusCode, &'static str) {
    (StatusCode::IM_A_TEAPOT, "short and stout")
}

fn transport() -> ReqwestTransport {
    ReqwestTransport::new(HttpTimeouts::default()).unwrap()
}

#[tokio::test]
async fn dispatch_sends_headers_query_and_json() {
    let base = spawn_server(Router::new().route("/echo", post(echo))).await;
    let request = ApiRequest::post(format!("{base}/echo"))
        .query("page", 3)
        .json(&json!({ "name": "edge-1" }))
        .unwrap()
        .with_bearer("tok-1")
        .unwrap();

    let response = transport().dispatch(&request).await.unwrap();
    assert_eq!(response.status, 200);

    let echoed: Value = response.json().unwrap();
    assert_eq!(echoed["authorization"], "Bearer tok-1");
    assert_eq!(echoed["query"]["page"], "3");
    let body: Value = serde_json::from_str(echoed["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!({ "name": "edge-1" }));
}

#[tokio::test]
async fn dispatch_reports_error_statuses_as_responses() {
    let base = spawn_server(Router::new().route("/teapot", get(teapot))).await;

    let response = transport()
        .dispatch(&ApiRequest::get(format!("{base}/teapot")))
        .await
        .unwrap();
    assert_eq!(response.status, 418);
    assert_eq!(response.body, "short and stout");
}

#[tokio::test]
async fn dispatch_without_server_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = transport()
        .dispatch(&ApiRequest::get(format!("http://{addr}/nowhere")))
        .await;
    assert!(result.is_err());
}
