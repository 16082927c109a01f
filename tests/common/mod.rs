//! Common test utilities

#![allow(dead_code)]

use std::path::PathBuf;

use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};

use customer_ltv::api::{self, AppState};
use customer_ltv::{Config, Reducer};

/// Path of the sample event stream
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/events.json")
}

/// Fresh application over an empty reducer
pub fn setup_app() -> (Router, AppState) {
    let state = AppState::new(Reducer::new(), &Config::default());
    (api::build_router(state.clone()), state)
}

pub fn customer_event(verb: &str, key: &str, time: &str, last_name: &str) -> Value {
    json!({
        "type": "CUSTOMER",
        "verb": verb,
        "key": key,
        "event_time": time,
        "last_name": last_name,
        "adr_city": "Middletown",
        "adr_state": "AK"
    })
}

pub fn order_event(verb: &str, key: &str, time: &str, customer_id: &str, amount: &str) -> Value {
    json!({
        "type": "ORDER",
        "verb": verb,
        "key": key,
        "event_time": time,
        "customer_id": customer_id,
        "total_amount": amount
    })
}

pub fn visit_event(key: &str, time: &str, customer_id: &str) -> Value {
    json!({
        "type": "SITE_VISIT",
        "verb": "NEW",
        "key": key,
        "event_time": time,
        "customer_id": customer_id,
        "tags": [{"some key": "some value"}]
    })
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body as JSON
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
