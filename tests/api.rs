use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use sleep_remote::{
    api::create_router,
    services::{Dispatcher, RecordingSink, RecordingTimeoutWriter, TimeoutSettings},
    state::{AppState, TimerPolicy, DEFAULT_CYCLE_KEY},
    tasks::sleep_timer_task,
};

struct TestApp {
    router: Router,
    writer: RecordingTimeoutWriter,
    sink: RecordingSink,
}

fn test_app() -> TestApp {
    let (state, commands) = AppState::new(20554, "127.0.0.1".into(), TimerPolicy::default());
    let state = Arc::new(state);
    let writer = RecordingTimeoutWriter::new();
    let sink = RecordingSink::new();
    let dispatcher = Dispatcher::new(
        Arc::new(writer.clone()),
        Arc::new(sink.clone()),
        TimeoutSettings::default(),
    );
    tokio::spawn(sleep_timer_task(Arc::clone(&state), commands, dispatcher));

    TestApp {
        router: create_router(state, DEFAULT_CYCLE_KEY),
        writer,
        sink,
    }
}

async fn call(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();
    let (status, body) = call(&app.router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn status_starts_at_off() {
    let app = test_app();
    let (status, body) = call(&app.router, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["preset_label"], "OFF");
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["remaining_seconds"], 0);
    assert_eq!(body["port"], 20554);
}

#[tokio::test]
async fn press_starts_first_preset() {
    let app = test_app();
    let (status, body) = call(&app.router, Method::POST, "/press", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["message"], "Sleep timer: 60 min");
    assert_eq!(body["timer"]["preset_index"], 0);
    assert_eq!(body["timer"]["remaining_seconds"], 3600);

    let (_, status_body) = call(&app.router, Method::GET, "/status", None).await;
    assert_eq!(status_body["last_action"], "press (http)");
    assert!(app.sink.messages().contains(&"Sleep timer: 60 min".to_string()));
}

#[tokio::test]
async fn quick_presses_cycle_back_to_off() {
    let app = test_app();
    let mut last = Value::Null;
    for _ in 0..5 {
        let (_, body) = call(&app.router, Method::POST, "/press", None).await;
        last = body;
    }
    assert_eq!(last["status"], "idle");
    assert_eq!(last["message"], "Sleep timer: OFF");
    assert_eq!(last["timer"]["preset_label"], "OFF");
}

#[tokio::test]
async fn key_endpoint_filters_events() {
    let app = test_app();

    let (status, body) = call(
        &app.router,
        Method::POST,
        "/key",
        Some(json!({ "key_code": DEFAULT_CYCLE_KEY, "action": "up" })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["timer"]["preset_label"], "OFF");

    let (status, _) = call(
        &app.router,
        Method::POST,
        "/key",
        Some(json!({ "key_code": DEFAULT_CYCLE_KEY, "action": "down", "repeat_count": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = call(
        &app.router,
        Method::POST,
        "/key",
        Some(json!({ "key_code": DEFAULT_CYCLE_KEY, "action": "down" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["preset_label"], "60 min");
}

#[tokio::test]
async fn wake_restores_normal_timeout() {
    let app = test_app();
    call(&app.router, Method::POST, "/press", None).await;

    let (status, body) = call(&app.router, Method::POST, "/wake", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "restored");
    assert_eq!(body["timer"]["phase"], "idle");

    // the write lands on the dispatcher's writer task
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(app.writer.written(), vec![600_000]);
}
