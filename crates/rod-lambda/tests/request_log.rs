use std::io;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

use rod_lambda::app;
use rod_lambda::state::AppState;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Captured {
    /// Fields of every `api_request` event written so far.
    fn api_requests(&self) -> Vec<serde_json::Value> {
        let raw = String::from_utf8(self.0.lock().unwrap().clone()).unwrap();
        raw.lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
            .filter(|event| event["fields"]["message"] == "api_request")
            .map(|event| event["fields"].clone())
            .collect()
    }
}

async fn logged_request(uri: &str) -> serde_json::Value {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(captured.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app(AppState::default()).oneshot(request).await.unwrap();
    assert!(response.status() == StatusCode::OK || response.status().is_client_error());

    let mut events = captured.api_requests();
    assert_eq!(events.len(), 1);
    events.remove(0)
}

#[tokio::test]
async fn logs_what_was_served() {
    let fields = logged_request("/api/generate?formato=csv&artista=Luna").await;

    assert_eq!(fields["method"], "GET");
    assert_eq!(fields["path"], "/api/generate");
    assert_eq!(fields["status"], 200);
    assert_eq!(fields["content_type"], "text/csv; charset=utf-8");
    assert!(fields["bytes"].as_u64().unwrap() > 0);
    assert!(fields["latency_ms"].is_u64());
}

#[tokio::test]
async fn query_string_stays_out_of_the_log() {
    let fields = logged_request("/api/generate?formato=zzz&artista=Secreto").await;

    assert_eq!(fields["status"], 400);
    assert!(!fields.to_string().contains("Secreto"));
}
