#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use backoffice_console::config::BackendSettings;
use backoffice_console::services::BackendClient;
use backoffice_console::startup::build_router;
use backoffice_console::AppState;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub backend: MockServer,
    pub state: AppState,
    pub router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl TestApp {
    /// Console wired to a mock REST backend with nothing mounted.
    pub async fn spawn() -> Self {
        let backend = MockServer::start().await;
        let client = BackendClient::new(&BackendSettings {
            url: backend.uri(),
            timeout_secs: 5,
        })
        .expect("Failed to build backend client");

        let state = AppState::from_backend(client);
        let router = build_router(state.clone());

        Self {
            backend,
            state,
            router,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Requests the mock backend received for `method path`.
    pub async fn backend_calls(&self, http_method: &str, request_path: &str) -> usize {
        self.backend
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.to_string() == http_method && r.url.path() == request_path)
            .count()
    }

    pub async fn mount_json(&self, http_method: &str, request_path: &str, body: Value) {
        Mock::given(method(http_method))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.backend)
            .await;
    }

    pub async fn mount_status(&self, http_method: &str, request_path: &str, status: u16) {
        Mock::given(method(http_method))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.backend)
            .await;
    }

    /// Answer the first matching request only; later ones fall through to
    /// mocks mounted afterwards.
    pub async fn mount_json_once(&self, http_method: &str, request_path: &str, body: Value) {
        Mock::given(method(http_method))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .up_to_n_times(1)
            .mount(&self.backend)
            .await;
    }
}

pub fn receipt_json(id: i64, date: &str, amount: f64) -> Value {
    json!({
        "id": id,
        "customerId": 1,
        "customerName": format!("Πελάτης {}", id),
        "date": date,
        "receiptNumber": format!("R-{:04}", id),
        "amount": amount,
        "reason": "Δόση",
        "signature1": "",
        "signature2": ""
    })
}

pub fn payment_json(id: i64, date: &str, amount: f64) -> Value {
    json!({
        "id": id,
        "payeeName": format!("Προμηθευτής {}", id),
        "date": date,
        "paymentNumber": format!("P-{:04}", id),
        "amount": amount,
        "reason": "Υλικά"
    })
}

pub fn company_json(square_meters: Option<f64>) -> Value {
    json!({
        "id": 1,
        "companyName": "KOR CONSTRUCTIONS",
        "taxId": "123456789",
        "address": "Οδός 1",
        "startingCapital": 10000,
        "squareMeters": square_meters,
        "updatedAt": "2024-01-01T10:00:00"
    })
}
