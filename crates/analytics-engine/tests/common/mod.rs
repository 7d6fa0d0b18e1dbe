#![allow(dead_code, missing_docs, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use analytics_engine::{
    AnalyticsEngineClient, ClientBuilder, HttpClient, HttpClientError, HttpRequest, HttpResponse,
};
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde_json::{Value, json};

pub const SERVICE_URL: &str = "https://ae.test";
pub const INSTANCE_ID: &str = "e64c907a-e82f-46fd-addc-ccfafbd28b09";

enum Scripted {
    Respond(Result<HttpResponse, HttpClientError>),
    /// Record the request, then never complete.
    Hang,
}

#[derive(Default)]
struct MockState {
    responses: VecDeque<Scripted>,
    requests: Vec<HttpRequest>,
}

/// A transport that replays scripted responses and records every request.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: &Value) {
        self.push_raw(status, Bytes::from(serde_json::to_vec(body).unwrap()));
    }

    pub fn push_text(&self, status: u16, body: &str) {
        self.push_raw(status, Bytes::from(body.to_owned()));
    }

    pub fn push_empty(&self, status: u16) {
        self.push_raw(status, Bytes::new());
    }

    pub fn push_error(&self, err: HttpClientError) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Scripted::Respond(Err(err)));
    }

    /// The next request is recorded but its response never arrives.
    pub fn push_hang(&self) {
        self.state.lock().unwrap().responses.push_back(Scripted::Hang);
    }

    fn push_raw(&self, status: u16, body: Bytes) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Scripted::Respond(Ok(HttpResponse {
                status: StatusCode::from_u16(status).unwrap(),
                headers: HeaderMap::new(),
                body,
            })));
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// The `start` parameter of each request sent so far.
    pub fn start_params(&self) -> Vec<Option<String>> {
        self.requests()
            .iter()
            .map(|r| r.query_param("start"))
            .collect()
    }
}

impl HttpClient for MockHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpClientError> {
        let scripted = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request);
            state
                .responses
                .pop_front()
                .unwrap_or_else(|| panic!("no scripted response left for request"))
        };
        match scripted {
            Scripted::Respond(response) => response,
            Scripted::Hang => std::future::pending().await,
        }
    }
}

pub fn client(mock: &MockHttpClient) -> AnalyticsEngineClient<MockHttpClient> {
    ClientBuilder::new()
        .service_url(SERVICE_URL)
        .bearer_token("test-token")
        .build_with_http_client(mock.clone())
        .unwrap()
}

/// A list page with the given application ids and optional `next` cursor.
pub fn page(ids: &[&str], next: Option<&str>) -> Value {
    let applications: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "id": id, "state": "finished" }))
        .collect();
    let mut body = json!({
        "applications": applications,
        "first": { "href": format!("{SERVICE_URL}/v3/analytics_engines/{INSTANCE_ID}/spark_applications") },
    });
    if let Some(cursor) = next {
        body["next"] = json!({
            "href": format!(
                "{SERVICE_URL}/v3/analytics_engines/{INSTANCE_ID}/spark_applications?start={cursor}"
            ),
            "start": cursor,
        });
    }
    body
}
