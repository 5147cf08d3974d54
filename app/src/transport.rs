//! Executes `HttpRequest` values built by the core.
//!
//! # Design
//! The core never performs I/O; a `Transport` is the single place where a
//! request becomes a network round trip. Non-2xx answers are returned as
//! data so the core client decides what counts as failure. Only a missing
//! response is an `Err`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use blog_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};
use serde_json::Value;
use tracing::debug;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking ureq agent run on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || round_trip(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

fn round_trip(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let HttpRequest {
        method,
        path,
        headers,
        body,
    } = request;
    debug!(%method, %path, "sending request");

    let result = match method {
        HttpMethod::Get => {
            let mut builder = agent.get(&path);
            for (name, value) in &headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        HttpMethod::Delete => {
            let mut builder = agent.delete(&path);
            for (name, value) in &headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        HttpMethod::Post => {
            let mut builder = agent.post(&path);
            for (name, value) in &headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    debug!(status, %path, "received response");
    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

#[derive(Debug, Clone)]
enum Stub {
    Respond { status: u16, body: String },
    Fail(String),
}

type StubMap = Arc<Mutex<HashMap<(HttpMethod, String), Stub>>>;

/// Canned responses keyed by method and path relative to `base_url`.
///
/// Unknown routes answer 404. Every executed request is recorded so tests
/// can assert how many round trips a flow made.
#[derive(Debug, Clone)]
pub struct StubTransport {
    base_url: String,
    stubs: StubMap,
    history: Arc<Mutex<Vec<HttpRequest>>>,
}

impl StubTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            stubs: Arc::new(Mutex::new(HashMap::new())),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn with_response(
        self,
        method: HttpMethod,
        path: &str,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.insert(
            method,
            path,
            Stub::Respond {
                status,
                body: body.into(),
            },
        );
        self
    }

    #[must_use]
    pub fn with_json(self, method: HttpMethod, path: &str, status: u16, body: &Value) -> Self {
        self.with_response(method, path, status, body.to_string())
    }

    /// The request never gets a response.
    #[must_use]
    pub fn with_failure(self, method: HttpMethod, path: &str) -> Self {
        self.insert(method, path, Stub::Fail(format!("stubbed failure for {path}")));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        let url = self.url(path);
        self.requests()
            .iter()
            .filter(|request| request.method == method && request.path == url)
            .count()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn insert(&self, method: HttpMethod, path: &str, stub: Stub) {
        self.stubs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method, self.url(path)), stub);
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let stub = self
            .stubs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(request.method, request.path.clone()))
            .cloned();
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        match stub {
            Some(Stub::Respond { status, body }) => Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body,
            }),
            Some(Stub::Fail(reason)) => Err(ApiError::Transport(reason)),
            None => Ok(HttpResponse {
                status: 404,
                headers: Vec::new(),
                body: String::new(),
            }),
        }
    }
}
