//! Integration test harness for the Creatorum site.
//!
//! Each test starts two servers on ephemeral ports: a mock waitlist backend
//! that records every request and answers through a test-supplied closure,
//! and the real site router pointed at that mock. The site is driven with a
//! cookie-enabled `reqwest` client that does not follow redirects, so tests
//! can assert on `Location` headers.
//!
//! ```rust,ignore
//! let backend = MockBackend::start(|req| match req.path.as_str() {
//!     "/waitlist" => reply(201, json!({})),
//!     _ => reply(404, json!({"error": "not found"})),
//! })
//! .await;
//! let site = TestSite::start(&backend.url).await;
//! let page = site.post_form("/waitlist", &[("full_name", "Ada")]).await;
//! ```

#![allow(clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use creatorum_site::{config::SiteConfig, state::AppState};
use reqwest::{Client, redirect::Policy};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// A request the mock backend received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    /// The request body parsed as JSON (`Null` if it is not JSON).
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }

    /// Value of a query parameter.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query.as_deref()?.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == key).then(|| v.to_string())
        })
    }
}

/// What the mock backend sends back: status and raw body.
pub type Reply = (StatusCode, String);

/// A JSON reply.
#[must_use]
pub fn reply(status: u16, body: Value) -> Reply {
    (
        StatusCode::from_u16(status).expect("valid status code"),
        body.to_string(),
    )
}

/// A reply whose body is not JSON.
#[must_use]
pub fn reply_raw(status: u16, body: &str) -> Reply {
    (
        StatusCode::from_u16(status).expect("valid status code"),
        body.to_string(),
    )
}

type Responder = Arc<dyn Fn(&Recorded) -> Reply + Send + Sync>;

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responder: Responder,
}

/// Recording stand-in for the waitlist backend.
#[derive(Clone)]
pub struct MockBackend {
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    /// Start the mock on an ephemeral port.
    pub async fn start(responder: impl Fn(&Recorded) -> Reply + Send + Sync + 'static) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: Arc::clone(&requests),
            responder: Arc::new(responder),
        };
        let router = Router::new().fallback(handle).with_state(state);

        Self {
            url: spawn(router).await,
            requests,
        }
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }

    /// Requests received for one path.
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = Recorded {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(ToString::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
        body: String::from_utf8_lossy(&body).into_owned(),
    };

    let (status, body) = (state.responder)(&recorded);
    state
        .requests
        .lock()
        .expect("mock lock poisoned")
        .push(recorded);

    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Serve `router` on 127.0.0.1 with an ephemeral port; returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{addr}")
}

/// The site under test plus a browser-like client.
pub struct TestSite {
    pub url: String,
    pub client: Client,
}

impl TestSite {
    /// Start the site against `backend_url`.
    pub async fn start(backend_url: &str) -> Self {
        let backend_url = backend_url.to_string();
        let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../site/static").to_string();
        let config = SiteConfig::from_source(move |key| match key {
            "WAITLIST_API_BASE_URL" => Some(backend_url.clone()),
            "WAITLIST_API_TIMEOUT_SECS" => Some("5".to_string()),
            "CREATORUM_STATIC_DIR" => Some(static_dir.clone()),
            _ => None,
        })
        .expect("test configuration");
        let state = AppState::new(config).expect("application state");

        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            url: spawn(creatorum_site::app(state)).await,
            client,
        }
    }

    /// GET a site path.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.url))
            .send()
            .await
            .expect("site request failed")
    }

    /// POST urlencoded fields to a site path.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(format!("{}{path}", self.url))
            .form(fields)
            .send()
            .await
            .expect("site request failed")
    }

    /// GET a page and return its HTML.
    pub async fn page(&self, path: &str) -> String {
        self.get(path).await.text().await.expect("page body")
    }

    /// Log in through the site's form. The mock must answer `/admin/login`.
    pub async fn login(&self) -> reqwest::Response {
        self.post_form(
            "/admin/login",
            &[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)],
        )
        .await
    }
}

/// Credentials used by the admin tests.
pub const ADMIN_EMAIL: &str = "ops@creatorum.app";
pub const ADMIN_PASSWORD: &str = "correct horse";
pub const ADMIN_TOKEN: &str = "tok-admin-1";

/// `Location` header of a redirect response.
#[must_use]
pub fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// A waitlist entry as the backend serializes it.
#[must_use]
pub fn entry_json(id: u32, name: &str, role: &str, goals: &[&str]) -> Value {
    json!({
        "id": id.to_string(),
        "created_at": "2026-10-19T12:00:00Z",
        "full_name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "role": role,
        "goals": goals,
    })
}
