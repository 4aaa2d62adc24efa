#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use chrono::{DateTime, Utc};
use salon_web::api::BookingClient;
use salon_web::config::ApiConfig;
use salon_web::session::{MemorySession, SessionStore};
use serde_json::Value;
use shared_types::{Appointment, AppointmentStatus, ProviderRef, SalonRef, ServiceRef};

pub const TOKEN: &str = "tok-123";

/// One request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: Value,
}

impl Hit {
    pub fn has_param(&self, name: &str, value: &str) -> bool {
        self.query
            .split('&')
            .any(|pair| pair == format!("{name}={value}"))
    }
}

pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self::status(StatusCode::OK, body)
    }

    pub fn status(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            delay: None,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Responder = Arc<dyn Fn(&Hit) -> Reply + Send + Sync>;

#[derive(Clone)]
struct MockState {
    responder: Responder,
    hits: Arc<Mutex<Vec<Hit>>>,
}

pub struct MockBackend {
    pub base_url: String,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl MockBackend {
    /// Serves every request through `responder` on an ephemeral port.
    pub async fn start(responder: impl Fn(&Hit) -> Reply + Send + Sync + 'static) -> Self {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            responder: Arc::new(responder),
            hits: hits.clone(),
        };
        let router = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            hits,
        }
    }

    pub fn client(&self) -> BookingClient {
        self.client_with(Arc::new(MemorySession::with_token(TOKEN)), Duration::from_secs(5))
    }

    pub fn client_with(
        &self,
        session: Arc<dyn SessionStore>,
        timeout: Duration,
    ) -> BookingClient {
        BookingClient::new(ApiConfig::new(self.base_url.clone(), timeout), session)
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn only_hit(&self) -> Hit {
        let hits = self.hits();
        assert_eq!(hits.len(), 1, "expected exactly one request, got {hits:?}");
        hits[0].clone()
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let hit = Hit {
        method,
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    };
    let reply = (state.responder)(&hit);
    state.hits.lock().unwrap().push(hit);

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body.to_string(),
    )
        .into_response()
}

pub fn at(text: &str) -> DateTime<Utc> {
    text.parse().unwrap()
}

/// A haircut with Marco at Fade Factory.
pub fn appointment(id: &str, start_at: &str, status: AppointmentStatus) -> Appointment {
    Appointment {
        id: id.to_string(),
        start_at: at(start_at),
        status,
        salon: SalonRef {
            id: "s1".into(),
            name: "Fade Factory".into(),
            address: Some("12 Main St".into()),
        },
        service: ServiceRef {
            id: "cut".into(),
            name: "Haircut".into(),
            price: Some(35.0),
            duration_minutes: Some(45),
        },
        provider: ProviderRef {
            id: "b1".into(),
            name: "Marco".into(),
        },
        customer: None,
        note: None,
        cancellation_reason: None,
        payment_status: None,
        review: None,
    }
}
