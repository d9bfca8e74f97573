use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use hyper::service::make_service_fn;
use hyper::service::service_fn;
use hyper::Body;
use hyper::Method;
use hyper::Request;
use hyper::Response;
use hyper::Server;
use hyper::StatusCode;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::error::SubmitError;
use crate::site::Siteline;
use crate::types::ContactSubmission;

/// HTTP ingress exposing the two site flows.
///
/// # Protocol
/// - POST /contact - Accept one ContactSubmission as JSON
/// - POST /visit - Count a visit (fire-and-forget, always 202)
/// - GET /health - Health check endpoint
///
/// # Example POST /contact payload:
/// ```json
/// {
///   "firstName": "A",
///   "lastName": "B",
///   "email": "a@b.com",
///   "message": "hi"
/// }
/// ```
pub struct HttpIngress {
    /// Address to bind the HTTP server to (e.g., "127.0.0.1:8080")
    bind_addr: String,
    /// Parsed socket address
    socket_addr: SocketAddr,
    /// Actual bound address (set after server starts)
    actual_addr: Arc<Mutex<Option<SocketAddr>>>,
    /// Shared application orchestrator
    app: Arc<Siteline>,
    /// Server shutdown signal
    shutdown_tx: Arc<Mutex<Option<tokio::sync::oneshot::Sender<()>>>>,
}

impl HttpIngress {
    /// Create a new ingress bound to the given address.
    pub fn new(bind_addr: String, app: Arc<Siteline>) -> Self {
        let socket_addr = bind_addr
            .parse()
            .unwrap_or_else(|_| "127.0.0.1:8080".parse().unwrap());

        Self {
            bind_addr,
            socket_addr,
            actual_addr: Arc::new(Mutex::new(None)),
            app,
            shutdown_tx: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the actual bound address (available after the server starts).
    pub async fn actual_addr(&self) -> Option<SocketAddr> {
        *self.actual_addr.lock().await
    }

    /// Handle incoming HTTP requests.
    async fn handle_request(
        req: Request<Body>,
        app: Arc<Siteline>,
    ) -> Result<Response<Body>, Infallible> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        debug!("HTTP request: {} {}", method, path);

        match (&method, path.as_str()) {
            (&Method::GET, "/health") => Ok(Response::builder()
                .status(StatusCode::OK)
                .body(Body::from(r#"{"status":"ok"}"#))
                .unwrap()),

            (&Method::POST, "/contact") => Self::handle_contact(req, app).await,

            (&Method::POST, "/visit") => {
                app.track_visit();
                Ok(Response::builder()
                    .status(StatusCode::ACCEPTED)
                    .body(Body::from(r#"{"status":"accepted"}"#))
                    .unwrap())
            }

            _ => Ok(Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Body::from(r#"{"error":"not_found"}"#))
                .unwrap()),
        }
    }

    /// Handle a contact submission.
    async fn handle_contact(
        req: Request<Body>,
        app: Arc<Siteline>,
    ) -> Result<Response<Body>, Infallible> {
        let whole_body = match hyper::body::to_bytes(req.into_body()).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to read request body: {}", e);
                return Ok(Self::json_response(
                    StatusCode::BAD_REQUEST,
                    json!({"error": "invalid_body", "message": e.to_string()}),
                ));
            }
        };

        let submission: ContactSubmission = match serde_json::from_slice(&whole_body) {
            Ok(sub) => sub,
            Err(e) => {
                error!("Failed to parse ContactSubmission: {}", e);
                return Ok(Self::json_response(
                    StatusCode::BAD_REQUEST,
                    json!({"error": "invalid_json", "message": e.to_string()}),
                ));
            }
        };

        // The orchestrator's precondition: all four fields non-empty. The
        // ingress is the caller and enforces it.
        if !submission.is_complete() {
            return Ok(Self::json_response(
                StatusCode::BAD_REQUEST,
                json!({"error": "missing_field", "message": "all fields are required"}),
            ));
        }

        match app.submit_contact(&submission).await {
            Ok(()) => Ok(Self::json_response(
                StatusCode::OK,
                json!({"status": "ok"}),
            )),
            Err(e @ SubmitError::CooldownActive { .. }) => {
                debug!("submission rejected by cooldown");
                Ok(Self::json_response(
                    StatusCode::TOO_MANY_REQUESTS,
                    json!({"error": "cooldown", "message": e.to_string()}),
                ))
            }
            Err(e) => {
                warn!("submission failed: {:#}", e);
                Ok(Self::json_response(
                    StatusCode::BAD_GATEWAY,
                    json!({"error": "submit_failed", "message": e.to_string()}),
                ))
            }
        }
    }

    fn json_response(status: StatusCode, body: serde_json::Value) -> Response<Body> {
        Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Start the server. Returns once the listener is bound; serving happens
    /// on a spawned task until `close` is called.
    pub async fn open(&mut self) -> Result<()> {
        info!("Starting HTTP ingress on {}", self.bind_addr);

        let app = Arc::clone(&self.app);
        let make_svc = make_service_fn(move |_conn| {
            let app = Arc::clone(&app);
            async move {
                Ok::<_, Infallible>(service_fn(move |req| {
                    Self::handle_request(req, Arc::clone(&app))
                }))
            }
        });

        let server = Server::bind(&self.socket_addr).serve(make_svc);
        let addr = server.local_addr();

        {
            let mut actual_addr_guard = self.actual_addr.lock().await;
            *actual_addr_guard = Some(addr);
        }

        info!("HTTP ingress listening on http://{}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        {
            let mut shutdown_guard = self.shutdown_tx.lock().await;
            *shutdown_guard = Some(shutdown_tx);
        }

        tokio::spawn(async move {
            let graceful = server.with_graceful_shutdown(async {
                shutdown_rx.await.ok();
                info!("HTTP ingress shutdown signal received");
            });

            if let Err(e) = graceful.await {
                error!("HTTP ingress error: {}", e);
            } else {
                info!("HTTP ingress stopped gracefully");
            }
        });

        Ok(())
    }

    /// Stop the server.
    pub async fn close(&mut self) -> Result<()> {
        info!("Closing HTTP ingress");

        let mut shutdown_guard = self.shutdown_tx.lock().await;
        if let Some(shutdown_tx) = shutdown_guard.take() {
            if shutdown_tx.send(()).is_err() {
                warn!("Failed to send shutdown signal (receiver already dropped)");
            }
        }

        info!("HTTP ingress closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::clock::{ClockVariant, ManualClock};
    use crate::config::SiteConfig;
    use crate::datastore::{DatastoreVariant, MockDatastore};
    use crate::flag_store::{FlagStoreVariant, MemoryFlagStore};
    use crate::mailer::{MailerVariant, MockMailer};
    use crate::traits::FlagStore;
    use crate::types::COOLDOWN_KEY;

    const NOW: u64 = 1_700_000_000;

    fn test_app() -> Arc<Siteline> {
        test_app_with(MockDatastore::new(), MockMailer::default())
    }

    fn test_app_with(store: MockDatastore, mailer: MockMailer) -> Arc<Siteline> {
        Arc::new(Siteline::new(
            DatastoreVariant::Mock(store),
            MailerVariant::Mock(mailer),
            FlagStoreVariant::Memory(MemoryFlagStore::new()),
            FlagStoreVariant::Memory(MemoryFlagStore::new()),
            ClockVariant::Manual(ManualClock::at(NOW)),
            SiteConfig::default(),
        ))
    }

    async fn started_ingress(app: Arc<Siteline>) -> (HttpIngress, SocketAddr) {
        let mut ingress = HttpIngress::new("127.0.0.1:0".to_string(), app);
        ingress.open().await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        let addr = ingress
            .actual_addr()
            .await
            .expect("Server should have bound address");
        (ingress, addr)
    }

    fn contact_request(addr: SocketAddr, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(format!("http://{}/contact", addr))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const VALID_BODY: &str =
        r#"{"firstName":"A","lastName":"B","email":"a@b.com","message":"hi"}"#;

    #[tokio::test]
    async fn test_health_endpoint() {
        let (mut ingress, addr) = started_ingress(test_app()).await;

        let client = hyper::Client::new();
        let uri = format!("http://{}/health", addr);
        let response = client.get(uri.parse().unwrap()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        ingress.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_contact_happy_path() {
        let app = test_app();
        let (mut ingress, addr) = started_ingress(Arc::clone(&app)).await;

        let client = hyper::Client::new();
        let response = client.request(contact_request(addr, VALID_BODY)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The submission went through the orchestrator down to the mocks.
        if let DatastoreVariant::Mock(store) = &app.datastore {
            assert_eq!(store.inserted_rows().len(), 1);
        }

        ingress.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_contact_invalid_json() {
        let (mut ingress, addr) = started_ingress(test_app()).await;

        let client = hyper::Client::new();
        let response = client
            .request(contact_request(addr, "invalid json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        ingress.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_contact_empty_field_rejected() {
        let (mut ingress, addr) = started_ingress(test_app()).await;

        let body = r#"{"firstName":"A","lastName":"B","email":"a@b.com","message":""}"#;
        let client = hyper::Client::new();
        let response = client.request(contact_request(addr, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        ingress.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_contact_persist_failure_maps_to_502() {
        let app = test_app_with(
            MockDatastore::new().with_insert_failure(),
            MockMailer::default(),
        );
        let (mut ingress, addr) = started_ingress(app).await;

        let client = hyper::Client::new();
        let response = client.request(contact_request(addr, VALID_BODY)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        // The underlying error text is surfaced in the body.
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();
        assert!(body_str.contains("failed to save submission"), "{}", body_str);

        ingress.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_contact_email_failure_maps_to_502() {
        let app = test_app_with(MockDatastore::new(), MockMailer::with_status(500));
        let (mut ingress, addr) = started_ingress(Arc::clone(&app)).await;

        let client = hyper::Client::new();
        let response = client.request(contact_request(addr, VALID_BODY)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();
        assert!(body_str.contains("500"), "{}", body_str);

        // The submission row was persisted before the email failed.
        if let DatastoreVariant::Mock(store) = &app.datastore {
            assert_eq!(store.inserted_rows().len(), 1);
        }

        ingress.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_contact_cooldown_maps_to_429() {
        let app = test_app();
        app.durable
            .set(COOLDOWN_KEY, &(NOW - 10).to_string())
            .await
            .unwrap();
        let (mut ingress, addr) = started_ingress(Arc::clone(&app)).await;

        let client = hyper::Client::new();
        let response = client.request(contact_request(addr, VALID_BODY)).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        ingress.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_visit_is_accepted_and_counted() {
        let app = test_app();
        let (mut ingress, addr) = started_ingress(Arc::clone(&app)).await;

        let client = hyper::Client::new();
        let req = Request::builder()
            .method(Method::POST)
            .uri(format!("http://{}/visit", addr))
            .body(Body::empty())
            .unwrap();
        let response = client.request(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        // Tracking runs in the background; give it a moment.
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        if let DatastoreVariant::Mock(store) = &app.datastore {
            assert_eq!(store.procedure_calls().len(), 1);
        }

        ingress.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (mut ingress, addr) = started_ingress(test_app()).await;

        let client = hyper::Client::new();
        let uri = format!("http://{}/nonexistent", addr);
        let response = client.get(uri.parse().unwrap()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        ingress.close().await.unwrap();
    }
}
