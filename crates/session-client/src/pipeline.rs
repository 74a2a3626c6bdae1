//! Request pipeline
//!
//! Every call goes through `SessionClient::send`:
//!
//! - the stored access token is attached as `Authorization: Bearer ...`
//!   (replacing any `Authorization` header set by the caller)
//! - a 401 on a call that is not yet a replay waits on the shared renewal,
//!   then the identical call is sent once more with the new token
//! - a 401 on the replay fails with `Error::DoubleExpiry`, no second renewal
//! - any other failure notifies the user and is returned to the caller
//!
//! An expired token is never reported to the user by itself: either the
//! replay succeeds, or the renewal fails and teardown shows its single
//! "session expired" notification.

use std::sync::Arc;
use std::time::Instant;

use common::Secret;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::Serialize;
use session_auth::{BEARER_PREFIX, Credential, SessionStore};
use session_hooks::{CallKind, ErrorClassification, Notifier, classify_status, user_message};
use session_refresh::RefreshCoordinator;
use tracing::{debug, info, instrument, warn};

use crate::call::{Call, Payload};
use crate::config::SessionClientBuilder;
use crate::error::{Error, Result};

/// HTTP client bound to one session.
///
/// Cheap to clone; clones share the session, the renewal state, and the
/// connection pool.
#[derive(Clone)]
pub struct SessionClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    coordinator: RefreshCoordinator,
    generic_message: String,
}

impl std::fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl SessionClient {
    pub fn builder(base_url: impl Into<String>) -> SessionClientBuilder {
        SessionClientBuilder::new(base_url)
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        base_url: String,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        coordinator: RefreshCoordinator,
        generic_message: String,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                store,
                notifier,
                coordinator,
                generic_message,
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Send a call through the session pipeline.
    #[instrument(
        skip_all,
        fields(
            request_id = %format!("req_{}", uuid::Uuid::new_v4().as_simple()),
            method = %call.method(),
            path = %call.path(),
        )
    )]
    pub async fn send(&self, call: Call) -> Result<Payload> {
        let started = Instant::now();
        let result = self.execute(call).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.classification().label(),
        };
        crate::metrics::record_request(outcome, started.elapsed().as_secs_f64());
        result
    }

    pub async fn get(&self, path: &str) -> Result<Payload> {
        self.send(Call::new(Method::GET, path)).await
    }

    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Payload> {
        self.send(Call::new(Method::POST, path).json(body)).await
    }

    pub async fn put<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Payload> {
        self.send(Call::new(Method::PUT, path).json(body)).await
    }

    pub async fn patch<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Payload> {
        self.send(Call::new(Method::PATCH, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Payload> {
        self.send(Call::new(Method::DELETE, path)).await
    }

    /// Start a session with a freshly issued token pair.
    ///
    /// Cancels a redirect to login still pending from an earlier teardown.
    ///
    /// `Error::Store` means the pair could not be persisted. The stores in
    /// `session_auth` still hold it in memory, so the session is live for
    /// this process but will not survive a restart.
    pub async fn login(&self, access: impl Into<String>, refresh: impl Into<String>) -> Result<()> {
        let credential = Credential::new(access, refresh).ok_or_else(|| {
            Error::InvalidRequest("access and refresh tokens must not be empty".into())
        })?;
        let stored = self.inner.store.set(credential).await;
        let cancelled = self.inner.coordinator.teardown().cancel_redirect();
        if let Err(e) = stored {
            warn!(error = %e, redirect_cancelled = cancelled, "session started but not persisted");
            return Err(Error::Store(e));
        }
        info!(redirect_cancelled = cancelled, "session started");
        Ok(())
    }

    /// End the session locally.
    pub async fn logout(&self) -> Result<()> {
        self.inner.store.clear().await.map_err(Error::Store)?;
        info!("session ended by logout");
        Ok(())
    }

    /// The stored credential, if there is a session.
    pub async fn credential(&self) -> Option<Credential> {
        self.inner.store.get().await
    }

    /// Whether a renewal is in flight right now.
    pub async fn is_renewing(&self) -> bool {
        self.inner.coordinator.is_renewing().await
    }

    /// Wait for a scheduled redirect to login, if any, to fire.
    pub async fn settle(&self) {
        self.inner.coordinator.teardown().wait_redirect().await;
    }

    async fn execute(&self, call: Call) -> Result<Payload> {
        call.validate()?;

        let mut call = call;
        let mut access = self
            .inner
            .store
            .get()
            .await
            .map(|credential| credential.access_token().clone());

        loop {
            let payload = self.dispatch(&call, access.as_ref()).await?;

            match classify_status(payload.status, CallKind::Api) {
                None => return Ok(payload),
                Some(ErrorClassification::SessionExpired) if call.is_replay() => {
                    warn!("access token rejected again after renewal");
                    return Err(Error::DoubleExpiry);
                }
                Some(ErrorClassification::SessionExpired) => {
                    debug!("access token expired, waiting on renewal");
                    let renewed = self
                        .inner
                        .coordinator
                        .obtain_renewed_credential(access.as_ref().map(|token| token.as_str()))
                        .await?;
                    access = Some(renewed);
                    call = call.to_replay();
                    crate::metrics::record_replay();
                    debug!("replaying call with renewed access token");
                }
                Some(classification) => return Err(self.reject(payload, classification)),
            }
        }
    }

    /// Send one attempt of a call. Any status is returned as a payload;
    /// only a transport failure is an error.
    async fn dispatch(&self, call: &Call, access: Option<&Secret<String>>) -> Result<Payload> {
        let mut headers = call.headers().clone();
        headers.remove(AUTHORIZATION);
        if let Some(token) = access {
            let mut value = HeaderValue::from_str(&format!("{BEARER_PREFIX}{}", token.as_str()))
                .map_err(|e| {
                    Error::InvalidRequest(format!("access token is not a valid header value: {e}"))
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut request = self
            .inner
            .http
            .request(call.method().clone(), self.url_for(call.path()))
            .headers(headers);
        if let Some(body) = call.body_bytes() {
            request = request.body(body.clone());
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_failure(e))?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_failure(e))?;

        debug!(status, replay = call.is_replay(), "response received");
        Ok(Payload {
            status,
            headers,
            body,
        })
    }

    fn reject(&self, payload: Payload, classification: ErrorClassification) -> Error {
        let message = user_message(&payload.body, &self.inner.generic_message);
        warn!(
            status = payload.status,
            classification = classification.label(),
            message = %message,
            "call failed"
        );
        self.inner.notifier.notify(&message);
        Error::Status {
            status: payload.status,
            message,
            body: payload.body,
        }
    }

    fn transport_failure(&self, e: reqwest::Error) -> Error {
        warn!(error = %e, timeout = e.is_timeout(), "call failed in transport");
        self.inner.notifier.notify(&self.inner.generic_message);
        Error::Transport {
            message: e.to_string(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use session_auth::{FileSessionStore, MemorySessionStore};
    use session_hooks::{DEFAULT_GENERIC_MESSAGE, Navigator, Timer};
    use session_refresh::DEFAULT_EXPIRED_MESSAGE;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    #[derive(Default)]
    struct CountingNavigator {
        redirects: AtomicUsize,
    }

    impl Navigator for CountingNavigator {
        fn redirect_to_login(&self) {
            self.redirects.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct ImmediateTimer;

    impl Timer for ImmediateTimer {
        fn sleep(
            &self,
            _duration: Duration,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + 'static>> {
            Box::pin(async {})
        }
    }

    struct Fixture {
        client: SessionClient,
        store: Arc<MemorySessionStore>,
        notifier: Arc<RecordingNotifier>,
        navigator: Arc<CountingNavigator>,
    }

    fn fixture(server: &MockServer, store: MemorySessionStore) -> Fixture {
        let store = Arc::new(store);
        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(CountingNavigator::default());
        let client = SessionClient::builder(server.uri())
            .store(store.clone())
            .notifier(notifier.clone())
            .navigator(navigator.clone())
            .timer(Arc::new(ImmediateTimer))
            .build()
            .unwrap();
        Fixture {
            client,
            store,
            notifier,
            navigator,
        }
    }

    fn signed_in() -> MemorySessionStore {
        MemorySessionStore::with_credential(Credential::new("T1", "R1").unwrap())
    }

    async fn mount_expired_for(server: &MockServer, token: &str, expected: u64) {
        Mock::given(method("GET"))
            .and(path("/data"))
            .and(header("authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "jwt expired"
            })))
            .expect(expected)
            .mount(server)
            .await;
    }

    async fn mount_data_for(server: &MockServer, token: &str, expected: u64) {
        Mock::given(method("GET"))
            .and(path("/data"))
            .and(header("authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [1, 2, 3]
            })))
            .expect(expected)
            .mount(server)
            .await;
    }

    async fn mount_renewal(server: &MockServer, response: ResponseTemplate, expected: u64) {
        Mock::given(method("POST"))
            .and(path("/auth/refresh-token"))
            .and(body_json(serde_json::json!({"refreshToken": "R1"})))
            .respond_with(response)
            .expect(expected)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn success_passes_payload_through_with_bearer_token() {
        let server = MockServer::start().await;
        mount_data_for(&server, "T1", 1).await;
        let f = fixture(&server, signed_in());

        let payload = f.client.get("/data").await.unwrap();

        assert_eq!(payload.status, 200);
        let body: serde_json::Value = payload.json().unwrap();
        assert_eq!(body["items"][2], 3);
        assert!(f.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn caller_authorization_header_is_replaced() {
        let server = MockServer::start().await;
        mount_data_for(&server, "T1", 1).await;
        let f = fixture(&server, signed_in());

        let call = Call::new(Method::GET, "/data").header("Authorization", "Bearer forged");
        assert_eq!(f.client.send(call).await.unwrap().status, 200);
    }

    #[tokio::test]
    async fn no_session_sends_no_authorization_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .expect(1)
            .mount(&server)
            .await;
        let f = fixture(&server, MemorySessionStore::new());

        let payload = f.client.get("public").await.unwrap();
        assert_eq!(payload.text().unwrap(), "hello");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn expired_token_is_renewed_and_call_replayed() {
        let server = MockServer::start().await;
        mount_expired_for(&server, "T1", 1).await;
        mount_data_for(&server, "T2", 1).await;
        mount_renewal(
            &server,
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"accessToken": "T2"})),
            1,
        )
        .await;
        let f = fixture(&server, signed_in());

        let payload = f.client.get("/data").await.unwrap();

        assert_eq!(payload.status, 200);
        let stored = f.store.get().await.unwrap();
        assert_eq!(stored.access_token().as_str(), "T2");
        assert_eq!(stored.refresh_token().as_str(), "R1");
        assert!(f.notifier.messages().is_empty(), "expiry must not notify");
    }

    #[tokio::test]
    async fn concurrent_expired_calls_share_one_renewal() {
        let server = MockServer::start().await;
        mount_expired_for(&server, "T1", 3).await;
        mount_data_for(&server, "T2", 3).await;
        mount_renewal(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"accessToken": "T2"}))
                .set_delay(Duration::from_millis(200)),
            1,
        )
        .await;
        let f = fixture(&server, signed_in());

        let (a, b, c) = tokio::join!(
            f.client.get("/data"),
            f.client.get("/data"),
            f.client.get("/data"),
        );

        for result in [a, b, c] {
            assert_eq!(result.unwrap().status, 200);
        }
        assert_eq!(f.store.get().await.unwrap().access_token().as_str(), "T2");
        assert!(f.notifier.messages().is_empty());
        assert_eq!(f.navigator.redirects.load(Ordering::SeqCst), 0);
        // Mock expectations (one renewal, three replays) are verified on drop
    }

    #[tokio::test]
    async fn rejected_renewal_fails_every_call_and_tears_down_once() {
        let server = MockServer::start().await;
        mount_expired_for(&server, "T1", 3).await;
        mount_renewal(
            &server,
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"message": "Invalid refresh token"}))
                .set_delay(Duration::from_millis(200)),
            1,
        )
        .await;
        let f = fixture(&server, signed_in());

        let (a, b, c) = tokio::join!(
            f.client.get("/data"),
            f.client.get("/data"),
            f.client.get("/data"),
        );
        f.client.settle().await;

        for result in [a, b, c] {
            let err = result.unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::Session(session_refresh::Error::RenewalFailed(
                        session_auth::Error::Rejected { status: 401, .. }
                    ))
                ),
                "got {err:?}"
            );
            assert_eq!(err.classification(), ErrorClassification::SessionInvalid);
        }
        assert!(f.store.get().await.is_none());
        assert_eq!(f.navigator.redirects.load(Ordering::SeqCst), 1);
        assert_eq!(
            f.notifier.messages(),
            vec![DEFAULT_EXPIRED_MESSAGE.to_string()]
        );
    }

    #[tokio::test]
    async fn second_expiry_on_replay_is_double_expiry() {
        let server = MockServer::start().await;
        mount_expired_for(&server, "T1", 1).await;
        mount_expired_for(&server, "T2", 1).await;
        mount_renewal(
            &server,
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"accessToken": "T2"})),
            1,
        )
        .await;
        let f = fixture(&server, signed_in());

        let err = f.client.get("/data").await.unwrap_err();

        assert!(matches!(err, Error::DoubleExpiry), "got {err:?}");
        assert!(f.notifier.messages().is_empty());
        assert_eq!(f.navigator.redirects.load(Ordering::SeqCst), 0);
        assert_eq!(
            f.store.get().await.unwrap().access_token().as_str(),
            "T2",
            "session is left intact"
        );
    }

    #[tokio::test]
    async fn other_failure_notifies_with_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "errors": [{"field": "email", "message": "Email is taken"}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let f = fixture(&server, signed_in());

        let err = f
            .client
            .post("/users", &serde_json::json!({"email": "a@b.c"}))
            .await
            .unwrap_err();

        match &err {
            Error::Status { status, message, .. } => {
                assert_eq!(*status, 422);
                assert_eq!(message, "Email is taken");
            }
            other => panic!("expected Status, got {other:?}"),
        }
        assert_eq!(err.classification(), ErrorClassification::Other);
        assert_eq!(f.notifier.messages(), vec!["Email is taken".to_string()]);
    }

    #[tokio::test]
    async fn failure_without_message_uses_generic_notification() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        let f = fixture(&server, signed_in());

        let err = f.client.get("/data").await.unwrap_err();

        assert_eq!(err.classification(), ErrorClassification::Transient);
        assert_eq!(
            f.notifier.messages(),
            vec![DEFAULT_GENERIC_MESSAGE.to_string()]
        );
    }

    #[tokio::test]
    async fn forbidden_is_not_treated_as_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        mount_renewal(&server, ResponseTemplate::new(200), 0).await;
        let f = fixture(&server, signed_in());

        let err = f.client.get("/data").await.unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert_eq!(f.notifier.messages().len(), 1);
    }

    #[tokio::test]
    async fn transport_failure_notifies_and_is_transient() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier = Arc::new(RecordingNotifier::default());
        let client = SessionClient::builder(format!("http://{addr}"))
            .notifier(notifier.clone())
            .build()
            .unwrap();

        let err = client.get("/data").await.unwrap_err();

        assert!(matches!(err, Error::Transport { .. }), "got {err:?}");
        assert_eq!(notifier.messages(), vec![DEFAULT_GENERIC_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn invalid_call_is_rejected_before_dispatch() {
        let server = MockServer::start().await;
        let f = fixture(&server, signed_in());

        let call = Call::new(Method::GET, "/data").header("bad header", "x");
        let err = f.client.send(call).await.unwrap_err();

        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn login_stores_credential_and_cancels_pending_redirect() {
        let server = MockServer::start().await;
        mount_expired_for(&server, "T1", 1).await;
        mount_renewal(&server, ResponseTemplate::new(401), 1).await;

        let store = Arc::new(signed_in());
        let navigator = Arc::new(CountingNavigator::default());
        let client = SessionClient::builder(server.uri())
            .store(store.clone())
            .navigator(navigator.clone())
            .notifier(Arc::new(RecordingNotifier::default()))
            .redirect_delay(Duration::from_secs(60))
            .build()
            .unwrap();

        assert!(client.get("/data").await.is_err());
        client.login("T9", "R9").await.unwrap();
        client.settle().await;

        assert_eq!(navigator.redirects.load(Ordering::SeqCst), 0);
        let credential = client.credential().await.unwrap();
        assert_eq!(credential.access_token().as_str(), "T9");
    }

    #[tokio::test]
    async fn login_rejects_empty_tokens_and_logout_clears() {
        let server = MockServer::start().await;
        let f = fixture(&server, signed_in());

        assert!(matches!(
            f.client.login("", "R1").await,
            Err(Error::InvalidRequest(_))
        ));

        f.client.logout().await.unwrap();
        assert!(f.client.credential().await.is_none());
    }

    #[tokio::test]
    async fn write_calls_replay_identical_body_after_renewal() {
        let server = MockServer::start().await;
        let order = serde_json::json!({"sku": "A-7", "qty": 2});
        for verb in ["PUT", "PATCH"] {
            Mock::given(method(verb))
                .and(path("/orders/7"))
                .and(header("authorization", "Bearer T1"))
                .respond_with(ResponseTemplate::new(401))
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method(verb))
                .and(path("/orders/7"))
                .and(header("authorization", "Bearer T2"))
                .and(body_json(&order))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&server)
                .await;
        }
        mount_renewal(
            &server,
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"accessToken": "T2"})),
            2,
        )
        .await;
        let f = fixture(&server, signed_in());

        assert_eq!(f.client.put("/orders/7", &order).await.unwrap().status, 200);
        // Back to the expired token so the PATCH goes through renewal too
        f.store.set(Credential::new("T1", "R1").unwrap()).await.unwrap();
        assert_eq!(f.client.patch("/orders/7", &order).await.unwrap().status, 200);

        let requests = server.received_requests().await.unwrap();
        let put_bodies: Vec<_> = requests
            .iter()
            .filter(|r| r.method.as_str() == "PUT")
            .map(|r| r.body.clone())
            .collect();
        assert_eq!(put_bodies.len(), 2);
        assert_eq!(put_bodies[0], put_bodies[1], "replay must resend the same bytes");
        assert!(f.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn delete_sends_bearer_token_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/orders/7"))
            .and(header("authorization", "Bearer T1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let f = fixture(&server, signed_in());

        let payload = f.client.delete("/orders/7").await.unwrap();

        assert_eq!(payload.status, 204);
        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn login_that_cannot_persist_still_holds_session_in_memory() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("blocker");
        std::fs::write(&not_a_dir, b"").unwrap();
        let store = FileSessionStore::load(not_a_dir.join("session.json"))
            .await
            .unwrap();
        let client = SessionClient::builder(server.uri())
            .store(Arc::new(store))
            .notifier(Arc::new(RecordingNotifier::default()))
            .build()
            .unwrap();

        let err = client.login("T9", "R9").await.unwrap_err();

        assert!(matches!(err, Error::Store(_)), "got {err:?}");
        let credential = client.credential().await.unwrap();
        assert_eq!(credential.access_token().as_str(), "T9");
    }

    #[test]
    fn absolute_paths_bypass_base_url() {
        let client = SessionClient::builder("https://api.example.com/v1/")
            .build()
            .unwrap();
        assert_eq!(client.url_for("/users"), "https://api.example.com/v1/users");
        assert_eq!(client.url_for("users"), "https://api.example.com/v1/users");
        assert_eq!(
            client.url_for("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }
}
