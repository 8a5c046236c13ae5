//! Integration tests for token rotation detection.
//!
//! These tests drive `AuthorizingTransport` with hand-written token source,
//! transport and credential store doubles, so every branch of the
//! pre-call/post-call protocol can be forced.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use fitbit_api::auth::oauth::OAuthError;
use fitbit_api::clients::{
    AuthorizingTransport, BearerTransport, CredentialStore, HttpError, HttpMethod, HttpRequest,
    HttpResponse, TokenChangeHook, Transport,
};
use fitbit_api::{Credential, TokenSource};
use parking_lot::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

// ============================================================================
// Doubles
// ============================================================================

/// Counts round trips and answers each with an empty 200.
#[derive(Default)]
struct CountingTransport {
    calls: AtomicUsize,
    authorization: Mutex<Vec<String>>,
}

#[async_trait]
impl Transport for CountingTransport {
    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(value) = request.header("Authorization") {
            self.authorization.lock().push(value.to_string());
        }
        Ok(HttpResponse::new(200, HashMap::new(), b"{}".to_vec()))
    }
}

/// Returns whatever credential the test currently scripts, or fails.
struct ScriptedSource {
    current: Mutex<Result<Credential, ()>>,
}

impl ScriptedSource {
    fn new(credential: Credential) -> Self {
        Self {
            current: Mutex::new(Ok(credential)),
        }
    }

    fn failing() -> Self {
        Self {
            current: Mutex::new(Err(())),
        }
    }

    fn set(&self, credential: Credential) {
        *self.current.lock() = Ok(credential);
    }
}

#[async_trait]
impl TokenSource for ScriptedSource {
    async fn token(&self) -> Result<Credential, OAuthError> {
        self.current
            .lock()
            .clone()
            .map_err(|()| OAuthError::MissingRefreshToken)
    }
}

/// Compare-and-write under one lock, with a log of every write.
struct LoggingStore {
    credential: Mutex<Option<Credential>>,
    writes: Mutex<Vec<Credential>>,
    hook: Option<TokenChangeHook>,
}

impl LoggingStore {
    fn new(initial: Option<Credential>, hook: Option<TokenChangeHook>) -> Arc<Self> {
        Arc::new(Self {
            credential: Mutex::new(initial),
            writes: Mutex::new(Vec::new()),
            hook,
        })
    }

    fn current(&self) -> Option<Credential> {
        self.credential.lock().clone()
    }
}

impl CredentialStore for LoggingStore {
    fn replace_if_changed(&self, observed: &Credential) -> bool {
        let mut credential = self.credential.lock();
        if credential.as_ref().is_some_and(|c| c.same_tokens(observed)) {
            return false;
        }
        *credential = Some(observed.clone());
        self.writes.lock().push(observed.clone());
        true
    }

    fn token_change_hook(&self) -> Option<TokenChangeHook> {
        self.hook.clone()
    }
}

fn channel_hook() -> (TokenChangeHook, UnboundedReceiver<Credential>) {
    let (tx, rx) = unbounded_channel();
    let hook: TokenChangeHook = Arc::new(move |credential| {
        let _ = tx.send(credential);
    });
    (hook, rx)
}

fn authorizing(
    source: &Arc<ScriptedSource>,
    base: &Arc<CountingTransport>,
    store: &Arc<LoggingStore>,
) -> AuthorizingTransport {
    let source: Arc<dyn TokenSource> = Arc::clone(source) as Arc<dyn TokenSource>;
    let bearer = BearerTransport::new(Arc::clone(&source), Arc::clone(base) as Arc<dyn Transport>);
    let store: Weak<dyn CredentialStore> = Arc::downgrade(store) as Weak<dyn CredentialStore>;
    AuthorizingTransport::new(source, Arc::new(bearer), store)
}

fn request() -> HttpRequest {
    HttpRequest::builder(HttpMethod::Get, "https://api.fitbit.com/1/user/-/devices.json")
        .build()
        .unwrap()
}

// ============================================================================
// Pre-call check
// ============================================================================

#[tokio::test]
async fn test_failing_precheck_never_touches_the_network() {
    let source = Arc::new(ScriptedSource::failing());
    let base = Arc::new(CountingTransport::default());
    let store = LoggingStore::new(None, None);

    let result = authorizing(&source, &base, &store)
        .round_trip(request())
        .await;

    assert!(matches!(result, Err(HttpError::ExpiredToken)));
    assert_eq!(base.calls.load(Ordering::SeqCst), 0);
    assert!(store.current().is_none());
}

// ============================================================================
// Post-call check
// ============================================================================

#[tokio::test]
async fn test_hook_fires_once_per_rotation() {
    let (hook, mut rx) = channel_hook();
    let source = Arc::new(ScriptedSource::new(Credential::new("A", "R", None)));
    let base = Arc::new(CountingTransport::default());
    let store = LoggingStore::new(Some(Credential::new("A", "R", None)), Some(hook));
    let transport = authorizing(&source, &base, &store);

    transport.round_trip(request()).await.unwrap();
    transport.round_trip(request()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(rx.try_recv().is_err(), "stable token must not notify");

    source.set(Credential::new("B", "R", None));
    transport.round_trip(request()).await.unwrap();

    let rotated = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("hook was not called")
        .unwrap();
    assert_eq!(rotated.access_token, "B");

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(rx.try_recv().is_err(), "hook must fire exactly once");

    assert_eq!(store.current().unwrap().access_token, "B");
    assert_eq!(
        *base.authorization.lock(),
        vec!["Bearer A", "Bearer A", "Bearer B"]
    );
}

#[tokio::test]
async fn test_refresh_token_change_alone_is_a_rotation() {
    let source = Arc::new(ScriptedSource::new(Credential::new("A", "R2", None)));
    let base = Arc::new(CountingTransport::default());
    let store = LoggingStore::new(Some(Credential::new("A", "R", None)), None);

    authorizing(&source, &base, &store)
        .round_trip(request())
        .await
        .unwrap();

    assert_eq!(store.current().unwrap().refresh_token, "R2");
    assert_eq!(store.writes.lock().len(), 1);
}

#[tokio::test]
async fn test_expiry_change_alone_is_not_a_rotation() {
    let source = Arc::new(ScriptedSource::new(Credential::new(
        "A",
        "R",
        Some(chrono::Utc::now() + chrono::Duration::hours(8)),
    )));
    let base = Arc::new(CountingTransport::default());
    let store = LoggingStore::new(Some(Credential::new("A", "R", None)), None);

    authorizing(&source, &base, &store)
        .round_trip(request())
        .await
        .unwrap();

    assert!(store.writes.lock().is_empty());
}

#[tokio::test]
async fn test_panicking_hook_does_not_fail_the_call() {
    let hook: TokenChangeHook = Arc::new(|_| panic!("storage unavailable"));
    let source = Arc::new(ScriptedSource::new(Credential::new("B", "R", None)));
    let base = Arc::new(CountingTransport::default());
    let store = LoggingStore::new(Some(Credential::new("A", "R", None)), Some(hook));

    let response = authorizing(&source, &base, &store)
        .round_trip(request())
        .await
        .unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(store.current().unwrap().access_token, "B");
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_rotations_last_write_wins() {
    let base = Arc::new(CountingTransport::default());
    let store = LoggingStore::new(Some(Credential::new("A0", "R0", None)), None);

    let mut handles = Vec::new();
    for i in 1..=32 {
        let source = Arc::new(ScriptedSource::new(Credential::new(
            format!("A{i}"),
            format!("R{i}"),
            None,
        )));
        let transport = authorizing(&source, &base, &store);
        handles.push(tokio::spawn(async move {
            transport.round_trip(request()).await.map(|r| r.code)
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 200);
    }

    let writes = store.writes.lock().clone();
    let last = writes.last().unwrap();
    let current = store.current().unwrap();

    assert_eq!(writes.len(), 32);
    assert!(current.same_tokens(last));
    // Each write is a whole credential: the access and refresh tokens belong
    // to the same rotation
    for credential in &writes {
        assert_eq!(&credential.access_token[1..], &credential.refresh_token[1..]);
    }
    assert_eq!(base.calls.load(Ordering::SeqCst), 32);
}
