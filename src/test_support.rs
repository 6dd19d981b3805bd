// Test doubles shared by the in-file test modules

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::User;
use crate::services::api_client::ApiClient;
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::services::notifier::{Navigator, Notice, Notifier};
use crate::state::{AppServices, SessionState};
use crate::utils::storage::MemoryStorage;

#[derive(Default)]
struct MockInner {
    routes: HashMap<(String, String), HttpResponse>,
    requests: Vec<HttpRequest>,
}

/// Canned responses keyed by (method, path suffix). Unknown routes answer 404.
///
/// Every call yields once before answering so concurrent callers interleave.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Rc<RefCell<MockInner>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: &str) {
        self.inner.borrow_mut().routes.insert(
            (method.to_string(), path.to_string()),
            HttpResponse::new(status, body),
        );
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.borrow().requests.clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.inner
            .borrow()
            .requests
            .iter()
            .filter(|r| r.url.ends_with(path))
            .count()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tokio::task::yield_now().await;

        let mut inner = self.inner.borrow_mut();
        inner.requests.push(request.clone());
        let response = inner
            .routes
            .iter()
            .find(|((method, path), _)| {
                method == request.method.as_str() && request.url.ends_with(path.as_str())
            })
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| HttpResponse::new(404, ""));
        Ok(response)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    calls: RefCell<Vec<(String, u32)>>,
}

impl RecordingNavigator {
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_after(&self, path: &str, delay_ms: u32) {
        self.calls.borrow_mut().push((path.to_string(), delay_ms));
    }
}

pub fn admin_user() -> User {
    User {
        id: "1".into(),
        email: "admin@event.gh".into(),
        role: "ADMIN".into(),
    }
}

pub fn empty_session() -> SessionState {
    SessionState::rehydrate(Rc::new(MemoryStorage::new()), "auth-storage")
}

/// Client wired like production, over the mock transport
pub fn test_client(
    transport: &MockTransport,
) -> (ApiClient, SessionState, Rc<RecordingNotifier>, Rc<RecordingNavigator>) {
    let session = empty_session();
    let notifier = Rc::new(RecordingNotifier::default());
    let navigator = Rc::new(RecordingNavigator::default());
    let client = ApiClient::authenticated(
        &AppConfig::default(),
        Rc::new(transport.clone()),
        session.clone(),
        notifier.clone(),
        navigator.clone(),
    );
    (client, session, notifier, navigator)
}

/// Services bundle sharing one notifier with the 401 guard
pub fn test_services(
    transport: &MockTransport,
) -> (AppServices, Rc<RecordingNotifier>, Rc<RecordingNavigator>) {
    let (client, session, notifier, navigator) = test_client(transport);
    let services = AppServices::new(client, session, notifier.clone());
    (services, notifier, navigator)
}
