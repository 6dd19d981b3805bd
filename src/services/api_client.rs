// ============================================================================
// API CLIENT - HTTP pipeline (middleware + transport), no business logic
// ============================================================================

use serde::{de::DeserializeOwned, Serialize};
use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::services::middleware::{BearerAuth, Middleware, UnauthorizedGuard};
use crate::services::notifier::{Navigator, Notifier};
use crate::state::SessionState;

/// Stateless apart from its pipeline
#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    transport: Rc<dyn HttpTransport>,
    middleware: Vec<Rc<dyn Middleware>>,
}

impl ApiClient {
    /// Bare client without middleware
    pub fn new(base_url: &str, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            base_url: Rc::from(base_url.trim_end_matches('/')),
            transport,
            middleware: Vec::new(),
        }
    }

    /// Client with the standard pipeline: bearer token, then the 401 guard
    pub fn authenticated(
        config: &AppConfig,
        transport: Rc<dyn HttpTransport>,
        session: SessionState,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self::new(config.api_base_url(), transport)
            .with_middleware(BearerAuth::new(session.clone()))
            .with_middleware(UnauthorizedGuard::new(
                session,
                notifier,
                navigator,
                config.session.login_path.clone(),
                config.session.expired_redirect_delay_ms,
                config.ui_config.notice_auto_close_ms,
            ))
    }

    pub fn with_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Rc::new(middleware));
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Run a request through every middleware stage and the transport.
    /// Non-2xx statuses come back as `Err` after the response stages ran.
    pub async fn execute(&self, mut request: HttpRequest) -> ApiResult<HttpResponse> {
        for stage in &self.middleware {
            stage.on_request(&mut request);
        }

        log::debug!("🌐 [API] {} {}", request.method.as_str(), request.url);
        let response = self.transport.send(request.clone()).await?;

        for stage in &self.middleware {
            stage.on_response(&request, &response);
        }

        if response.ok() {
            Ok(response)
        } else {
            let body = Some(response.json_body()).filter(|b| !b.is_null());
            log::error!(
                "❌ [API] {} {} -> HTTP {}",
                request.method.as_str(),
                request.url,
                response.status
            );
            Err(ApiError::from_status(response.status, body))
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ApiResult<T> {
        let request = HttpRequest::get(self.url(path)).with_query(query);
        let response = self.execute(request).await?;
        decode(&response)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let mut request = HttpRequest::post(self.url(path));
        if let Some(body) = body {
            let value = serde_json::to_value(body)
                .map_err(|e| ApiError::Decode(format!("Serialization error: {}", e)))?;
            request = request.with_body(value);
        }
        let response = self.execute(request).await?;
        decode(&response)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> ApiResult<T> {
    let text = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(format!("Parse error: {}", e)))
}
