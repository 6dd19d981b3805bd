// ============================================================================
// MIDDLEWARE - Request/response stages run by ApiClient on every call
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::services::http::{HttpRequest, HttpResponse};
use crate::services::notifier::{Navigator, Notice, Notifier};
use crate::state::SessionState;

pub trait Middleware {
    fn on_request(&self, _request: &mut HttpRequest) {}
    fn on_response(&self, _request: &HttpRequest, _response: &HttpResponse) {}
}

/// Adds `Authorization: Bearer <token>` while a token is held
pub struct BearerAuth {
    session: SessionState,
}

impl BearerAuth {
    pub fn new(session: SessionState) -> Self {
        Self { session }
    }
}

impl Middleware for BearerAuth {
    fn on_request(&self, request: &mut HttpRequest) {
        if let Some(token) = self.session.token() {
            request.set_header("Authorization", format!("Bearer {}", token));
        }
    }
}

/// Global 401 policy: logout, "session expired" notice, delayed redirect to login.
///
/// Notice and redirect fire at most once per session generation so a burst of
/// concurrent 401s produces a single redirect. The error itself still reaches
/// the caller.
pub struct UnauthorizedGuard {
    session: SessionState,
    notifier: Rc<dyn Notifier>,
    navigator: Rc<dyn Navigator>,
    login_path: String,
    redirect_delay_ms: u32,
    notice_auto_close_ms: u32,
    handled_generation: Cell<Option<u64>>,
}

impl UnauthorizedGuard {
    pub fn new(
        session: SessionState,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
        login_path: impl Into<String>,
        redirect_delay_ms: u32,
        notice_auto_close_ms: u32,
    ) -> Self {
        Self {
            session,
            notifier,
            navigator,
            login_path: login_path.into(),
            redirect_delay_ms,
            notice_auto_close_ms,
            handled_generation: Cell::new(None),
        }
    }
}

impl Middleware for UnauthorizedGuard {
    fn on_response(&self, request: &HttpRequest, response: &HttpResponse) {
        if response.status != 401 {
            return;
        }

        log::warn!("🔒 [AUTH] 401 from {} {}", request.method.as_str(), request.url);
        self.session.logout();

        let generation = self.session.generation();
        if self.handled_generation.get() == Some(generation) {
            return;
        }
        self.handled_generation.set(Some(generation));

        self.notifier.show(
            Notice::warning(
                "Session Expired",
                "Your session has expired. Please log in again.",
            )
            .auto_close(self.notice_auto_close_ms),
        );
        self.navigator
            .navigate_after(&self.login_path, self.redirect_delay_ms);
    }
}
