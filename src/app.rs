// ============================================================================
// APP - Wiring, full re-render, client-side routing
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement, HtmlInputElement};

use crate::config::CONFIG;
use crate::dom::{append_child, clear_children, current_path, document, get_element_by_id, push_history};
use crate::services::http::FetchTransport;
use crate::services::ApiClient;
use crate::state::{AppServices, AppState, Route, SessionState};
use crate::utils::storage::LocalStorageBackend;
use crate::views::{render_app, BrowserNavigator, ToastNotifier};

pub struct App {
    state: AppState,
    root: Element,
}

/// Focused field and caret, captured before the tree is replaced
struct FocusSnapshot {
    id: String,
    caret: Option<u32>,
}

impl FocusSnapshot {
    fn capture() -> Option<Self> {
        let active = document()?.active_element()?;
        let id = active.id();
        if id.is_empty() {
            return None;
        }
        let caret = active
            .dyn_ref::<HtmlInputElement>()
            .and_then(|input| input.selection_start().ok().flatten());
        Some(Self { id, caret })
    }

    fn restore(&self) {
        let Some(element) = get_element_by_id(&self.id) else {
            return;
        };
        if let Some(el) = element.dyn_ref::<HtmlElement>() {
            let _ = el.focus();
        }
        if let (Some(input), Some(caret)) = (element.dyn_ref::<HtmlInputElement>(), self.caret) {
            // email/number inputs reject selection ranges
            let _ = input.set_selection_range(caret, caret);
        }
    }
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let session = SessionState::rehydrate(Rc::new(LocalStorageBackend), &CONFIG.session.storage_key);
        let notifier = Rc::new(ToastNotifier::new(CONFIG.ui_config.notice_auto_close_ms));
        let api = ApiClient::authenticated(
            &CONFIG,
            Rc::new(FetchTransport),
            session.clone(),
            notifier.clone(),
            Rc::new(BrowserNavigator),
        );
        log::info!("🌐 [APP] API base: {}", CONFIG.api_base_url());

        let services = AppServices::new(api, session, notifier);
        let state = AppState::new(services, CONFIG.ui_config.tickets_page_size);

        // Coalesce bursts of notifications into one render
        let scheduled = Rc::new(Cell::new(false));
        state.subscribe_to_changes(move || {
            if scheduled.replace(true) {
                return;
            }
            let flag = scheduled.clone();
            Timeout::new(0, move || {
                flag.set(false);
                crate::rerender_app();
            })
            .forget();
        });

        let requested = Route::from_path(&current_path());
        let shown = state.navigate(requested);
        if shown != requested || current_path() != shown.path() {
            let _ = push_history(shown.path());
        }

        Ok(Self { state, root })
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        log::debug!("🎬 [APP] render {}", self.state.route().path());
        let focus = FocusSnapshot::capture();

        clear_children(&self.root);
        let view = render_app(&self.state)?;
        append_child(&self.root, &view)?;

        if let Some(focus) = focus {
            focus.restore();
        }
        self.load_current_page();
        Ok(())
    }

    /// Kick off whatever the visible page is missing; no-op when cached
    fn load_current_page(&self) {
        let state = self.state.clone();
        match state.route() {
            Route::Login => {}
            Route::Dashboard => spawn_local(async move { state.dashboard.refresh().await }),
            Route::ApprovedTickets => spawn_local(async move { state.tickets.refresh().await }),
            Route::ProtocolTeam => spawn_local(async move { state.team.refresh().await }),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Navigate and record the page in browser history
pub fn go_to(state: &AppState, route: Route) {
    let shown = state.navigate(route);
    if let Err(e) = push_history(shown.path()) {
        log::warn!("⚠️ [ROUTER] history.pushState failed: {:?}", e);
    }
}

/// Bring the address bar in line with the page shown
pub fn sync_history(state: &AppState) {
    if let Err(e) = push_history(state.route().path()) {
        log::warn!("⚠️ [ROUTER] history.pushState failed: {:?}", e);
    }
}

fn app_state() -> Option<AppState> {
    crate::APP.with(|cell| cell.try_borrow().ok()?.as_ref().map(|app| app.state().clone()))
}

/// Route by path from outside the views (forced redirects)
pub fn navigate_to_path(path: &str) {
    let Some(state) = app_state() else {
        log::warn!("⚠️ [ROUTER] App not initialized, cannot open {}", path);
        return;
    };
    if !state.services.session.is_authenticated() {
        state.services.queries.clear();
    }
    go_to(&state, Route::from_path(path));
}

/// Back/forward buttons
pub fn on_popstate() {
    let Some(state) = app_state() else {
        return;
    };
    let requested = Route::from_path(&current_path());
    if state.navigate(requested) != requested {
        sync_history(&state);
    }
}
