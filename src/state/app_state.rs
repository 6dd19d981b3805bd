// ============================================================================
// APP STATE - Routing + shared services + per-page view models
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::services::{ApiClient, Notifier, QueryClient, QueryTag};
use crate::state::{ChangeSignal, SessionState};
use crate::viewmodels::{DashboardViewModel, SessionViewModel, TeamViewModel, TicketsViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    ApprovedTickets,
    ProtocolTeam,
}

impl Route {
    pub const NAV: [Route; 3] = [Route::Dashboard, Route::ApprovedTickets, Route::ProtocolTeam];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::ApprovedTickets => "/approved-tickets",
            Route::ProtocolTeam => "/protocol-team",
        }
    }

    /// `/` and unknown paths land on the dashboard
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/login" => Route::Login,
            "/approved-tickets" => Route::ApprovedTickets,
            "/protocol-team" => Route::ProtocolTeam,
            _ => Route::Dashboard,
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Queries the page reads; they are refetched each time the page is entered
    pub fn query_tags(&self) -> &'static [QueryTag] {
        match self {
            Route::Login => &[],
            Route::Dashboard => &[QueryTag::Submissions, QueryTag::DashboardStats],
            Route::ApprovedTickets => &[QueryTag::ApprovedTickets, QueryTag::DashboardStats],
            Route::ProtocolTeam => &[QueryTag::ProtocolTeam],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Verification Queue",
            Route::ApprovedTickets => "Approved Tickets",
            Route::ProtocolTeam => "Protocol Team",
        }
    }
}

/// Everything a view model needs to talk to the backend and the UI shell
#[derive(Clone)]
pub struct AppServices {
    pub api: ApiClient,
    pub queries: QueryClient,
    pub session: SessionState,
    pub notifier: Rc<dyn Notifier>,
    pub changes: ChangeSignal,
}

impl AppServices {
    /// Query status transitions are forwarded to `changes`
    pub fn new(api: ApiClient, session: SessionState, notifier: Rc<dyn Notifier>) -> Self {
        let queries = QueryClient::new();
        let changes = ChangeSignal::new();
        {
            let changes = changes.clone();
            queries.subscribe(move |_, _| changes.notify());
        }
        Self {
            api,
            queries,
            session,
            notifier,
            changes,
        }
    }
}

/// Text typed into form fields, keyed by element id, so a re-render keeps it
#[derive(Clone, Default)]
pub struct FormDrafts {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl FormDrafts {
    pub fn get(&self, id: &str) -> String {
        self.values.borrow().get(id).cloned().unwrap_or_default()
    }

    pub fn set(&self, id: &str, value: String) {
        self.values.borrow_mut().insert(id.to_string(), value);
    }

    /// Forget every field whose id starts with `prefix`
    pub fn clear(&self, prefix: &str) {
        self.values.borrow_mut().retain(|id, _| !id.starts_with(prefix));
    }
}

#[derive(Clone)]
pub struct AppState {
    pub services: AppServices,
    pub drafts: FormDrafts,
    route: Rc<Cell<Route>>,
    pub login: SessionViewModel,
    pub dashboard: DashboardViewModel,
    pub tickets: TicketsViewModel,
    pub team: TeamViewModel,
}

impl AppState {
    pub fn new(services: AppServices, page_size: u32) -> Self {
        Self {
            login: SessionViewModel::new(services.clone()),
            dashboard: DashboardViewModel::new(services.clone()),
            tickets: TicketsViewModel::new(services.clone(), page_size),
            team: TeamViewModel::new(services.clone()),
            drafts: FormDrafts::default(),
            route: Rc::new(Cell::new(Route::Login)),
            services,
        }
    }

    pub fn route(&self) -> Route {
        self.route.get()
    }

    /// Protected pages without a token resolve to the login page
    pub fn resolve(&self, requested: Route) -> Route {
        if requested.is_protected() && !self.services.session.is_authenticated() {
            Route::Login
        } else {
            requested
        }
    }

    /// Switch page. Returns the route actually shown.
    pub fn navigate(&self, requested: Route) -> Route {
        let route = self.resolve(requested);
        if route != requested {
            log::info!("🔒 [ROUTER] {} needs a session, showing login", requested.path());
        }
        if self.route.replace(route) != route {
            self.services.queries.mark_stale(route.query_tags());
            self.services.changes.notify();
        }
        route
    }

    /// Drop the session and every cached query, then show the login page
    pub fn logout(&self) {
        self.login.logout();
        self.drafts.clear("");
        self.navigate(Route::Login);
    }

    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.services.changes.subscribe(callback);
    }
}
