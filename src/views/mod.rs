// ============================================================================
// VIEWS - Functions that build DOM from state (no business logic)
// ============================================================================

pub mod approved_tickets;
pub mod dashboard;
pub mod layout;
pub mod login;
pub mod notices;
pub mod protocol_team;
pub mod sub_admin_form;
pub mod submission_card;
pub mod widgets;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::state::{AppState, Route};

pub use approved_tickets::render_approved_tickets;
pub use dashboard::render_dashboard;
pub use layout::render_layout;
pub use login::render_login;
pub use notices::{BrowserNavigator, ToastNotifier};
pub use protocol_team::render_protocol_team;

/// Whole tree for the current route
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let page = match state.route() {
        Route::Login => return render_login(state),
        Route::Dashboard => render_dashboard(state)?,
        Route::ApprovedTickets => render_approved_tickets(state)?,
        Route::ProtocolTeam => render_protocol_team(state)?,
    };
    render_layout(state, page)
}
