// ============================================================================
// LAYOUT - Sidebar navigation + user menu around the protected pages
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{text_el, ElementBuilder};
use crate::state::{AppState, Route};

pub fn render_layout(state: &AppState, content: Element) -> Result<Element, JsValue> {
    let current = state.route();

    let mut nav = ElementBuilder::new("nav")?.class("sidebar-nav");
    for route in Route::NAV {
        let app = state.clone();
        let class = if route == current { "nav-link active" } else { "nav-link" };
        nav = nav.child(
            ElementBuilder::new("a")?
                .class(class)
                .attr("href", route.path())?
                .text(route.label())
                .on_click(move |event| {
                    event.prevent_default();
                    crate::app::go_to(&app, route);
                })?
                .build(),
        )?;
    }

    let user = state.login.current_user();
    let app = state.clone();
    let user_menu = ElementBuilder::new("div")?
        .class("user-menu")
        .child(text_el(
            "p",
            "user-email",
            user.as_ref().map(|u| u.email.as_str()).unwrap_or("Admin User"),
        )?)?
        .child(text_el(
            "p",
            "user-role",
            user.as_ref().map(|u| u.role.as_str()).unwrap_or("Administrator"),
        )?)?
        .child(
            ElementBuilder::new("button")?
                .class("btn btn-ghost")
                .attr("type", "button")?
                .text("Logout")
                .on_click(move |_| {
                    app.logout();
                    crate::app::sync_history(&app);
                })?
                .build(),
        )?
        .build();

    let sidebar = ElementBuilder::new("aside")?
        .class("sidebar")
        .child(text_el("div", "sidebar-brand", "Ticket Admin")?)?
        .child(nav.build())?
        .child(user_menu)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("app-shell")
        .child(sidebar)?
        .child(ElementBuilder::new("main")?.class("app-content").child(content)?.build())?
        .build())
}
