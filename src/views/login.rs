// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{field_value, on_submit, text_el, ElementBuilder};
use crate::state::{AppState, Route};
use crate::views::widgets::text_field;

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [LOGIN] render");
    let vm = &state.login;
    let errors = vm.field_errors();
    let loading = vm.is_loading();

    let header = ElementBuilder::new("div")?
        .class("login-header")
        .child(text_el("div", "login-logo", "🎟️")?)?
        .child(text_el("h1", "login-title", "Admin Portal")?)?
        .child(text_el("p", "login-subtitle", "Sign in to review ticket applications")?)?
        .build();

    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary btn-block")
        .attr("type", "submit")?
        .flag("disabled", loading)?
        .text(if loading { "Signing in..." } else { "Sign in" })
        .build();

    let form = ElementBuilder::new("form")?
        .class("login-form")
        .attr("novalidate", "")?
        .child(text_field(
            &state.drafts,
            "login-email",
            "Email",
            "email",
            "admin@example.com",
            &errors,
            "email",
        )?)?
        .child(text_field(
            &state.drafts,
            "login-password",
            "Password",
            "password",
            "Your password",
            &errors,
            "password",
        )?)?
        .child(submit)?
        .build();

    let app = state.clone();
    on_submit(&form, move || {
        let app = app.clone();
        let email = field_value("login-email");
        let password = field_value("login-password");
        app.drafts.set("login-email", email.clone());
        spawn_local(async move {
            if app.login.login(&email, &password).await.is_ok() {
                app.drafts.clear("login-");
                crate::app::go_to(&app, Route::Dashboard);
            }
        });
    })?;

    Ok(ElementBuilder::new("div")?
        .class("login-screen")
        .child(
            ElementBuilder::new("div")?
                .class("login-container")
                .child(header)?
                .child(form)?
                .build(),
        )?
        .build())
}
