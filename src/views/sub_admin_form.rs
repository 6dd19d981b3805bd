// ============================================================================
// SUB-ADMIN FORM - Modal used from the dashboard and the protocol team page
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{field_value, on_submit, ElementBuilder};
use crate::models::CreateAdminUserRequest;
use crate::state::AppState;
use crate::views::widgets::{modal, text_field};

pub fn render_sub_admin_modal(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.dashboard;
    let errors = vm.create_errors();
    let busy = vm.is_creating();
    let drafts = &state.drafts;

    let form = ElementBuilder::new("form")?
        .class("modal-form")
        .attr("novalidate", "")?
        .child(text_field(drafts, "admin-name", "Full name", "text", "Jane Doe", &errors, "fullName")?)?
        .child(text_field(drafts, "admin-email", "Email", "email", "jane@example.com", &errors, "email")?)?
        .child(text_field(drafts, "admin-password", "Password", "password", "At least 8 characters", &errors, "password")?)?
        .child(text_field(drafts, "admin-phone", "Phone number", "tel", "+233201234567", &errors, "phoneNumber")?)?
        .child(
            ElementBuilder::new("button")?
                .class("btn btn-primary")
                .attr("type", "submit")?
                .flag("disabled", busy)?
                .text(if busy { "Creating..." } else { "Create Sub Admin" })
                .build(),
        )?
        .build();

    let app = state.clone();
    on_submit(&form, move || {
        let request = CreateAdminUserRequest {
            full_name: field_value("admin-name"),
            email: field_value("admin-email"),
            password: field_value("admin-password"),
            phone_number: field_value("admin-phone"),
        };
        let app = app.clone();
        spawn_local(async move {
            if app.dashboard.create_sub_admin(request).await.is_ok() {
                app.drafts.clear("admin-");
            }
        });
    })?;

    let app = state.clone();
    modal("Add Protocol Team Member", form, move || {
        app.dashboard.set_create_form_open(false)
    })
}
