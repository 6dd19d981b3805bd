// ============================================================================
// PROTOCOL TEAM VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{text_el, ElementBuilder};
use crate::models::ProtocolMember;
use crate::state::AppState;
use crate::utils::dates::format_display_date;
use crate::views::sub_admin_form::render_sub_admin_modal;
use crate::views::widgets::{badge, error_banner, loader};

fn render_member(member: &ProtocolMember) -> Result<Element, JsValue> {
    let (label, tone) = if member.active { ("Active", "green") } else { ("Inactive", "gray") };
    let joined = member
        .created_at
        .as_deref()
        .map(format_display_date)
        .unwrap_or_else(|| "Invalid Date".to_string());

    Ok(ElementBuilder::new("tr")?
        .attr("data-id", &member.id)?
        .child(text_el("td", "", &member.full_name)?)?
        .child(text_el("td", "", &member.email)?)?
        .child(text_el("td", "", &member.phone_number)?)?
        .child(ElementBuilder::new("td")?.child(badge(label, tone)?)?.build())?
        .child(text_el("td", "", &joined)?)?
        .build())
}

fn render_members(state: &AppState) -> Result<Element, JsValue> {
    let snapshot = state.team.members();

    let Some(members) = snapshot.data else {
        return match &snapshot.error {
            Some(error) => error_banner("Error!", error),
            None => loader("Loading protocol team..."),
        };
    };

    let mut head = ElementBuilder::new("tr")?;
    for title in ["Full Name", "Email", "Phone Number", "Status", "Date Joined"] {
        head = head.child(text_el("th", "", title)?)?;
    }
    let mut body = ElementBuilder::new("tbody")?;
    for member in members.iter() {
        body = body.child(render_member(member)?)?;
    }

    Ok(ElementBuilder::new("table")?
        .class("data-table")
        .child(ElementBuilder::new("thead")?.child(head.build())?.build())?
        .child(body.build())?
        .build())
}

pub fn render_protocol_team(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [TEAM] render");

    let mut header = ElementBuilder::new("div")?
        .class("page-header")
        .child(
            ElementBuilder::new("div")?
                .child(text_el("h2", "page-title", "Protocol Team")?)?
                .child(text_el("p", "page-subtitle", "Manage and view all protocol team members.")?)?
                .build(),
        )?;
    let can_add = state
        .login
        .current_user()
        .map(|u| u.is_super_admin())
        .unwrap_or(false);
    if can_add {
        let app = state.clone();
        header = header.child(
            ElementBuilder::new("button")?
                .class("btn btn-primary")
                .attr("type", "button")?
                .text("+ Add Sub Admin")
                .on_click(move |_| app.dashboard.set_create_form_open(true))?
                .build(),
        )?;
    }

    let mut page = ElementBuilder::new("section")?
        .class("page page-team")
        .child(header.build())?
        .child(
            ElementBuilder::new("div")?
                .class("panel")
                .child(render_members(state)?)?
                .build(),
        )?;
    if state.dashboard.is_create_form_open() {
        page = page.child(render_sub_admin_modal(state)?)?;
    }
    Ok(page.build())
}
