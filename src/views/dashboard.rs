// ============================================================================
// DASHBOARD VIEW - Verification queue
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{field_value, on_submit, target_value, text_el, ElementBuilder};
use crate::models::ticket::{TICKET_TYPE_NON_STUDENT, TICKET_TYPE_STUDENT};
use crate::models::{DashboardStats, SubmissionFilter};
use crate::state::AppState;
use crate::utils::validation::message_for;
use crate::views::sub_admin_form::render_sub_admin_modal;
use crate::views::submission_card::render_submission_card;
use crate::views::widgets::{error_banner, loader, modal, select_field};

/// Badge count per tab. Approved is derived from the other totals.
fn tab_count(stats: &DashboardStats, tab: SubmissionFilter) -> u64 {
    match tab {
        SubmissionFilter::All => stats.total_student_applications,
        SubmissionFilter::Pending => stats.pending_student_applications,
        SubmissionFilter::Approved => stats
            .total_student_applications
            .saturating_sub(stats.pending_student_applications)
            .saturating_sub(stats.rejected_student_applications),
        SubmissionFilter::Rejected => stats.rejected_student_applications,
        SubmissionFilter::Paid => stats.paid_student_applications,
    }
}

fn render_header(state: &AppState) -> Result<Element, JsValue> {
    let mut header = ElementBuilder::new("div")?
        .class("page-header")
        .child(
            ElementBuilder::new("div")?
                .child(text_el("h2", "page-title", "Verification Queue")?)?
                .child(text_el("p", "page-subtitle", "Review and approve student submissions")?)?
                .build(),
        )?;

    let is_super_admin = state
        .login
        .current_user()
        .map(|u| u.is_super_admin())
        .unwrap_or(false);
    if is_super_admin {
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
    Ok(header.build())
}

fn render_tabs(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.dashboard;
    let stats = vm.stats();
    let current = vm.tab();

    let pending = match &stats.data {
        Some(s) => s.pending_student_applications.to_string(),
        None => "...".to_string(),
    };
    let alert = ElementBuilder::new("div")?
        .class("alert alert-info")
        .child(text_el("strong", "alert-title", "New Submissions")?)?
        .child(text_el(
            "p",
            "alert-message",
            &format!("{} new student submissions require verification", pending),
        )?)?
        .build();

    let mut tabs = ElementBuilder::new("div")?.class("tab-bar").attr("role", "tablist")?;
    for tab in SubmissionFilter::TABS {
        let count = stats
            .data
            .as_ref()
            .map(|s| tab_count(s, tab).to_string())
            .unwrap_or_else(|| "...".to_string());
        let app = state.clone();
        tabs = tabs.child(
            ElementBuilder::new("button")?
                .class(if tab == current { "tab active" } else { "tab" })
                .attr("type", "button")?
                .attr("role", "tab")?
                .child(text_el("span", "tab-label", tab.label())?)?
                .child(text_el("span", "tab-count", &count)?)?
                .on_click(move |_| app.dashboard.set_tab(tab))?
                .build(),
        )?;
    }

    Ok(ElementBuilder::new("div")?
        .class("queue-controls")
        .child(alert)?
        .child(tabs.build())?
        .build())
}

fn render_filters(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.dashboard;
    let search = vm.search();

    let search_app = state.clone();
    let search_input = ElementBuilder::new("input")?
        .id("submission-search")?
        .class("form-input search-input")
        .attr("type", "search")?
        .attr("placeholder", "Search by name, phone, institution or course")?
        .attr("value", &search.term)?
        .on("input", move |event| {
            let term = target_value(&event);
            search_app.dashboard.update_search(|s| s.term = term);
        })?
        .build();

    let institutions: Vec<(String, String)> = vm
        .institution_options()
        .into_iter()
        .map(|name| (name.clone(), name))
        .collect();
    let app = state.clone();
    let institution = select_field(
        "filter-institution",
        "All institutions",
        &institutions,
        Some(search.institution.as_str()),
        move |value| app.dashboard.update_search(|s| s.institution = value.unwrap_or_default()),
    )?;

    let ticket_types = vec![
        (TICKET_TYPE_STUDENT.to_string(), "Student".to_string()),
        (TICKET_TYPE_NON_STUDENT.to_string(), "Non-Student".to_string()),
    ];
    let app = state.clone();
    let ticket_type = select_field(
        "filter-ticket-type",
        "All ticket types",
        &ticket_types,
        Some(search.ticket_type.as_str()),
        move |value| app.dashboard.update_search(|s| s.ticket_type = value.unwrap_or_default()),
    )?;

    let methods = vec![
        ("card".to_string(), "Card".to_string()),
        ("mobile_money".to_string(), "Mobile Money".to_string()),
    ];
    let app = state.clone();
    let payment_method = select_field(
        "filter-payment-method",
        "All payment methods",
        &methods,
        Some(search.payment_method.as_str()),
        move |value| app.dashboard.update_search(|s| s.payment_method = value.unwrap_or_default()),
    )?;

    let mut row = ElementBuilder::new("div")?
        .class("filter-row")
        .child(search_input)?
        .child(institution)?
        .child(ticket_type)?
        .child(payment_method)?;
    if !search.is_empty() {
        let app = state.clone();
        row = row.child(
            ElementBuilder::new("button")?
                .class("btn btn-ghost")
                .attr("type", "button")?
                .text("Clear filters")
                .on_click(move |_| app.dashboard.clear_search())?
                .build(),
        )?;
    }
    Ok(row.build())
}

fn render_submissions(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.dashboard;
    let snapshot = vm.submissions();

    if snapshot.data.is_none() {
        if let Some(error) = &snapshot.error {
            return error_banner("Error fetching submissions", error);
        }
        return loader("Loading submissions...");
    }

    let has_records = snapshot.data.as_ref().map(|d| !d.is_empty()).unwrap_or(false);
    if !has_records {
        return text_el("p", "empty-state", "No submissions found for this category.");
    }

    let cards = vm.visible_submissions();
    if cards.is_empty() {
        return text_el("p", "empty-state", "No submissions match your search criteria.");
    }

    let mut grid = ElementBuilder::new("div")?.class("submission-grid");
    for submission in &cards {
        grid = grid.child(render_submission_card(state, submission)?)?;
    }
    Ok(grid.build())
}

fn render_reject_dialog(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.dashboard;
    let errors = vm.reject_errors();
    let busy = vm.is_reviewing();

    let drafts = state.drafts.clone();
    let mut group = ElementBuilder::new("div")?
        .class("form-group")
        .child(
            ElementBuilder::new("label")?
                .attr("for", "reject-reason")?
                .text("Reason for rejection")
                .build(),
        )?
        .child(
            ElementBuilder::new("textarea")?
                .id("reject-reason")?
                .class("form-input")
                .attr("rows", "4")?
                .attr("placeholder", "Explain why this submission is rejected")?
                .text(&state.drafts.get("reject-reason"))
                .on("input", move |event| drafts.set("reject-reason", target_value(&event)))?
                .build(),
        )?;
    if let Some(message) = message_for(&errors, "reason") {
        group = group.child(text_el("p", "form-error", message)?)?;
    }

    let cancel_app = state.clone();
    let form = ElementBuilder::new("form")?
        .class("modal-form")
        .attr("novalidate", "")?
        .child(group.build())?
        .child(
            ElementBuilder::new("div")?
                .class("modal-actions")
                .child(
                    ElementBuilder::new("button")?
                        .class("btn btn-ghost")
                        .attr("type", "button")?
                        .text("Cancel")
                        .on_click(move |_| cancel_app.dashboard.cancel_reject())?
                        .build(),
                )?
                .child(
                    ElementBuilder::new("button")?
                        .class("btn btn-danger")
                        .attr("type", "submit")?
                        .flag("disabled", busy)?
                        .text(if busy { "Rejecting..." } else { "Reject" })
                        .build(),
                )?
                .build(),
        )?
        .build();

    let app = state.clone();
    on_submit(&form, move || {
        let reason = field_value("reject-reason");
        let app = app.clone();
        spawn_local(async move {
            if app.dashboard.confirm_reject(&reason).await.is_ok() {
                app.drafts.clear("reject-");
            }
        });
    })?;

    let app = state.clone();
    modal("Reject Submission", form, move || app.dashboard.cancel_reject())
}

fn render_document_preview(state: &AppState, url: &str) -> Result<Element, JsValue> {
    let body = ElementBuilder::new("div")?
        .class("document-preview")
        .child(
            ElementBuilder::new("img")?
                .attr("src", url)?
                .attr("alt", "Student ID Document")?
                .build(),
        )?
        .child(
            ElementBuilder::new("a")?
                .class("btn btn-link")
                .attr("href", url)?
                .attr("target", "_blank")?
                .attr("rel", "noopener noreferrer")?
                .text("Open in new tab")
                .build(),
        )?
        .build();

    let app = state.clone();
    modal("Student ID Document", body, move || app.dashboard.close_document())
}

pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [DASHBOARD] render tab={}", state.dashboard.tab());
    let vm = &state.dashboard;

    let mut page = ElementBuilder::new("section")?
        .class("page page-dashboard")
        .child(render_header(state)?)?
        .child(render_tabs(state)?)?
        .child(render_filters(state)?)?
        .child(render_submissions(state)?)?;

    if vm.reject_target().is_some() {
        page = page.child(render_reject_dialog(state)?)?;
    }
    if let Some(url) = vm.document_preview() {
        page = page.child(render_document_preview(state, &url)?)?;
    }
    if vm.is_create_form_open() {
        page = page.child(render_sub_admin_modal(state)?)?;
    }
    Ok(page.build())
}
