// ============================================================================
// SUBMISSION CARD
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{text_el, ElementBuilder};
use crate::models::dashboard::format_cedis;
use crate::models::ticket::humanize_code;
use crate::models::{DisplayStatus, Submission};
use crate::state::AppState;
use crate::views::widgets::badge;

fn status_tone(status: DisplayStatus) -> &'static str {
    match status {
        DisplayStatus::PendingApproval => "yellow",
        DisplayStatus::Approved => "green",
        DisplayStatus::Rejected => "red",
        DisplayStatus::Paid => "blue",
    }
}

fn detail_row(label: &str, value: Option<&str>) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("detail-row")
        .child(text_el("span", "detail-label", label)?)?
        .child(text_el("span", "detail-value", value.filter(|v| !v.is_empty()).unwrap_or("N/A"))?)?
        .build())
}

pub fn render_submission_card(state: &AppState, submission: &Submission) -> Result<Element, JsValue> {
    let vm = &state.dashboard;
    let busy = vm.is_reviewing();

    let header = ElementBuilder::new("div")?
        .class("card-header")
        .child(text_el("div", "avatar", &submission.initial().to_string())?)?
        .child(
            ElementBuilder::new("div")?
                .class("card-identity")
                .child(text_el("p", "card-name", &submission.name)?)?
                .child(text_el("p", "card-date", &format!("Submitted {}", submission.submitted_at))?)?
                .build(),
        )?
        .child(badge(submission.status.label(), status_tone(submission.status))?)?
        .build();

    let mut details = ElementBuilder::new("div")?
        .class("card-details")
        .child(detail_row("Type", Some(submission.document_type))?)?
        .child(detail_row("Email", submission.email.as_deref())?)?
        .child(detail_row("Phone", submission.phone_number.as_deref())?)?
        .child(detail_row("Institution", submission.institution_name.as_deref())?)?
        .child(detail_row("Course", submission.course_of_study.as_deref())?)?
        .child(detail_row("Student ID", submission.student_id_number.as_deref())?)?;
    if let Some(amount) = submission.amount {
        details = details.child(detail_row("Amount", Some(&format_cedis(amount)))?)?;
    }
    if let Some(method) = submission.payment_method.as_deref() {
        details = details.child(detail_row("Payment", Some(&humanize_code(method)))?)?;
    }
    if let Some(approver) = submission.approved_by {
        details = details.child(detail_row("Approved by", Some(approver))?)?;
    }

    let document = {
        let app = state.clone();
        let card = submission.clone();
        ElementBuilder::new("div")?
            .class("card-document")
            .child(text_el("span", "document-name", submission.document_name)?)?
            .child(
                ElementBuilder::new("button")?
                    .class("btn btn-link")
                    .attr("type", "button")?
                    .text("View document")
                    .on_click(move |_| app.dashboard.view_document(&card))?
                    .build(),
            )?
            .build()
    };

    let mut card = ElementBuilder::new("article")?
        .class("submission-card")
        .attr("data-id", &submission.id)?
        .child(header)?
        .child(details.build())?
        .child(document)?;

    if submission.is_reviewable() {
        let approve_app = state.clone();
        let approve_id = submission.id.clone();
        let reject_app = state.clone();
        let reject_id = submission.id.clone();

        let actions = ElementBuilder::new("div")?
            .class("card-actions")
            .child(
                ElementBuilder::new("button")?
                    .class("btn btn-success")
                    .attr("type", "button")?
                    .flag("disabled", busy)?
                    .text("Approve")
                    .on_click(move |_| {
                        let app = approve_app.clone();
                        let id = approve_id.clone();
                        spawn_local(async move {
                            let _ = app.dashboard.approve(&id).await;
                        });
                    })?
                    .build(),
            )?
            .child(
                ElementBuilder::new("button")?
                    .class("btn btn-danger")
                    .attr("type", "button")?
                    .flag("disabled", busy)?
                    .text("Reject")
                    .on_click(move |_| reject_app.dashboard.open_reject(&reject_id))?
                    .build(),
            )?
            .build();
        card = card.child(actions)?;
    }

    Ok(card.build())
}
