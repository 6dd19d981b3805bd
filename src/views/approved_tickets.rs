// ============================================================================
// APPROVED TICKETS VIEW - Revenue stats, paid tickets table, CSV download
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{text_el, ElementBuilder};
use crate::models::dashboard::format_cedis;
use crate::models::ticket::{humanize_code, TICKET_TYPE_NON_STUDENT, TICKET_TYPE_STUDENT};
use crate::models::TicketRecord;
use crate::services::{Notice, Notifier};
use crate::state::AppState;
use crate::utils::csv_export::download_csv;
use crate::utils::dates::format_display_date;
use crate::views::widgets::{badge, error_banner, loader, modal, select_field, stat_card};

fn type_badge(ticket: &TicketRecord) -> Result<Element, JsValue> {
    let tone = if ticket.is_student() { "blue" } else { "violet" };
    badge(&humanize_code(ticket.ticket_type.as_deref().unwrap_or("")), tone)
}

fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("N/A")
}

fn created_date(ticket: &TicketRecord) -> String {
    ticket
        .created_at
        .as_deref()
        .map(format_display_date)
        .unwrap_or_else(|| "Invalid Date".to_string())
}

fn render_stats(state: &AppState) -> Result<Element, JsValue> {
    let stats = state.tickets.stats().data.map(|s| (*s).clone()).unwrap_or_default();

    Ok(ElementBuilder::new("div")?
        .class("stats-grid")
        .child(stat_card(
            "Student Tickets",
            &stats.student_tickets_count.to_string(),
            &format_cedis(stats.student_tickets_value),
            "accent-blue",
        )?)?
        .child(stat_card(
            "Non-Student Tickets",
            &stats.non_student_tickets_count.to_string(),
            &format_cedis(stats.non_student_tickets_value),
            "accent-violet",
        )?)?
        .child(stat_card(
            "Total Revenue",
            &format_cedis(stats.total_revenue),
            &format!("{} tickets", stats.total_tickets),
            "accent-green",
        )?)?
        .child(stat_card(
            "Payment Methods",
            &format!("Mobile: {}", stats.mobile_money_payments),
            &format!("Card: {}", stats.card_payments),
            "accent-gray",
        )?)?
        .build())
}

fn render_filters(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.tickets;

    let types = vec![
        (TICKET_TYPE_STUDENT.to_string(), "Students".to_string()),
        (TICKET_TYPE_NON_STUDENT.to_string(), "Non-Students".to_string()),
    ];
    let app = state.clone();
    let ticket_type = select_field(
        "tickets-type",
        "All Types",
        &types,
        vm.ticket_type().as_deref(),
        move |value| app.tickets.set_ticket_type(value),
    )?;

    let methods = vec![
        ("mobile_money".to_string(), "Mobile Money".to_string()),
        ("card".to_string(), "Card".to_string()),
    ];
    let app = state.clone();
    let payment_method = select_field(
        "tickets-payment",
        "All Payments",
        &methods,
        vm.payment_method().as_deref(),
        move |value| app.tickets.set_payment_method(value),
    )?;

    Ok(ElementBuilder::new("div")?
        .class("filter-row")
        .child(ticket_type)?
        .child(payment_method)?
        .build())
}

fn render_row(state: &AppState, ticket: &TicketRecord) -> Result<Element, JsValue> {
    let name = ElementBuilder::new("td")?
        .child(text_el("p", "cell-primary", or_na(ticket.full_name.as_deref()))?)?
        .child(text_el("p", "cell-secondary", or_na(ticket.email.as_deref()))?)?
        .build();

    let mut contact = ElementBuilder::new("td")?
        .child(text_el("p", "cell-primary", or_na(ticket.phone_number.as_deref()))?)?;
    if let Some(reference) = ticket.payment_reference.as_deref().filter(|r| !r.is_empty()) {
        contact = contact.child(text_el("p", "cell-secondary", &format!("Ref: {}", reference))?)?;
    }

    let app = state.clone();
    let record = ticket.clone();
    Ok(ElementBuilder::new("tr")?
        .child(name)?
        .child(ElementBuilder::new("td")?.child(type_badge(ticket)?)?.build())?
        .child(text_el("td", "", &format!("{:.2}", ticket.amount.unwrap_or(0.0)))?)?
        .child(text_el(
            "td",
            "",
            &ticket.payment_method.as_deref().map(humanize_code).unwrap_or_else(|| "N/A".into()),
        )?)?
        .child(contact.build())?
        .child(text_el("td", "", &created_date(ticket))?)?
        .child(
            ElementBuilder::new("td")?
                .child(
                    ElementBuilder::new("button")?
                        .class("btn btn-link")
                        .attr("type", "button")?
                        .attr("aria-label", "View ticket")?
                        .text("👁️")
                        .on_click(move |_| app.tickets.select(record.clone()))?
                        .build(),
                )?
                .build(),
        )?
        .build())
}

fn render_pager(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.tickets;
    let page = vm.page();
    let total_pages = vm.total_pages().max(1);
    let (shown, total) = vm
        .displayed_page()
        .map(|p| (p.number_of_elements, p.total_elements))
        .unwrap_or((0, 0));
    let page_size = vm.current_query().size;
    let first = if shown > 0 { (page - 1) * page_size + 1 } else { 0 };
    let last = (page - 1) * page_size + shown;

    let prev_app = state.clone();
    let next_app = state.clone();
    Ok(ElementBuilder::new("div")?
        .class("pager")
        .child(text_el(
            "p",
            "pager-summary",
            &format!("Showing {} to {} of {} results", first, last, total),
        )?)?
        .child(
            ElementBuilder::new("div")?
                .class("pager-buttons")
                .child(
                    ElementBuilder::new("button")?
                        .class("btn btn-ghost")
                        .attr("type", "button")?
                        .flag("disabled", page <= 1)?
                        .text("‹ Prev")
                        .on_click(move |_| prev_app.tickets.set_page(page - 1))?
                        .build(),
                )?
                .child(text_el("span", "pager-position", &format!("{} / {}", page, total_pages))?)?
                .child(
                    ElementBuilder::new("button")?
                        .class("btn btn-ghost")
                        .attr("type", "button")?
                        .flag("disabled", page >= total_pages)?
                        .text("Next ›")
                        .on_click(move |_| next_app.tickets.set_page(page + 1))?
                        .build(),
                )?
                .build(),
        )?
        .build())
}

fn render_table(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.tickets;
    let snapshot = vm.tickets();

    if let Some(error) = snapshot.error.as_ref().filter(|_| snapshot.data.is_none()) {
        return error_banner("Error!", error);
    }
    let Some(page) = vm.displayed_page() else {
        return loader("Loading tickets...");
    };

    let mut head = ElementBuilder::new("tr")?;
    for title in ["Name", "Type", "Amount", "Payment Method", "Phone/Reference", "Date", "Actions"] {
        head = head.child(text_el("th", "", title)?)?;
    }

    let mut body = ElementBuilder::new("tbody")?;
    for ticket in &page.content {
        body = body.child(render_row(state, ticket)?)?;
    }

    let table = ElementBuilder::new("table")?
        .class("data-table")
        .child(ElementBuilder::new("thead")?.child(head.build())?.build())?
        .child(body.build())?
        .build();

    Ok(ElementBuilder::new("div")?
        .class(if snapshot.is_fetching { "table-wrap refreshing" } else { "table-wrap" })
        .child(table)?
        .child(render_pager(state)?)?
        .build())
}

fn detail(label: &str, value: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("detail-cell")
        .child(text_el("p", "detail-label", label)?)?
        .child(text_el("p", "detail-value", value)?)?
        .build())
}

fn render_details(state: &AppState, ticket: &TicketRecord) -> Result<Element, JsValue> {
    let mut body = ElementBuilder::new("div")?
        .class("ticket-details")
        .child(
            ElementBuilder::new("div")?
                .class("details-identity")
                .child(text_el("p", "details-name", or_na(ticket.full_name.as_deref()))?)?
                .child(text_el("p", "details-email", or_na(ticket.email.as_deref()))?)?
                .child(type_badge(ticket)?)?
                .build(),
        )?
        .child(
            ElementBuilder::new("div")?
                .class("details-grid")
                .child(detail("Ticket Code", or_na(ticket.ticket_code.as_deref()))?)?
                .child(detail("Amount", &format_cedis(ticket.amount.unwrap_or(0.0)))?)?
                .child(detail(
                    "Payment Method",
                    &ticket.payment_method.as_deref().map(humanize_code).unwrap_or_else(|| "N/A".into()),
                )?)?
                .child(detail("Phone Number", or_na(ticket.phone_number.as_deref()))?)?
                .child(detail("Payment Reference", or_na(ticket.payment_reference.as_deref()))?)?
                .child(detail("Created Date", &created_date(ticket))?)?
                .build(),
        )?;

    if ticket.is_student() {
        body = body
            .child(text_el("h4", "details-section", "Student Information")?)?
            .child(
                ElementBuilder::new("div")?
                    .class("details-grid")
                    .child(detail("Institution", or_na(ticket.institution_name.as_deref()))?)?
                    .child(detail("Course of Study", or_na(ticket.course_of_study.as_deref()))?)?
                    .child(detail("Student ID", or_na(ticket.student_id_number.as_deref()))?)?
                    .child(detail("Verification Status", or_na(ticket.verification_status.as_deref()))?)?
                    .build(),
            )?;
    }

    if let Some(qr) = ticket.qr_code_url.as_deref().filter(|u| !u.is_empty()) {
        body = body
            .child(text_el("h4", "details-section", "QR Code")?)?
            .child(
                ElementBuilder::new("img")?
                    .class("qr-code")
                    .attr("src", qr)?
                    .attr("alt", "QR Code")?
                    .build(),
            )?;
    }

    let app = state.clone();
    modal("Ticket Details", body.build(), move || app.tickets.close_details())
}

fn download_report(state: &AppState) {
    let Some((filename, csv)) = state.tickets.export_csv(chrono::Utc::now().date_naive()) else {
        return;
    };
    if let Err(e) = download_csv(&filename, &csv) {
        log::error!("❌ [EXPORT] Download failed: {:?}", e);
        state
            .services
            .notifier
            .show(Notice::error("Export Failed", "The report could not be downloaded."));
    }
}

pub fn render_approved_tickets(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [TICKETS] render page={}", state.tickets.page());

    let table_section = ElementBuilder::new("div")?
        .class("panel")
        .child(
            ElementBuilder::new("div")?
                .class("panel-header")
                .child(text_el("h3", "panel-title", "Approved Ticket Details")?)?
                .child(render_filters(state)?)?
                .build(),
        )?
        .child(render_table(state)?)?
        .build();

    let app = state.clone();
    let download = ElementBuilder::new("div")?
        .class("page-actions")
        .child(
            ElementBuilder::new("button")?
                .class("btn btn-primary")
                .attr("type", "button")?
                .text("⬇ Download Report")
                .on_click(move |_| download_report(&app))?
                .build(),
        )?
        .build();

    let mut page = ElementBuilder::new("section")?
        .class("page page-tickets")
        .child(text_el("h2", "page-title", "Approved Tickets")?)?
        .child(render_stats(state)?)?
        .child(table_section)?
        .child(download)?;

    if let Some(ticket) = state.tickets.selected() {
        page = page.child(render_details(state, &ticket)?)?;
    }
    Ok(page.build())
}
