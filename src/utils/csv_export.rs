// ============================================================================
// CSV EXPORT - Current page of approved tickets as a downloadable file
// ============================================================================

use chrono::NaiveDate;

use crate::models::ticket::humanize_code;
use crate::models::TicketRecord;
use crate::utils::dates::format_display_date;

pub const CSV_HEADER: &str = "Name,Email,Type,Amount,Payment Method,Phone,Reference,Date";

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

fn ticket_row(ticket: &TicketRecord) -> String {
    [
        ticket.full_name.clone().unwrap_or_default(),
        ticket.email.clone().unwrap_or_default(),
        humanize_code(ticket.ticket_type.as_deref().unwrap_or_default()),
        format!("{:.2}", ticket.amount.unwrap_or_default()),
        ticket
            .payment_method
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(humanize_code)
            .unwrap_or_else(|| "N/A".to_string()),
        ticket.phone_number.clone().unwrap_or_default(),
        or_na(ticket.payment_reference.as_deref()),
        format_display_date(ticket.created_at.as_deref().unwrap_or_default()),
    ]
    .join(",")
}

/// Header plus one row per ticket, `\n` separated. Fields are not quoted.
pub fn tickets_to_csv(tickets: &[TicketRecord]) -> String {
    std::iter::once(CSV_HEADER.to_string())
        .chain(tickets.iter().map(ticket_row))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("approved-tickets-{}.csv", date.format("%Y-%m-%d"))
}

/// Hand the CSV to the browser as a file download
#[cfg(target_arch = "wasm32")]
pub fn download_csv(filename: &str, content: &str) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type("text/csv");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = crate::dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Url::revoke_object_url(&url)?;

    log::info!("📥 [EXPORT] {} downloaded", filename);
    Ok(())
}
