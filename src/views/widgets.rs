// ============================================================================
// WIDGETS - Small pieces shared by several pages
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{target_value, text_el, ElementBuilder};
use crate::error::{error_message, ApiError, FieldError};
use crate::state::FormDrafts;
use crate::utils::validation::message_for;

pub fn stat_card(title: &str, value: &str, sub_value: &str, accent: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class(&format!("stat-card {}", accent))
        .child(text_el("p", "stat-title", title)?)?
        .child(text_el("p", "stat-value", value)?)?
        .child(text_el("p", "stat-sub", sub_value)?)?
        .build())
}

pub fn loader(label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("loader")
        .child(ElementBuilder::new("span")?.class("spinner").build())?
        .child(text_el("span", "loader-label", label)?)?
        .build())
}

pub fn error_banner(title: &str, error: &ApiError) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("alert alert-error")
        .attr("role", "alert")?
        .child(text_el("strong", "alert-title", title)?)?
        .child(text_el("p", "alert-message", &error_message(error))?)?
        .build())
}

/// Labeled `<input>` whose text lives in `drafts` under `id`
pub fn text_field(
    drafts: &FormDrafts,
    id: &str,
    label: &str,
    input_type: &str,
    placeholder: &str,
    errors: &[FieldError],
    field: &str,
) -> Result<Element, JsValue> {
    let drafts_in = drafts.clone();
    let key = id.to_string();
    let input = ElementBuilder::new("input")?
        .id(id)?
        .class("form-input")
        .attr("type", input_type)?
        .attr("placeholder", placeholder)?
        .attr("value", &drafts.get(id))?
        .on("input", move |event| drafts_in.set(&key, target_value(&event)))?
        .build();

    let mut group = ElementBuilder::new("div")?
        .class("form-group")
        .child(
            ElementBuilder::new("label")?
                .attr("for", id)?
                .text(label)
                .build(),
        )?
        .child(input)?;
    if let Some(message) = message_for(errors, field) {
        group = group.child(text_el("p", "form-error", message)?)?;
    }
    Ok(group.build())
}

/// `<select>` with a leading "all" option carrying an empty value
pub fn select_field<F>(
    id: &str,
    placeholder: &str,
    options: &[(String, String)],
    selected: Option<&str>,
    on_change: F,
) -> Result<Element, JsValue>
where
    F: Fn(Option<String>) + 'static,
{
    let mut select = ElementBuilder::new("select")?
        .id(id)?
        .class("form-select")
        .child(
            ElementBuilder::new("option")?
                .attr("value", "")?
                .text(placeholder)
                .build(),
        )?;
    for (value, label) in options {
        select = select.child(
            ElementBuilder::new("option")?
                .attr("value", value)?
                .flag("selected", selected == Some(value.as_str()))?
                .text(label)
                .build(),
        )?;
    }
    Ok(select
        .on("change", move |event| {
            let value = target_value(&event);
            on_change(Some(value).filter(|v| !v.is_empty()));
        })?
        .build())
}

pub fn modal(title: &str, body: Element, on_close: impl Fn() + 'static) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?
        .class("modal-header")
        .child(text_el("h3", "modal-title", title)?)?
        .child(
            ElementBuilder::new("button")?
                .class("modal-close")
                .attr("type", "button")?
                .attr("aria-label", "Close")?
                .text("×")
                .on_click(move |_| on_close())?
                .build(),
        )?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("modal-backdrop")
        .child(
            ElementBuilder::new("div")?
                .class("modal")
                .child(header)?
                .child(body)?
                .build(),
        )?
        .build())
}

pub fn badge(text: &str, tone: &str) -> Result<Element, JsValue> {
    text_el("span", &format!("badge badge-{}", tone), text)
}
