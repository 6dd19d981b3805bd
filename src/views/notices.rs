// ============================================================================
// NOTICES - Toast stack and delayed navigation for the browser
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, body, get_element_by_id, text_el, ElementBuilder};
use crate::services::{Navigator, Notice, Notifier};

const STACK_ID: &str = "notice-stack";

/// Toasts appended to a fixed stack outside `#app`, so re-renders keep them
pub struct ToastNotifier {
    default_auto_close_ms: u32,
}

impl ToastNotifier {
    pub fn new(default_auto_close_ms: u32) -> Self {
        Self { default_auto_close_ms }
    }

    fn stack() -> Result<Element, JsValue> {
        if let Some(stack) = get_element_by_id(STACK_ID) {
            return Ok(stack);
        }
        let stack = ElementBuilder::new("div")?
            .id(STACK_ID)?
            .class("notice-stack")
            .attr("aria-live", "polite")?
            .build();
        body()?.append_child(&stack)?;
        Ok(stack)
    }

    fn render(&self, notice: &Notice) -> Result<(), JsValue> {
        let toast = ElementBuilder::new("div")?
            .class(&format!("notice {}", notice.level.css_class()))
            .attr("role", "status")?
            .child(text_el("strong", "notice-title", &notice.title)?)?
            .child(text_el("p", "notice-message", &notice.message)?)?
            .build();

        let closing = toast.clone();
        let close = ElementBuilder::new("button")?
            .class("notice-close")
            .attr("type", "button")?
            .attr("aria-label", "Dismiss")?
            .text("×")
            .on_click(move |_| closing.remove())?
            .build();
        append_child(&toast, &close)?;
        append_child(&Self::stack()?, &toast)?;

        let delay = notice.auto_close_ms.unwrap_or(self.default_auto_close_ms);
        Timeout::new(delay, move || toast.remove()).forget();
        Ok(())
    }
}

impl Notifier for ToastNotifier {
    fn show(&self, notice: Notice) {
        log::info!("🔔 [NOTICE] {}: {}", notice.title, notice.message);
        if let Err(e) = self.render(&notice) {
            log::error!("❌ [NOTICE] Could not render toast: {:?}", e);
        }
    }
}

/// Client-side redirect through the app router
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate_after(&self, path: &str, delay_ms: u32) {
        let path = path.to_string();
        Timeout::new(delay_ms, move || crate::app::navigate_to_path(&path)).forget();
    }
}
