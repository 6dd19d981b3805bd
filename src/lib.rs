// ============================================================================
// TICKET ADMIN - Admin dashboard for ticket verification (Rust + WASM)
// ============================================================================
// Layers:
// - Models: wire types shared with the backend
// - Services: HTTP pipeline, query cache, one function per endpoint
// - State: session, routing, change notifications
// - ViewModels: UI state + actions per page
// - Views / DOM / App: browser-only rendering (wasm32)
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

#[cfg(test)]
mod test_support;

#[cfg(target_arch = "wasm32")]
pub use wasm_entry::rerender_app;
#[cfg(target_arch = "wasm32")]
use wasm_entry::APP;

#[cfg(target_arch = "wasm32")]
mod wasm_entry {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::app::App;
    use crate::config::CONFIG;

    thread_local! {
        pub(crate) static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if CONFIG.is_logging_enabled() {
            wasm_logger::init(wasm_logger::Config::default());
        }
        log::info!("🚀 Ticket Admin ({})", CONFIG.environment);

        let mut app = App::new()?;
        app.render()?;
        APP.with(|cell| *cell.borrow_mut() = Some(app));

        // Registered once; never re-added on render
        if let Some(window) = crate::dom::window() {
            crate::dom::on_event(&window, "popstate", |_| crate::app::on_popstate())?;
        }
        Ok(())
    }

    /// Full re-render of the current route
    pub fn rerender_app() {
        APP.with(|cell| {
            let Ok(mut slot) = cell.try_borrow_mut() else {
                log::warn!("⚠️ [RERENDER] Render already in progress, skipped");
                return;
            };
            match slot.as_mut() {
                Some(app) => {
                    if let Err(e) = app.render() {
                        log::error!("❌ [RERENDER] {:?}", e);
                    }
                }
                None => log::warn!("⚠️ [RERENDER] App not initialized"),
            }
        });
    }
}
