// ============================================================================
// STATE MODULE - Shared state with Rc<RefCell> + change notifications
// ============================================================================

pub mod app_state;
pub mod reactivity;
pub mod session_state;

pub use app_state::{AppServices, AppState, FormDrafts, Route};
pub use reactivity::ChangeSignal;
pub use session_state::SessionState;
