pub mod dashboard_viewmodel;
pub mod session_viewmodel;
pub mod team_viewmodel;
pub mod tickets_viewmodel;

pub use dashboard_viewmodel::DashboardViewModel;
pub use session_viewmodel::SessionViewModel;
pub use team_viewmodel::TeamViewModel;
pub use tickets_viewmodel::TicketsViewModel;
