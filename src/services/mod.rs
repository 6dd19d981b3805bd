pub mod api_client;
pub mod auth_service;
pub mod http;
pub mod middleware;
pub mod notifier;
pub mod query_client;
pub mod submission_service;
pub mod team_service;

pub use api_client::ApiClient;
pub use http::{HttpRequest, HttpResponse, HttpTransport, Method};
pub use middleware::{BearerAuth, Middleware, UnauthorizedGuard};
pub use notifier::{Navigator, Notice, NoticeLevel, Notifier};
pub use query_client::{Mutation, Query, QueryClient, QueryKey, QuerySnapshot, QueryStatus, QueryTag};
