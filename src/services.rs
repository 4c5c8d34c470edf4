pub mod auth;
pub mod backend;
pub mod dashboard_service;
pub mod resource_service;

pub use auth::AuthService;
pub use backend::BackendClient;
pub use dashboard_service::DashboardService;
pub use resource_service::ResourceService;
