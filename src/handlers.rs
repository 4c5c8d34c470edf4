pub mod auth;
pub mod dashboard;
pub mod rbac;
pub mod resources;
