pub mod analytics_service;
pub mod auth_service;
pub mod transaction_service;
