pub mod transaction_repository;
pub mod user_repository;
