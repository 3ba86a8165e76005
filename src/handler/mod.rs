pub mod auth;
pub mod error;
pub mod esg_response;
pub mod summary;
