pub mod auth;
pub mod esg_response;
pub mod summary;
