pub mod esg_response;
pub mod users;
