pub mod esg_record;
pub mod esg_responses;
pub mod users;

pub use esg_record::{EsgRecord, RawSubmission};
pub use esg_responses::{EsgResponse, NewEsgResponse};
pub use users::{NewUser, User};
