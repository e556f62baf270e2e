pub mod attendance;
pub mod chat;
pub mod leave_request;
pub mod reports;
pub mod user;
